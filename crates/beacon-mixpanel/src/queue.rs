// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Call-queue stub for use before the Mixpanel SDK has loaded.
//!
//! [`CallQueue`] accepts every SDK call and records it in FIFO order. Once
//! the real SDK is available, [`CallQueue::replay_into`] issues the
//! recorded calls against it in the order they were made.

use std::sync::atomic::{AtomicBool, Ordering};

use beacon_analytics_core::{Properties, Value};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::error::SdkError;
use crate::sdk::{MixpanelSdk, People, SdkCall, SdkResult};

/// A recording, replayable stand-in for the Mixpanel SDK.
#[derive(Debug, Default)]
pub struct CallQueue {
	calls: Mutex<Vec<SdkCall>>,
	loaded: AtomicBool,
	distinct_id: Mutex<Option<String>>,
	properties: Mutex<Properties>,
	failing: Mutex<Option<&'static str>>,
}

impl CallQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// A snapshot of the recorded calls.
	pub fn calls(&self) -> Vec<SdkCall> {
		self.calls.lock().clone()
	}

	/// Removes and returns every recorded call.
	pub fn take_calls(&self) -> Vec<SdkCall> {
		std::mem::take(&mut *self.calls.lock())
	}

	/// Recorded calls to one SDK method, e.g. `"register"` or `"people.set"`.
	pub fn calls_to(&self, method: &str) -> Vec<SdkCall> {
		self.calls
			.lock()
			.iter()
			.filter(|call| call.method() == method)
			.cloned()
			.collect()
	}

	pub fn len(&self) -> usize {
		self.calls.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.calls.lock().is_empty()
	}

	/// Marks the SDK configuration as present, making `has_config` true.
	pub fn mark_loaded(&self) {
		self.loaded.store(true, Ordering::SeqCst);
	}

	/// Sets the value reported by `get_distinct_id`.
	pub fn set_distinct_id(&self, distinct_id: Option<String>) {
		*self.distinct_id.lock() = distinct_id;
	}

	/// Sets a value reported by `get_property`.
	pub fn set_property(&self, name: impl Into<String>, value: impl Into<Value>) {
		self.properties.lock().set(name, value);
	}

	/// Makes every subsequent call to `method` fail instead of being recorded.
	pub fn fail_method(&self, method: &'static str) {
		*self.failing.lock() = Some(method);
	}

	/// Undoes [`CallQueue::fail_method`].
	pub fn clear_failure(&self) {
		*self.failing.lock() = None;
	}

	/// Replays the recorded calls against `sdk` in FIFO order.
	///
	/// Stops at the first failing call; that call and everything after it
	/// stay queued. Returns the number of calls replayed.
	pub fn replay_into(&self, sdk: &dyn MixpanelSdk) -> Result<usize, SdkError> {
		let pending = self.take_calls();
		debug!(count = pending.len(), "Replaying queued mixpanel calls");

		for (index, call) in pending.iter().enumerate() {
			if let Err(e) = call.apply(sdk) {
				warn!(method = call.method(), error = %e, "Replay stopped on failing call");
				let mut calls = self.calls.lock();
				let newer = std::mem::take(&mut *calls);
				calls.extend(pending[index..].iter().cloned());
				calls.extend(newer);
				return Err(e);
			}
		}

		Ok(pending.len())
	}

	fn record(&self, call: SdkCall) -> SdkResult {
		let method = call.method();
		if *self.failing.lock() == Some(method) {
			return Err(SdkError::new(method, "call rejected"));
		}
		trace!(method, "Queued mixpanel call");
		self.calls.lock().push(call);
		Ok(())
	}
}

impl People for CallQueue {
	fn set(&self, properties: &Properties) -> SdkResult {
		self.record(SdkCall::PeopleSet(properties.clone()))
	}

	fn set_one(&self, key: &str, value: &Value) -> SdkResult {
		self.record(SdkCall::PeopleSetOne {
			key: key.to_string(),
			value: value.clone(),
		})
	}

	fn increment(&self, event: &str) -> SdkResult {
		self.record(SdkCall::PeopleIncrement(event.to_string()))
	}

	fn track_charge(&self, amount: f64) -> SdkResult {
		self.record(SdkCall::PeopleTrackCharge(amount))
	}
}

impl MixpanelSdk for CallQueue {
	fn init(&self, token: &str, options: &Properties) -> SdkResult {
		self.record(SdkCall::Init {
			token: token.to_string(),
			options: options.clone(),
		})
	}

	fn identify(&self, id: &str) -> SdkResult {
		self.record(SdkCall::Identify(id.to_string()))
	}

	fn name_tag(&self, tag: &str) -> SdkResult {
		self.record(SdkCall::NameTag(tag.to_string()))
	}

	fn register(&self, properties: &Properties) -> SdkResult {
		self.record(SdkCall::Register(properties.clone()))
	}

	fn alias(&self, to: &str, from: Option<&str>) -> SdkResult {
		self.record(SdkCall::Alias {
			to: to.to_string(),
			from: from.map(str::to_string),
		})
	}

	fn track(&self, event: &str, properties: &Properties) -> SdkResult {
		self.record(SdkCall::Track {
			event: event.to_string(),
			properties: properties.clone(),
		})
	}

	fn track_links(&self, query: &str, event: &str, properties: &Properties) -> SdkResult {
		self.record(SdkCall::TrackLinks {
			query: query.to_string(),
			event: event.to_string(),
			properties: properties.clone(),
		})
	}

	fn track_forms(&self, query: &str, event: &str, properties: &Properties) -> SdkResult {
		self.record(SdkCall::TrackForms {
			query: query.to_string(),
			event: event.to_string(),
			properties: properties.clone(),
		})
	}

	fn people(&self) -> &dyn People {
		self
	}

	fn has_config(&self) -> bool {
		self.loaded.load(Ordering::SeqCst)
	}

	fn get_distinct_id(&self) -> Option<String> {
		self.distinct_id.lock().clone()
	}

	fn get_property(&self, name: &str) -> Option<Value> {
		self.properties.lock().get(name).cloned()
	}
}
