// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The call contract of the Mixpanel client SDK.
//!
//! The integration never talks to Mixpanel's transport directly; it drives
//! an implementation of [`MixpanelSdk`] injected at construction. Hosts
//! typically inject a [`CallQueue`](crate::CallQueue) until the real SDK
//! has loaded.

use beacon_analytics_core::{Properties, Value};

use crate::error::SdkError;

pub type SdkResult = std::result::Result<(), SdkError>;

/// The people (profile store) sub-object of the SDK.
pub trait People: Send + Sync {
	/// `mixpanel.people.set(props)`
	fn set(&self, properties: &Properties) -> SdkResult;
	/// `mixpanel.people.set(key, value)`
	fn set_one(&self, key: &str, value: &Value) -> SdkResult;
	/// `mixpanel.people.increment(event)`
	fn increment(&self, event: &str) -> SdkResult;
	/// `mixpanel.people.track_charge(amount)`
	fn track_charge(&self, amount: f64) -> SdkResult;
}

/// The top-level SDK handle.
pub trait MixpanelSdk: Send + Sync {
	fn init(&self, token: &str, options: &Properties) -> SdkResult;
	fn identify(&self, id: &str) -> SdkResult;
	fn name_tag(&self, tag: &str) -> SdkResult;
	fn register(&self, properties: &Properties) -> SdkResult;
	fn alias(&self, to: &str, from: Option<&str>) -> SdkResult;
	fn track(&self, event: &str, properties: &Properties) -> SdkResult;
	fn track_links(&self, query: &str, event: &str, properties: &Properties) -> SdkResult;
	fn track_forms(&self, query: &str, event: &str, properties: &Properties) -> SdkResult;

	fn people(&self) -> &dyn People;

	/// True once the SDK has loaded its configuration.
	fn has_config(&self) -> bool;

	/// `mixpanel.get_distinct_id()`, or `None` when the accessor is unavailable.
	fn get_distinct_id(&self) -> Option<String> {
		None
	}

	/// `mixpanel.get_property(name)`, or `None` when the accessor is unavailable.
	fn get_property(&self, _name: &str) -> Option<Value> {
		None
	}
}

/// One recorded SDK call with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkCall {
	Init { token: String, options: Properties },
	Identify(String),
	NameTag(String),
	Register(Properties),
	Alias { to: String, from: Option<String> },
	Track { event: String, properties: Properties },
	TrackLinks { query: String, event: String, properties: Properties },
	TrackForms { query: String, event: String, properties: Properties },
	PeopleSet(Properties),
	PeopleSetOne { key: String, value: Value },
	PeopleIncrement(String),
	PeopleTrackCharge(f64),
}

impl SdkCall {
	/// The SDK method name, as it appears in Mixpanel's API reference.
	pub fn method(&self) -> &'static str {
		match self {
			SdkCall::Init { .. } => "init",
			SdkCall::Identify(_) => "identify",
			SdkCall::NameTag(_) => "name_tag",
			SdkCall::Register(_) => "register",
			SdkCall::Alias { .. } => "alias",
			SdkCall::Track { .. } => "track",
			SdkCall::TrackLinks { .. } => "track_links",
			SdkCall::TrackForms { .. } => "track_forms",
			SdkCall::PeopleSet(_) | SdkCall::PeopleSetOne { .. } => "people.set",
			SdkCall::PeopleIncrement(_) => "people.increment",
			SdkCall::PeopleTrackCharge(_) => "people.track_charge",
		}
	}

	/// Issues this call against `sdk`.
	pub fn apply(&self, sdk: &dyn MixpanelSdk) -> SdkResult {
		match self {
			SdkCall::Init { token, options } => sdk.init(token, options),
			SdkCall::Identify(id) => sdk.identify(id),
			SdkCall::NameTag(tag) => sdk.name_tag(tag),
			SdkCall::Register(props) => sdk.register(props),
			SdkCall::Alias { to, from } => sdk.alias(to, from.as_deref()),
			SdkCall::Track { event, properties } => sdk.track(event, properties),
			SdkCall::TrackLinks {
				query,
				event,
				properties,
			} => sdk.track_links(query, event, properties),
			SdkCall::TrackForms {
				query,
				event,
				properties,
			} => sdk.track_forms(query, event, properties),
			SdkCall::PeopleSet(props) => sdk.people().set(props),
			SdkCall::PeopleSetOne { key, value } => sdk.people().set_one(key, value),
			SdkCall::PeopleIncrement(event) => sdk.people().increment(event),
			SdkCall::PeopleTrackCharge(amount) => sdk.people().track_charge(*amount),
		}
	}
}
