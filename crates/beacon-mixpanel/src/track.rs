// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Track routing.

use beacon_analytics_core::{Properties, TrackEvent, Value};
use chrono::Utc;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::integration::{Mixpanel, NAME};
use crate::reserved::strip_reserved;

const LINK_QUERY: &str = "link_query";
const FORM_QUERY: &str = "form_query";

impl Mixpanel {
	/// Sends a track event.
	///
	/// Super and people selections use the raw property keys; trait
	/// aliasing never applies to track properties. Reserved keys and
	/// `revenue` are removed from the forwarded properties. A `link_query`
	/// or `form_query` property routes the event to `track_links` or
	/// `track_forms` instead of `track`.
	#[instrument(skip_all, fields(event = %track.event()))]
	pub fn track(&self, track: &TrackEvent) -> Result<()> {
		let sdk = self.sdk()?;
		let event = track.event();
		let revenue = track.revenue();
		let overrides = track.options(NAME);
		let mut props = track.properties().clone();

		let super_list = overrides
			.and_then(|o| o.super_properties.as_deref())
			.unwrap_or(self.options.super_properties.as_slice());
		let super_props = props.pick(super_list);

		let people_list = overrides
			.and_then(|o| o.people_properties.as_deref())
			.unwrap_or(self.options.people_properties.as_slice());
		let people_props = props.pick(people_list);

		strip_reserved(&mut props);
		props.remove("revenue");

		if self.options.people && self.options.is_increment(event) {
			debug!("Incrementing people counter");
			sdk.people().increment(event)?;
			sdk.people()
				.set_one(&format!("Last {event}"), &Value::Date(Utc::now()))?;
		}

		let mut props = props.encode_dates();
		if let Some(query) = take_query(&mut props, LINK_QUERY) {
			sdk.track_links(&query, event, &props)?;
		} else if let Some(query) = take_query(&mut props, FORM_QUERY) {
			sdk.track_forms(&query, event, &props)?;
		} else {
			sdk.track(event, &props)?;
		}

		if !super_props.is_empty() {
			sdk.register(&super_props.encode_dates())?;
		}

		if self.options.people && !people_props.is_empty() {
			sdk.people().set(&people_props)?;
		}

		match revenue {
			Some(amount) if amount != 0.0 && self.options.people => {
				sdk.people().track_charge(amount)?;
			}
			Some(_) => debug!("Skipping charge, people disabled or zero revenue"),
			None => {}
		}

		Ok(())
	}
}

/// Removes and returns `key` when it holds a string selector. Any other
/// value is left in place and forwarded as an ordinary property.
fn take_query(props: &mut Properties, key: &str) -> Option<String> {
	let query = props.get(key).and_then(Value::as_str)?.to_string();
	props.remove(key);
	Some(query)
}
