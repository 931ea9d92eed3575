// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Alias routing.

use beacon_analytics_core::AliasEvent;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::integration::Mixpanel;

/// Internal Mixpanel property holding the distinct id a people profile
/// was merged under.
const PEOPLE_DISTINCT_ID: &str = "$people_distinct_id";

impl Mixpanel {
	/// Aliases `to` to the current (or given `from`) identity.
	///
	/// Skipped when the SDK already reports `to` as its distinct id or as
	/// the profile's merged distinct id.
	#[instrument(skip_all, fields(to = alias.to()))]
	pub fn alias(&self, alias: &AliasEvent) -> Result<()> {
		let sdk = self.sdk()?;
		let to = alias.to();

		if sdk.get_distinct_id().as_deref() == Some(to) {
			debug!("Target is already the current distinct id, skipping alias");
			return Ok(());
		}

		let people_id = sdk.get_property(PEOPLE_DISTINCT_ID);
		if people_id.as_ref().and_then(|v| v.as_str()) == Some(to) {
			debug!("Target is already the people distinct id, skipping alias");
			return Ok(());
		}

		sdk.alias(to, alias.from())?;
		Ok(())
	}
}
