// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property names Mixpanel interprets itself and that must not be sent
//! from user-supplied track properties.

use beacon_analytics_core::Properties;

pub const RESERVED_PROPERTIES: [&str; 5] = ["distinct_id", "ip", "mp_name_tag", "mp_note", "token"];

/// Deletes every reserved key from `properties`.
pub fn strip_reserved(properties: &mut Properties) {
	for key in RESERVED_PROPERTIES {
		properties.remove(key);
	}
}
