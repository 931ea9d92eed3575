// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mapping between generic trait names and Mixpanel special properties.
//!
//! | Generic trait | Mixpanel property |
//! |---------------|-------------------|
//! | `created`     | `$created`        |
//! | `email`       | `$email`          |
//! | `firstName`   | `$first_name`     |
//! | `lastName`    | `$last_name`      |
//! | `lastSeen`    | `$last_seen`      |
//! | `name`        | `$name`           |
//! | `username`    | `$username`       |
//! | `phone`       | `$phone`          |

use beacon_analytics_core::{trait_spellings, Properties};

pub const TRAIT_ALIASES: [(&str, &str); 8] = [
	("created", "$created"),
	("email", "$email"),
	("firstName", "$first_name"),
	("lastName", "$last_name"),
	("lastSeen", "$last_seen"),
	("name", "$name"),
	("username", "$username"),
	("phone", "$phone"),
];

/// The Mixpanel name for a generic trait key, or the key itself.
///
/// Accepts every spelling identify aliases from, so `first_name` and
/// `createdAt` map the same as `firstName` and `created`.
pub fn map_trait(key: &str) -> &str {
	TRAIT_ALIASES
		.iter()
		.find(|(generic, _)| trait_spellings(generic).iter().any(|s| s == key))
		.map_or(key, |&(_, special)| special)
}

/// Maps every key of an allow-list through [`map_trait`].
pub fn map_keys<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
	keys.iter()
		.map(|key| map_trait(key.as_ref()).to_string())
		.collect()
}

/// The people allow-list used by identify: `configured` plus every
/// generic trait name, so special traits always reach the profile.
pub fn people_allow_list<S: AsRef<str>>(configured: &[S]) -> Vec<String> {
	let mut keys: Vec<String> = configured.iter().map(|k| k.as_ref().to_string()).collect();
	for (generic, _) in TRAIT_ALIASES {
		if !keys.iter().any(|k| k == generic) {
			keys.push(generic.to_string());
		}
	}
	keys
}

/// Selects the mapped allow-listed keys from already-aliased traits.
pub fn select_traits<S: AsRef<str>>(allow_list: &[S], traits: &Properties) -> Properties {
	traits.pick(map_keys(allow_list))
}

#[cfg(test)]
mod tests {
	use super::*;
	use beacon_analytics_core::Value;
	use proptest::prelude::*;

	#[test]
	fn test_map_trait_special_and_plain() {
		assert_eq!(map_trait("email"), "$email");
		assert_eq!(map_trait("firstName"), "$first_name");
		assert_eq!(map_trait("plan"), "plan");
		assert_eq!(map_trait("$email"), "$email");
	}

	#[test]
	fn test_map_trait_accepts_alternate_spellings() {
		assert_eq!(map_trait("first_name"), "$first_name");
		assert_eq!(map_trait("last_seen"), "$last_seen");
		assert_eq!(map_trait("createdAt"), "$created");
		assert_eq!(map_trait("created_at"), "$created");
	}

	#[test]
	fn test_people_allow_list_extends_with_generic_traits() {
		let list = people_allow_list(&["friend"]);
		assert_eq!(list[0], "friend");
		assert_eq!(list.len(), 1 + TRAIT_ALIASES.len());
		for (generic, _) in TRAIT_ALIASES {
			assert!(list.iter().any(|k| k == generic));
		}
	}

	#[test]
	fn test_people_allow_list_does_not_duplicate() {
		let list = people_allow_list(&["email"]);
		assert_eq!(list.len(), TRAIT_ALIASES.len());
	}

	#[test]
	fn test_select_traits_maps_before_picking() {
		let aliased = Properties::new()
			.insert("$email", "a@b.c")
			.insert("plan", "pro")
			.insert("other", 1);

		let selected = select_traits(&["email", "plan", "missing"], &aliased);

		assert_eq!(selected.get("$email"), Some(&Value::from("a@b.c")));
		assert_eq!(selected.get("plan"), Some(&Value::from("pro")));
		assert_eq!(selected.len(), 2);
	}

	proptest! {
		#[test]
		fn map_trait_is_identity_for_unknown_keys(key in "[a-z_]{1,12}") {
			prop_assume!(TRAIT_ALIASES
				.iter()
				.all(|(generic, _)| !trait_spellings(generic).contains(&key)));
			prop_assert_eq!(map_trait(&key), key.as_str());
		}
	}
}
