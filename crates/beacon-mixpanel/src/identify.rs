// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identify routing.
//!
//! Traits are aliased to Mixpanel special properties before anything is
//! sent. Super properties get ISO-8601 dates; people properties keep
//! native dates.

use beacon_analytics_core::IdentifyEvent;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::integration::{Mixpanel, NAME};
use crate::mapper::{people_allow_list, select_traits, TRAIT_ALIASES};

impl Mixpanel {
	/// Identifies the user and stores their traits.
	///
	/// With `setAllTraitsByDefault`, every trait is registered (and set on
	/// people when enabled). The allow-listed selections are sent
	/// independently, so overlapping keys may be sent twice.
	#[instrument(skip_all, fields(user_id = identify.user_id()))]
	pub fn identify(&self, identify: &IdentifyEvent) -> Result<()> {
		let sdk = self.sdk()?;
		let user_id = identify.user_id();
		let people = self.options.people;

		if let Some(id) = user_id {
			sdk.identify(id)?;
		}

		match identify.email().or(identify.username()).or(user_id) {
			Some(tag) => sdk.name_tag(tag)?,
			None => debug!("No email, username or id for name tag"),
		}

		let mut traits = identify.traits_with_aliases(&TRAIT_ALIASES);
		if traits.contains_key("$created") {
			traits.remove("createdAt");
			traits.remove("created_at");
		}

		if self.options.set_all_traits_by_default && !traits.is_empty() {
			sdk.register(&traits.clone().encode_dates())?;
			if people {
				sdk.people().set(&traits)?;
			}
		}

		let overrides = identify.options(NAME);

		let super_list = overrides
			.and_then(|o| o.super_properties.as_deref())
			.unwrap_or(self.options.super_properties.as_slice());
		let super_props = select_traits(super_list, &traits);
		if super_props.is_empty() {
			debug!("No allow-listed super properties");
		} else {
			sdk.register(&super_props.encode_dates())?;
		}

		if people {
			let people_list = people_allow_list(
				overrides
					.and_then(|o| o.people_properties.as_deref())
					.unwrap_or(self.options.people_properties.as_slice()),
			);
			let people_props = select_traits(people_list.as_slice(), &traits);
			if !people_props.is_empty() {
				sdk.people().set(&people_props)?;
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sdk::SdkCall;
	use crate::testing::{initialized, options};
	use beacon_analytics_core::{iso_string, IntegrationOverrides, Properties};
	use chrono::Utc;

	fn special_traits(date: chrono::DateTime<Utc>) -> Properties {
		Properties::new()
			.insert("created", date)
			.insert("email", "name@example.com")
			.insert("firstName", "first")
			.insert("lastName", "last")
			.insert("lastSeen", date)
			.insert("name", "name")
			.insert("username", "username")
			.insert("phone", "phone")
	}

	fn aliased_traits(date_value: impl Into<beacon_analytics_core::Value> + Clone) -> Properties {
		Properties::new()
			.insert("$created", date_value.clone())
			.insert("$email", "name@example.com")
			.insert("$first_name", "first")
			.insert("$last_name", "last")
			.insert("$last_seen", date_value)
			.insert("$name", "name")
			.insert("$username", "username")
			.insert("$phone", "phone")
	}

	#[test]
	fn sends_id_and_uses_it_as_name_tag() {
		let (mixpanel, sdk) = initialized(options());
		mixpanel.identify(&IdentifyEvent::new().with_user_id("id")).unwrap();

		assert_eq!(
			sdk.calls(),
			vec![
				SdkCall::Identify("id".to_string()),
				SdkCall::NameTag("id".to_string()),
			]
		);
	}

	#[test]
	fn sends_traits() {
		let (mixpanel, sdk) = initialized(options());
		mixpanel
			.identify(&IdentifyEvent::new().with_traits(Properties::new().insert("trait", true)))
			.unwrap();

		assert_eq!(
			sdk.calls_to("register"),
			vec![SdkCall::Register(Properties::new().insert("trait", true))]
		);
		assert!(sdk.calls_to("identify").is_empty());
	}

	#[test]
	fn prefers_username_then_email_for_name_tag() {
		let (mixpanel, sdk) = initialized(options());
		mixpanel
			.identify(
				&IdentifyEvent::new()
					.with_user_id("id")
					.with_traits(Properties::new().insert("username", "username")),
			)
			.unwrap();
		assert_eq!(sdk.calls_to("name_tag"), vec![SdkCall::NameTag("username".to_string())]);

		let (mixpanel, sdk) = initialized(options());
		mixpanel
			.identify(&IdentifyEvent::new().with_user_id("id").with_traits(
				Properties::new()
					.insert("username", "username")
					.insert("email", "name@example.com"),
			))
			.unwrap();
		assert_eq!(
			sdk.calls_to("name_tag"),
			vec![SdkCall::NameTag("name@example.com".to_string())]
		);
	}

	#[test]
	fn sends_traits_to_people() {
		let mut opts = options();
		opts.people = true;
		let (mixpanel, sdk) = initialized(opts);

		mixpanel
			.identify(&IdentifyEvent::new().with_traits(Properties::new().insert("trait", true)))
			.unwrap();

		assert_eq!(
			sdk.calls_to("people.set"),
			vec![SdkCall::PeopleSet(Properties::new().insert("trait", true))]
		);
	}

	#[test]
	fn aliases_traits_with_iso_dates_for_register() {
		let (mixpanel, sdk) = initialized(options());
		let date = Utc::now();

		mixpanel
			.identify(&IdentifyEvent::new().with_traits(special_traits(date)))
			.unwrap();

		assert_eq!(
			sdk.calls_to("register"),
			vec![SdkCall::Register(aliased_traits(iso_string(&date)))]
		);
	}

	#[test]
	fn aliases_traits_with_native_dates_for_people() {
		let mut opts = options();
		opts.people = true;
		let (mixpanel, sdk) = initialized(opts);
		let date = Utc::now();

		mixpanel
			.identify(&IdentifyEvent::new().with_traits(special_traits(date)))
			.unwrap();

		// once for all traits, once for the special-trait allow-list
		assert_eq!(
			sdk.calls_to("people.set"),
			vec![
				SdkCall::PeopleSet(aliased_traits(date)),
				SdkCall::PeopleSet(aliased_traits(date)),
			]
		);
	}

	#[test]
	fn removes_created_at_when_created_is_aliased() {
		let mut opts = options();
		opts.people = true;
		opts.set_all_traits_by_default = false;
		let (mixpanel, sdk) = initialized(opts);
		let date = Utc::now();

		mixpanel
			.identify(&IdentifyEvent::new().with_traits(
				Properties::new()
					.insert("created", date)
					.insert("createdAt", "2001-01-01")
					.insert("email", "name@example.com"),
			))
			.unwrap();

		assert_eq!(
			sdk.calls_to("people.set"),
			vec![SdkCall::PeopleSet(
				Properties::new()
					.insert("$created", date)
					.insert("$email", "name@example.com")
			)]
		);
	}

	#[test]
	fn sets_only_listed_super_properties_when_not_setting_all() {
		let mut opts = options();
		opts.set_all_traits_by_default = false;
		opts.people = true;
		let (mixpanel, sdk) = initialized(opts);

		mixpanel
			.identify(
				&IdentifyEvent::new()
					.with_user_id("123")
					.with_traits(
						Properties::new()
							.insert("accountStatus", "Paid")
							.insert("subscribed", true),
					)
					.with_integration(NAME, IntegrationOverrides::new().with_super_properties(["accountStatus"])),
			)
			.unwrap();

		assert_eq!(sdk.calls_to("identify"), vec![SdkCall::Identify("123".to_string())]);
		assert_eq!(
			sdk.calls_to("register"),
			vec![SdkCall::Register(Properties::new().insert("accountStatus", "Paid"))]
		);
	}

	#[test]
	fn configured_super_properties_are_mapped_to_special_keys() {
		let mut opts = options();
		opts.set_all_traits_by_default = false;
		opts.super_properties = vec!["email".to_string()];
		let (mixpanel, sdk) = initialized(opts);

		mixpanel
			.identify(&IdentifyEvent::new().with_traits(
				Properties::new()
					.insert("email", "name@example.com")
					.insert("plan", "pro"),
			))
			.unwrap();

		assert_eq!(
			sdk.calls_to("register"),
			vec![SdkCall::Register(Properties::new().insert("$email", "name@example.com"))]
		);
	}

	#[test]
	fn allow_list_accepts_traits_as_spelled_by_host() {
		let mut opts = options();
		opts.set_all_traits_by_default = false;
		let (mixpanel, sdk) = initialized(opts);

		mixpanel
			.identify(
				&IdentifyEvent::new()
					.with_traits(
						Properties::new()
							.insert("first_name", "Ada")
							.insert("createdAt", "2020-01-01")
							.insert("plan", "pro"),
					)
					.with_integration(
						NAME,
						IntegrationOverrides::new().with_super_properties(["first_name", "createdAt"]),
					),
			)
			.unwrap();

		assert_eq!(
			sdk.calls_to("register"),
			vec![SdkCall::Register(
				Properties::new()
					.insert("$created", "2020-01-01")
					.insert("$first_name", "Ada")
			)]
		);
	}

	#[test]
	fn people_properties_require_people_option() {
		let mut opts = options();
		opts.set_all_traits_by_default = false;
		let (mixpanel, sdk) = initialized(opts);

		mixpanel
			.identify(
				&IdentifyEvent::new()
					.with_user_id("123")
					.with_traits(Properties::new().insert("friend", "elmo"))
					.with_integration(NAME, IntegrationOverrides::new().with_people_properties(["friend"])),
			)
			.unwrap();

		assert!(sdk.calls_to("people.set").is_empty());
	}

	#[test]
	fn people_properties_from_override() {
		let mut opts = options();
		opts.set_all_traits_by_default = false;
		opts.people = true;
		let (mixpanel, sdk) = initialized(opts);

		mixpanel
			.identify(
				&IdentifyEvent::new()
					.with_user_id("123")
					.with_traits(
						Properties::new()
							.insert("friend", "elmo")
							.insert("enemy", "oscar"),
					)
					.with_integration(NAME, IntegrationOverrides::new().with_people_properties(["friend"])),
			)
			.unwrap();

		assert_eq!(
			sdk.calls_to("people.set"),
			vec![SdkCall::PeopleSet(Properties::new().insert("friend", "elmo"))]
		);
	}

	#[test]
	fn nothing_registered_without_traits_or_lists() {
		let mut opts = options();
		opts.set_all_traits_by_default = false;
		let (mixpanel, sdk) = initialized(opts);

		mixpanel
			.identify(
				&IdentifyEvent::new()
					.with_user_id("123")
					.with_traits(Properties::new().insert("friend", "elmo")),
			)
			.unwrap();

		assert!(sdk.calls_to("register").is_empty());
		assert!(sdk.calls_to("people.set").is_empty());
	}
}
