// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Generic page, identify, track and alias events.
//!
//! Hosts build these once and hand them to every configured integration.
//! Each event may carry per-integration [`IntegrationOverrides`], keyed by
//! integration name, that replace the integration's configured allow-lists
//! for that single call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::properties::Properties;
use crate::value::Value;

/// Per-call overrides for one integration.
///
/// A `None` list falls back to the integration's configured list; an empty
/// list is an explicit "select nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationOverrides {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub super_properties: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub people_properties: Option<Vec<String>>,
}

impl IntegrationOverrides {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_super_properties<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.super_properties = Some(keys.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_people_properties<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.people_properties = Some(keys.into_iter().map(Into::into).collect());
		self
	}
}

/// Overrides keyed by integration name.
pub type IntegrationMap = BTreeMap<String, IntegrationOverrides>;

/// A page view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageEvent {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub properties: Properties,
	#[serde(default)]
	pub integrations: IntegrationMap,
}

impl PageEvent {
	/// Creates an anonymous page view with no name or category.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	pub fn with_properties(mut self, properties: Properties) -> Self {
		self.properties = properties;
		self
	}

	pub fn with_integration(mut self, name: impl Into<String>, overrides: IntegrationOverrides) -> Self {
		self.integrations.insert(name.into(), overrides);
		self
	}

	pub fn name(&self) -> Option<&str> {
		non_empty(self.name.as_deref())
	}

	pub fn category(&self) -> Option<&str> {
		non_empty(self.category.as_deref())
	}

	/// "Category Name" when both are set, otherwise whichever one is set.
	pub fn full_name(&self) -> Option<String> {
		match (self.category(), self.name()) {
			(Some(category), Some(name)) => Some(format!("{category} {name}")),
			(None, Some(name)) => Some(name.to_string()),
			(Some(category), None) => Some(category.to_string()),
			(None, None) => None,
		}
	}

	/// Page properties plus `name` and `category` when present.
	pub fn properties(&self) -> Properties {
		let mut props = self.properties.clone();
		if let Some(name) = self.name() {
			props.set("name", name);
		}
		if let Some(category) = self.category() {
			props.set("category", category);
		}
		props
	}

	/// Builds the track event that records this page view.
	///
	/// With a label the event is named `Viewed <label> Page`, otherwise
	/// `Loaded a Page`.
	pub fn track(&self, label: Option<&str>) -> TrackEvent {
		let event = match label {
			Some(label) => format!("Viewed {label} Page"),
			None => "Loaded a Page".to_string(),
		};
		TrackEvent {
			event,
			properties: self.properties(),
			integrations: self.integrations.clone(),
		}
	}
}

/// An identify call: who the user is and what we know about them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentifyEvent {
	#[serde(default, rename = "userId")]
	pub user_id: Option<String>,
	#[serde(default)]
	pub traits: Properties,
	#[serde(default)]
	pub integrations: IntegrationMap,
}

impl IdentifyEvent {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	pub fn with_traits(mut self, traits: Properties) -> Self {
		self.traits = traits;
		self
	}

	pub fn with_integration(mut self, name: impl Into<String>, overrides: IntegrationOverrides) -> Self {
		self.integrations.insert(name.into(), overrides);
		self
	}

	pub fn user_id(&self) -> Option<&str> {
		non_empty(self.user_id.as_deref())
	}

	pub fn email(&self) -> Option<&str> {
		self.string_trait("email")
	}

	pub fn username(&self) -> Option<&str> {
		self.string_trait("username")
	}

	/// The raw traits as supplied by the host.
	pub fn traits(&self) -> &Properties {
		&self.traits
	}

	/// Overrides for the named integration, if the host supplied any.
	pub fn options(&self, integration: &str) -> Option<&IntegrationOverrides> {
		self.integrations.get(integration)
	}

	/// Returns the traits with generic keys renamed per `aliases`.
	///
	/// Each generic key also matches its snake_case spelling, and `created`
	/// additionally matches `createdAt`. Null values are left unaliased.
	pub fn traits_with_aliases(&self, aliases: &[(&str, &str)]) -> Properties {
		let mut traits = self.traits.clone();
		for (generic, special) in aliases {
			let source = trait_spellings(generic)
				.into_iter()
				.find(|key| traits.get(key).is_some_and(|v| !v.is_null()));
			if let Some(source) = source {
				if let Some(value) = traits.remove(&source) {
					traits.set(*special, value);
				}
			}
		}
		traits
	}

	fn string_trait(&self, key: &str) -> Option<&str> {
		non_empty(self.traits.get(key).and_then(Value::as_str))
	}
}

/// A named user action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
	pub event: String,
	#[serde(default)]
	pub properties: Properties,
	#[serde(default)]
	pub integrations: IntegrationMap,
}

impl TrackEvent {
	pub fn new(event: impl Into<String>) -> Self {
		Self {
			event: event.into(),
			..Self::default()
		}
	}

	pub fn with_properties(mut self, properties: Properties) -> Self {
		self.properties = properties;
		self
	}

	pub fn with_integration(mut self, name: impl Into<String>, overrides: IntegrationOverrides) -> Self {
		self.integrations.insert(name.into(), overrides);
		self
	}

	pub fn event(&self) -> &str {
		&self.event
	}

	pub fn properties(&self) -> &Properties {
		&self.properties
	}

	pub fn options(&self, integration: &str) -> Option<&IntegrationOverrides> {
		self.integrations.get(integration)
	}

	/// Revenue derived from the `revenue` property.
	///
	/// Accepts a number or a numeric string with an optional leading `$`.
	pub fn revenue(&self) -> Option<f64> {
		match self.properties.get("revenue")? {
			Value::Number(n) => n.as_f64(),
			Value::String(s) => s.trim().trim_start_matches('$').parse().ok(),
			_ => None,
		}
	}
}

/// Links a new identity to a previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEvent {
	pub to: String,
	#[serde(default)]
	pub from: Option<String>,
}

impl AliasEvent {
	pub fn new(to: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			from: None,
		}
	}

	pub fn with_from(mut self, from: impl Into<String>) -> Self {
		self.from = Some(from.into());
		self
	}

	pub fn to(&self) -> &str {
		&self.to
	}

	pub fn from(&self) -> Option<&str> {
		non_empty(self.from.as_deref())
	}
}

fn non_empty(s: Option<&str>) -> Option<&str> {
	s.filter(|s| !s.is_empty())
}

/// Every key a generic trait may arrive under: the key itself, its
/// snake_case spelling, and for `created` also `createdAt` / `created_at`.
pub fn trait_spellings(key: &str) -> Vec<String> {
	let mut spellings = vec![key.to_string()];
	let snake = snake_case(key);
	if snake != key {
		spellings.push(snake);
	}
	if key == "created" {
		spellings.push("createdAt".to_string());
		spellings.push("created_at".to_string());
	}
	spellings
}

fn snake_case(key: &str) -> String {
	let mut out = String::with_capacity(key.len() + 4);
	for c in key.chars() {
		if c.is_ascii_uppercase() {
			out.push('_');
			out.push(c.to_ascii_lowercase());
		} else {
			out.push(c);
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use proptest::prelude::*;

	const ALIASES: [(&str, &str); 3] = [
		("created", "$created"),
		("email", "$email"),
		("firstName", "$first_name"),
	];

	#[test]
	fn page_full_name_combines_category_and_name() {
		let page = PageEvent::new().with_category("Docs").with_name("Install");
		assert_eq!(page.full_name().as_deref(), Some("Docs Install"));
	}

	#[test]
	fn page_full_name_single_part() {
		assert_eq!(PageEvent::new().with_name("Home").full_name().as_deref(), Some("Home"));
		assert_eq!(PageEvent::new().with_category("Docs").full_name().as_deref(), Some("Docs"));
		assert_eq!(PageEvent::new().full_name(), None);
	}

	#[test]
	fn page_track_labels() {
		let page = PageEvent::new().with_name("Home");
		assert_eq!(page.track(None).event(), "Loaded a Page");
		assert_eq!(page.track(Some("Home")).event(), "Viewed Home Page");
	}

	#[test]
	fn page_track_carries_properties_and_overrides() {
		let page = PageEvent::new()
			.with_category("Docs")
			.with_name("Install")
			.with_properties(Properties::new().insert("path", "/docs/install"))
			.with_integration("Mixpanel", IntegrationOverrides::new().with_super_properties(["path"]));

		let track = page.track(Some("Docs"));

		assert_eq!(track.properties().get("path"), Some(&Value::from("/docs/install")));
		assert_eq!(track.properties().get("name"), Some(&Value::from("Install")));
		assert_eq!(track.properties().get("category"), Some(&Value::from("Docs")));
		assert!(track.options("Mixpanel").is_some());
	}

	#[test]
	fn identify_empty_strings_are_absent() {
		let identify = IdentifyEvent::new()
			.with_user_id("")
			.with_traits(Properties::new().insert("email", ""));
		assert_eq!(identify.user_id(), None);
		assert_eq!(identify.email(), None);
	}

	#[test]
	fn identify_traits_with_aliases_renames_and_removes() {
		let identify = IdentifyEvent::new().with_traits(
			Properties::new()
				.insert("email", "name@example.com")
				.insert("plan", "pro"),
		);

		let traits = identify.traits_with_aliases(&ALIASES);

		assert_eq!(traits.get("$email"), Some(&Value::from("name@example.com")));
		assert_eq!(traits.get("plan"), Some(&Value::from("pro")));
		assert!(!traits.contains_key("email"));
	}

	#[test]
	fn identify_traits_with_aliases_accepts_snake_case() {
		let identify =
			IdentifyEvent::new().with_traits(Properties::new().insert("first_name", "Ada"));
		let traits = identify.traits_with_aliases(&ALIASES);
		assert_eq!(traits.get("$first_name"), Some(&Value::from("Ada")));
		assert!(!traits.contains_key("first_name"));
	}

	#[test]
	fn identify_created_resolves_from_created_at() {
		let now = Utc::now();
		let identify = IdentifyEvent::new().with_traits(Properties::new().insert("created_at", now));
		let traits = identify.traits_with_aliases(&ALIASES);
		assert_eq!(traits.get("$created"), Some(&Value::Date(now)));
		assert!(!traits.contains_key("created_at"));
	}

	#[test]
	fn identify_null_trait_is_not_aliased() {
		let identify =
			IdentifyEvent::new().with_traits(Properties::new().insert("email", Value::Null));
		let traits = identify.traits_with_aliases(&ALIASES);
		assert!(traits.contains_key("email"));
		assert!(!traits.contains_key("$email"));
	}

	#[test]
	fn track_revenue_from_number_and_string() {
		let track = TrackEvent::new("purchase").with_properties(Properties::new().insert("revenue", 9.99));
		assert_eq!(track.revenue(), Some(9.99));

		let track = TrackEvent::new("purchase").with_properties(Properties::new().insert("revenue", "$12.50"));
		assert_eq!(track.revenue(), Some(12.5));

		let track = TrackEvent::new("purchase").with_properties(Properties::new().insert("revenue", "lots"));
		assert_eq!(track.revenue(), None);

		assert_eq!(TrackEvent::new("purchase").revenue(), None);
	}

	#[test]
	fn events_deserialize_from_host_json() {
		let track: TrackEvent = serde_json::from_value(serde_json::json!({
			"event": "Signed Up",
			"properties": {"plan": "pro"},
			"integrations": {"Mixpanel": {"superProperties": ["plan"]}}
		}))
		.unwrap();

		assert_eq!(track.event(), "Signed Up");
		assert_eq!(
			track.options("Mixpanel").and_then(|o| o.super_properties.clone()),
			Some(vec!["plan".to_string()])
		);

		let identify: IdentifyEvent =
			serde_json::from_value(serde_json::json!({"userId": "u1", "traits": {"a": 1}})).unwrap();
		assert_eq!(identify.user_id(), Some("u1"));
	}

	#[test]
	fn alias_from_is_optional() {
		assert_eq!(AliasEvent::new("new").from(), None);
		assert_eq!(AliasEvent::new("new").with_from("old").from(), Some("old"));
	}

	proptest! {
		#[test]
		fn snake_case_has_no_uppercase(key in "[a-zA-Z]{1,20}") {
			let snake = snake_case(&key);
			prop_assert!(!snake.chars().any(|c| c.is_ascii_uppercase()));
		}
	}
}
