// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration options.
//!
//! Options arrive as a partially-filled [`MixpanelOptionsLayer`] (host
//! settings, a TOML file, the environment) and are finalized into a fully
//! defaulted [`MixpanelOptions`]. Option names follow the host's camelCase
//! settings keys.

use beacon_analytics_core::Properties;
use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Options renamed on their way into `mixpanel.init`.
pub const OPTION_ALIASES: [(&str, &str); 3] = [
	("cookieName", "cookie_name"),
	("crossSubdomainCookie", "cross_subdomain_cookie"),
	("secureCookie", "secure_cookie"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MixpanelOptionsLayer {
	pub token: Option<String>,
	pub increments: Option<Vec<String>>,
	pub people_properties: Option<Vec<String>>,
	pub super_properties: Option<Vec<String>>,
	pub people: Option<bool>,
	pub set_all_traits_by_default: Option<bool>,
	pub track_all_pages: Option<bool>,
	pub track_named_pages: Option<bool>,
	pub track_categorized_pages: Option<bool>,
	pub consolidated_page_calls: Option<bool>,
	pub cookie_name: Option<String>,
	pub cross_subdomain_cookie: Option<bool>,
	pub secure_cookie: Option<bool>,
	pub persistence: Option<String>,
	pub name_tag: Option<bool>,
	pub pageview: Option<bool>,
}

impl MixpanelOptionsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.token.is_some() {
			self.token = other.token;
		}
		if other.increments.is_some() {
			self.increments = other.increments;
		}
		if other.people_properties.is_some() {
			self.people_properties = other.people_properties;
		}
		if other.super_properties.is_some() {
			self.super_properties = other.super_properties;
		}
		if other.people.is_some() {
			self.people = other.people;
		}
		if other.set_all_traits_by_default.is_some() {
			self.set_all_traits_by_default = other.set_all_traits_by_default;
		}
		if other.track_all_pages.is_some() {
			self.track_all_pages = other.track_all_pages;
		}
		if other.track_named_pages.is_some() {
			self.track_named_pages = other.track_named_pages;
		}
		if other.track_categorized_pages.is_some() {
			self.track_categorized_pages = other.track_categorized_pages;
		}
		if other.consolidated_page_calls.is_some() {
			self.consolidated_page_calls = other.consolidated_page_calls;
		}
		if other.cookie_name.is_some() {
			self.cookie_name = other.cookie_name;
		}
		if other.cross_subdomain_cookie.is_some() {
			self.cross_subdomain_cookie = other.cross_subdomain_cookie;
		}
		if other.secure_cookie.is_some() {
			self.secure_cookie = other.secure_cookie;
		}
		if other.persistence.is_some() {
			self.persistence = other.persistence;
		}
		if other.name_tag.is_some() {
			self.name_tag = other.name_tag;
		}
		if other.pageview.is_some() {
			self.pageview = other.pageview;
		}
	}

	pub fn finalize(self) -> MixpanelOptions {
		let defaults = MixpanelOptions::default();
		MixpanelOptions {
			token: self.token.unwrap_or(defaults.token),
			increments: self.increments.unwrap_or(defaults.increments),
			people_properties: self.people_properties.unwrap_or(defaults.people_properties),
			super_properties: self.super_properties.unwrap_or(defaults.super_properties),
			people: self.people.unwrap_or(defaults.people),
			set_all_traits_by_default: self
				.set_all_traits_by_default
				.unwrap_or(defaults.set_all_traits_by_default),
			track_all_pages: self.track_all_pages.unwrap_or(defaults.track_all_pages),
			track_named_pages: self.track_named_pages.unwrap_or(defaults.track_named_pages),
			track_categorized_pages: self
				.track_categorized_pages
				.unwrap_or(defaults.track_categorized_pages),
			consolidated_page_calls: self
				.consolidated_page_calls
				.unwrap_or(defaults.consolidated_page_calls),
			cookie_name: self.cookie_name.unwrap_or(defaults.cookie_name),
			cross_subdomain_cookie: self
				.cross_subdomain_cookie
				.unwrap_or(defaults.cross_subdomain_cookie),
			secure_cookie: self.secure_cookie.unwrap_or(defaults.secure_cookie),
			persistence: self.persistence.unwrap_or(defaults.persistence),
			name_tag: self.name_tag.unwrap_or(defaults.name_tag),
			pageview: self.pageview.unwrap_or(defaults.pageview),
		}
	}
}

/// Fully resolved Mixpanel options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MixpanelOptions {
	/// Project token passed to `mixpanel.init`.
	pub token: String,
	/// Event names that also bump a people counter. Compared case-insensitively.
	pub increments: Vec<String>,
	/// Keys to also store on the people profile.
	pub people_properties: Vec<String>,
	/// Keys to also register as super properties.
	pub super_properties: Vec<String>,
	/// Master switch for every people (profile store) call.
	pub people: bool,
	/// Register every identify trait, and set it on people when enabled.
	pub set_all_traits_by_default: bool,
	pub track_all_pages: bool,
	pub track_named_pages: bool,
	pub track_categorized_pages: bool,
	/// Track every page view as one `Loaded a Page` event.
	pub consolidated_page_calls: bool,
	pub cookie_name: String,
	pub cross_subdomain_cookie: bool,
	pub secure_cookie: bool,
	pub persistence: String,
	pub name_tag: bool,
	pub pageview: bool,
}

impl Default for MixpanelOptions {
	fn default() -> Self {
		Self {
			token: String::new(),
			increments: Vec::new(),
			people_properties: Vec::new(),
			super_properties: Vec::new(),
			people: false,
			set_all_traits_by_default: true,
			track_all_pages: false,
			track_named_pages: true,
			track_categorized_pages: true,
			consolidated_page_calls: true,
			cookie_name: String::new(),
			cross_subdomain_cookie: false,
			secure_cookie: false,
			persistence: "cookie".to_string(),
			name_tag: true,
			pageview: false,
		}
	}
}

impl MixpanelOptions {
	/// Creates default options for the given project token.
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			token: token.into(),
			..Self::default()
		}
	}

	/// Finalizes options from a host settings object.
	///
	/// Unknown keys are ignored so hosts can share one settings object
	/// across integrations.
	pub fn from_settings(settings: serde_json::Value) -> Result<Self, OptionsError> {
		let layer: MixpanelOptionsLayer = serde_json::from_value(settings)?;
		Ok(layer.finalize())
	}

	/// Checks the options are usable.
	pub fn validate(&self) -> Result<(), OptionsError> {
		if self.token.trim().is_empty() {
			return Err(OptionsError::Validation("token is required".to_string()));
		}

		let lists = [
			("increments", &self.increments),
			("peopleProperties", &self.people_properties),
			("superProperties", &self.super_properties),
		];
		for (name, list) in lists {
			if list.iter().any(|entry| entry.trim().is_empty()) {
				return Err(OptionsError::InvalidValue {
					key: name.to_string(),
					message: "entries must not be empty".to_string(),
				});
			}
		}

		Ok(())
	}

	/// Builds the `mixpanel.init` options map, with [`OPTION_ALIASES`] applied.
	pub fn init_payload(&self) -> Result<Properties, OptionsError> {
		let settings = serde_json::to_value(self)?;
		Ok(Properties::from(settings).rename_keys(&OPTION_ALIASES))
	}

	pub(crate) fn lowercase_increments(&mut self) {
		for increment in &mut self.increments {
			*increment = increment.to_lowercase();
		}
	}

	/// Whether `event` is a configured increment. Expects lowercased increments.
	pub(crate) fn is_increment(&self, event: &str) -> bool {
		let event = event.to_lowercase();
		self.increments.contains(&event)
	}
}
