// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Option sources: defaults, TOML files, host settings and the environment.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::OptionsError;
use crate::options::{MixpanelOptions, MixpanelOptionsLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	HostSettings = 30,
	Environment = 50,
}

/// A place options can be read from.
pub trait OptionsSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<MixpanelOptionsLayer, OptionsError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl OptionsSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<MixpanelOptionsLayer, OptionsError> {
		Ok(MixpanelOptionsLayer::default())
	}
}

/// TOML file source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl OptionsSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<MixpanelOptionsLayer, OptionsError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "options file not found, skipping");
			return Ok(MixpanelOptionsLayer::default());
		}

		debug!(path = %self.path.display(), "loading options file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| OptionsError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: MixpanelOptionsLayer =
			toml::from_str(&content).map_err(|e| OptionsError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed options layer from TOML");
		Ok(layer)
	}
}

/// The settings object the host hands to the integration.
pub struct SettingsSource {
	settings: serde_json::Value,
}

impl SettingsSource {
	pub fn new(settings: serde_json::Value) -> Self {
		Self { settings }
	}
}

impl OptionsSource for SettingsSource {
	fn name(&self) -> &'static str {
		"host-settings"
	}

	fn precedence(&self) -> Precedence {
		Precedence::HostSettings
	}

	fn load(&self) -> Result<MixpanelOptionsLayer, OptionsError> {
		Ok(serde_json::from_value(self.settings.clone())?)
	}
}

/// Environment variable source.
///
/// Convention: BEACON_MIXPANEL_<FIELD>
pub struct EnvSource;

impl OptionsSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<MixpanelOptionsLayer, OptionsError> {
		Ok(MixpanelOptionsLayer {
			token: env_var("BEACON_MIXPANEL_TOKEN"),
			people: env_bool("BEACON_MIXPANEL_PEOPLE")?,
			persistence: env_var("BEACON_MIXPANEL_PERSISTENCE"),
			..Default::default()
		})
	}
}

/// Merges `sources` in precedence order and finalizes the result.
pub fn load_options(
	mut sources: Vec<Box<dyn OptionsSource>>,
) -> Result<MixpanelOptions, OptionsError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = MixpanelOptionsLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading options source");
		merged.merge(source.load()?);
	}

	Ok(merged.finalize())
}

/// Loads options with the standard precedence: defaults, then the TOML
/// file at `path`, then host `settings`, then the environment.
pub fn load_options_with_file(
	path: impl Into<PathBuf>,
	settings: serde_json::Value,
) -> Result<MixpanelOptions, OptionsError> {
	load_options(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(path)),
		Box::new(SettingsSource::new(settings)),
		Box::new(EnvSource),
	])
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Result<Option<bool>, OptionsError> {
	match env_var(name) {
		Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => Ok(Some(true)),
		Some(v) if v == "0" || v.eq_ignore_ascii_case("false") => Ok(Some(false)),
		Some(v) => Err(OptionsError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid bool value '{v}'"),
		}),
		None => Ok(None),
	}
}
