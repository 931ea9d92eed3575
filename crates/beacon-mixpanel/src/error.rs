// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Mixpanel integration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating integration options.
#[derive(Debug, Error)]
pub enum OptionsError {
	#[error("failed to read options file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse options file {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("invalid host settings: {0}")]
	JsonParse(#[from] serde_json::Error),

	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	#[error("options validation failed: {0}")]
	Validation(String),
}

/// A failure reported by the vendor SDK for one call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("mixpanel.{call} failed: {message}")]
pub struct SdkError {
	pub call: &'static str,
	pub message: String,
}

impl SdkError {
	pub fn new(call: &'static str, message: impl Into<String>) -> Self {
		Self {
			call,
			message: message.into(),
		}
	}
}

/// Mixpanel integration errors.
#[derive(Debug, Error)]
pub enum MixpanelError {
	/// Options were missing or invalid at construction.
	#[error(transparent)]
	Options(#[from] OptionsError),

	/// An event was routed before `initialize` installed the SDK handle.
	#[error("mixpanel is not initialized")]
	NotInitialized,

	/// The vendor SDK rejected a call. Propagated as-is, never retried.
	#[error(transparent)]
	Sdk(#[from] SdkError),
}

/// Result type alias for Mixpanel integration operations.
pub type Result<T> = std::result::Result<T, MixpanelError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sdk_error_display_names_call() {
		let err = SdkError::new("track", "stub missing");
		assert_eq!(err.to_string(), "mixpanel.track failed: stub missing");
	}

	#[test]
	fn test_sdk_error_is_transparent() {
		let err = MixpanelError::from(SdkError::new("alias", "boom"));
		assert_eq!(err.to_string(), "mixpanel.alias failed: boom");
	}

	#[test]
	fn test_validation_error_display() {
		let err = MixpanelError::from(OptionsError::Validation("token is required".to_string()));
		assert_eq!(err.to_string(), "options validation failed: token is required");
	}
}
