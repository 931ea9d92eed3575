// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The Mixpanel integration: construction, initialization and readiness.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{MixpanelError, Result};
use crate::host::IntegrationHost;
use crate::options::MixpanelOptions;
use crate::sdk::MixpanelSdk;

/// Integration name, used for host lifecycle calls and per-event overrides.
pub const NAME: &str = "Mixpanel";

/// Translates generic analytics events into Mixpanel SDK calls.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use beacon_analytics_core::TrackEvent;
/// use beacon_mixpanel::{CallQueue, IntegrationHost, Mixpanel, MixpanelOptions, ReadyCallback};
///
/// struct Host;
///
/// impl IntegrationHost for Host {
///     fn load(&self, _integration: &str, on_loaded: ReadyCallback) {
///         on_loaded();
///     }
///     fn ready(&self, _integration: &str) {}
/// }
///
/// let sdk = Arc::new(CallQueue::new());
/// let mut mixpanel = Mixpanel::new(MixpanelOptions::new("token"), sdk.clone(), Arc::new(Host))?;
/// mixpanel.initialize()?;
/// mixpanel.track(&TrackEvent::new("Signed Up"))?;
///
/// assert_eq!(sdk.calls_to("track").len(), 1);
/// # Ok::<(), beacon_mixpanel::MixpanelError>(())
/// ```
pub struct Mixpanel {
	pub(crate) options: MixpanelOptions,
	sdk: Arc<dyn MixpanelSdk>,
	host: Arc<dyn IntegrationHost>,
	initialized: bool,
}

impl Mixpanel {
	/// Creates the integration after validating `options`.
	pub fn new(
		options: MixpanelOptions,
		sdk: Arc<dyn MixpanelSdk>,
		host: Arc<dyn IntegrationHost>,
	) -> Result<Self> {
		options.validate()?;
		Ok(Self {
			options,
			sdk,
			host,
			initialized: false,
		})
	}

	pub fn name(&self) -> &'static str {
		NAME
	}

	pub fn options(&self) -> &MixpanelOptions {
		&self.options
	}

	/// Installs the SDK handle, calls `mixpanel.init` and asks the host to
	/// load the SDK. Calls made before the load completes are buffered by
	/// the injected SDK handle.
	///
	/// A second call logs a warning and does nothing. If `init` fails the
	/// integration stays uninitialized and `initialize` may be retried.
	#[instrument(skip(self), fields(integration = NAME))]
	pub fn initialize(&mut self) -> Result<()> {
		if self.initialized {
			warn!("Mixpanel already initialized, ignoring");
			return Ok(());
		}

		self.options.lowercase_increments();
		let init_options = self.options.init_payload()?;

		info!(
			people = self.options.people,
			increments = self.options.increments.len(),
			persistence = %self.options.persistence,
			"Initializing Mixpanel"
		);
		self.sdk.init(&self.options.token, &init_options)?;
		self.initialized = true;

		let host = Arc::clone(&self.host);
		self.host.load(NAME, Box::new(move || host.ready(NAME)));
		Ok(())
	}

	/// Whether the SDK is installed and has loaded its configuration.
	/// Never blocks.
	pub fn loaded(&self) -> bool {
		self.initialized && self.sdk.has_config()
	}

	pub(crate) fn sdk(&self) -> Result<&dyn MixpanelSdk> {
		if !self.initialized {
			return Err(MixpanelError::NotInitialized);
		}
		Ok(self.sdk.as_ref())
	}
}

impl std::fmt::Debug for Mixpanel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Mixpanel")
			.field("options", &self.options)
			.field("initialized", &self.initialized)
			.finish_non_exhaustive()
	}
}
