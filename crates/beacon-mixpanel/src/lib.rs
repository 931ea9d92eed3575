// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mixpanel integration for Beacon analytics.
//!
//! [`Mixpanel`] receives the generic page, identify, track and alias events
//! from `beacon-analytics-core` and translates them into calls on an
//! injected [`MixpanelSdk`] handle. The crate never talks to the network
//! itself; the host application owns SDK loading through
//! [`IntegrationHost`].
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use beacon_analytics_core::{IdentifyEvent, Properties, TrackEvent};
//! use beacon_mixpanel::{load_options_with_file, CallQueue, Mixpanel};
//!
//! let options = load_options_with_file("beacon.toml", host_settings)?;
//! let queue = Arc::new(CallQueue::new());
//! let mut mixpanel = Mixpanel::new(options, queue.clone(), host)?;
//! mixpanel.initialize()?;
//!
//! mixpanel.identify(&IdentifyEvent::new()
//!     .with_user_id("user_123")
//!     .with_traits(Properties::new().insert("email", "user@example.com")))?;
//! mixpanel.track(&TrackEvent::new("Signed Up"))?;
//!
//! // once the vendor SDK has loaded
//! queue.replay_into(&real_sdk)?;
//! ```
//!
//! # Property Mapping
//!
//! Identify traits are renamed to Mixpanel special properties (see
//! [`TRAIT_ALIASES`]). Reserved keys ([`RESERVED_PROPERTIES`]) never reach
//! `track`. Super properties are registered with ISO-8601 date strings;
//! people properties keep native dates.
//!
//! # Configuration
//!
//! Options merge from defaults, a TOML file, host settings and
//! `BEACON_MIXPANEL_*` environment variables, in that order. See
//! [`load_options`].

pub mod alias;
pub mod error;
pub mod host;
pub mod identify;
pub mod integration;
pub mod mapper;
pub mod options;
pub mod page;
pub mod queue;
pub mod reserved;
pub mod sdk;
pub mod sources;
pub mod track;

pub use error::{MixpanelError, OptionsError, Result, SdkError};
pub use host::{IntegrationHost, ReadyCallback};
pub use integration::{Mixpanel, NAME};
pub use mapper::TRAIT_ALIASES;
pub use options::{MixpanelOptions, MixpanelOptionsLayer, OPTION_ALIASES};
pub use queue::CallQueue;
pub use reserved::RESERVED_PROPERTIES;
pub use sdk::{MixpanelSdk, People, SdkCall, SdkResult};
pub use sources::{
	load_options, load_options_with_file, DefaultsSource, EnvSource, OptionsSource, Precedence,
	SettingsSource, TomlSource,
};
