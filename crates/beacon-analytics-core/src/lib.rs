// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Vendor-neutral analytics event model for Beacon.
//!
//! Applications emit one vocabulary of page, identify, track and alias
//! events; integration crates (such as `beacon-mixpanel`) translate those
//! events into vendor SDK calls.
//!
//! - [`Value`] / [`Properties`]: property bags with native date values
//! - [`PageEvent`], [`IdentifyEvent`], [`TrackEvent`], [`AliasEvent`]
//! - [`IntegrationOverrides`]: per-call allow-list overrides for one integration

pub mod event;
pub mod properties;
pub mod value;

pub use event::{
	trait_spellings, AliasEvent, IdentifyEvent, IntegrationMap, IntegrationOverrides, PageEvent,
	TrackEvent,
};
pub use properties::Properties;
pub use value::{iso_string, Value};
