// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lifecycle hooks supplied by the host analytics framework.

/// Invoked by the host once the vendor script has loaded.
pub type ReadyCallback = Box<dyn FnOnce() + Send + 'static>;

/// The host side of the integration lifecycle.
///
/// The host owns script loading and the queueing of events that arrive
/// before an integration is ready. A failed load is the host's concern.
pub trait IntegrationHost: Send + Sync {
	/// Loads the vendor SDK for `integration`, then calls `on_loaded`.
	fn load(&self, integration: &str, on_loaded: ReadyCallback);

	/// Marks `integration` ready so queued events can be dispatched.
	fn ready(&self, integration: &str);
}
