// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Page routing. Page views are sent as track events; there is no
//! Mixpanel page call.

use beacon_analytics_core::PageEvent;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::integration::Mixpanel;

impl Mixpanel {
	/// Tracks a page view. The first matching rule wins:
	///
	/// 1. `consolidatedPageCalls`: `Loaded a Page`
	/// 2. `trackAllPages`: `Loaded a Page`
	/// 3. `trackCategorizedPages` with a category: `Viewed <Category> [<Name>] Page`
	/// 4. `trackNamedPages` with a name: `Viewed <Name> Page`
	///
	/// When no rule matches nothing is sent.
	#[instrument(skip_all, fields(name = page.name(), category = page.category()))]
	pub fn page(&self, page: &PageEvent) -> Result<()> {
		self.sdk()?;
		let opts = &self.options;

		if opts.consolidated_page_calls || opts.track_all_pages {
			return self.track(&page.track(None));
		}

		if opts.track_categorized_pages && page.category().is_some() {
			let label = page.full_name();
			return self.track(&page.track(label.as_deref()));
		}

		if opts.track_named_pages {
			if let Some(name) = page.name() {
				return self.track(&page.track(Some(name)));
			}
		}

		debug!("No page tracking rule matched");
		Ok(())
	}
}
