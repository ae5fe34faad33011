// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secondary reporter handle scoped to an alternate API key.

use std::sync::Arc;

use telemetra_core::{
	AdRevenue, EcommerceEvent, ErrorDetails, EventPayload, Revenue, UserProfile,
};

use crate::backend::NativeReporter;

/// A reporting handle for one alternate API key, independent of the main
/// activated session.
///
/// Handles are cheap to clone; every clone obtained for the same key refers
/// to the same underlying native reporter. All methods forward verbatim to
/// that reporter.
#[derive(Clone)]
pub struct Reporter {
	api_key: Arc<str>,
	native: Arc<dyn NativeReporter>,
}

impl Reporter {
	pub(crate) fn new(api_key: &str, native: Arc<dyn NativeReporter>) -> Self {
		Self {
			api_key: Arc::from(api_key),
			native,
		}
	}

	/// The API key this reporter reports under.
	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	/// Whether two handles share the same underlying native reporter.
	pub fn ptr_eq(&self, other: &Reporter) -> bool {
		Arc::ptr_eq(&self.native, &other.native)
	}

	/// Reports a named event without a payload.
	pub fn report_event(&self, name: &str) {
		self.native.report_event(name, None);
	}

	/// Reports a named event with a JSON payload.
	pub fn report_event_with_payload(&self, name: &str, payload: &EventPayload) {
		self.native.report_event(name, Some(payload));
	}

	/// Reports a handled error, grouped by the stack trace in `details`.
	pub fn report_error(&self, message: &str, details: &ErrorDetails) {
		self.native.report_error(message, details);
	}

	/// Reports a handled error, grouped solely by `identifier`; the stack
	/// trace is never consulted for grouping.
	pub fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	) {
		self.native
			.report_error_with_identifier(identifier, message, details);
	}

	/// Reports an error that terminated the application.
	pub fn report_unhandled_exception(&self, details: &ErrorDetails) {
		self.native.report_unhandled_exception(details);
	}

	pub fn report_revenue(&self, revenue: &Revenue) {
		self.native.report_revenue(revenue);
	}

	pub fn report_ad_revenue(&self, ad_revenue: &AdRevenue) {
		self.native.report_ad_revenue(ad_revenue);
	}

	pub fn report_ecommerce(&self, event: &EcommerceEvent) {
		self.native.report_ecommerce(event);
	}

	pub fn report_user_profile(&self, profile: &UserProfile) {
		self.native.report_user_profile(profile);
	}

	/// Sets the user profile ID for this reporter; `None` clears it.
	pub fn set_user_profile_id(&self, id: Option<&str>) {
		self.native.set_user_profile_id(id);
	}

	/// Toggles data sending for this reporter only.
	pub fn set_data_sending_enabled(&self, enabled: bool) {
		self.native.set_data_sending_enabled(enabled);
	}

	/// Forces a flush of this reporter's event buffer.
	pub fn send_events_buffer(&self) {
		self.native.send_events_buffer();
	}
}

impl std::fmt::Debug for Reporter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Reporter")
			.field("api_key", &self.api_key)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::inert::InertReporter;

	#[test]
	fn clones_share_the_native_handle() {
		let reporter = Reporter::new("key-1", Arc::new(InertReporter));
		let clone = reporter.clone();
		assert!(reporter.ptr_eq(&clone));
		assert_eq!(clone.api_key(), "key-1");
	}

	#[test]
	fn separately_built_handles_are_distinct() {
		let a = Reporter::new("key-1", Arc::new(InertReporter));
		let b = Reporter::new("key-1", Arc::new(InertReporter));
		assert!(!a.ptr_eq(&b));
	}
}
