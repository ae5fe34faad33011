// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Inert fallback backend for unsupported platforms.
//!
//! Every operation completes without observable effect. Queries answer
//! `None`, and completion handles are dropped without ever firing, which
//! disconnects any channel receiver attached to them.

use std::sync::Arc;

use tracing::debug;

use telemetra_core::{
	ActivationConfig, AdRevenue, EcommerceEvent, ErrorDetails, EventPayload, Location,
	ReporterConfig, Revenue, StartupKey, UserProfile,
};

use crate::backend::{NativeBackend, NativeReporter};
use crate::callback::{DeeplinkCompletion, DeeplinkParametersCompletion, StartupParamsCompletion};

/// Backend used when no platform implementation applies.
#[derive(Debug, Default)]
pub struct InertBackend;

impl InertBackend {
	pub fn new() -> Self {
		Self
	}
}

impl NativeBackend for InertBackend {
	fn activate(&self, _config: &ActivationConfig) {
		debug!("no native analytics backend on this platform, activation discarded");
	}

	fn activate_reporter(&self, _config: &ReporterConfig) {}

	fn clear_app_environment(&self) {}

	fn device_id(&self) -> Option<String> {
		None
	}

	fn library_version(&self) -> String {
		env!("CARGO_PKG_VERSION").to_string()
	}

	fn reporter(&self, _api_key: &str) -> Arc<dyn NativeReporter> {
		Arc::new(InertReporter)
	}

	fn uuid(&self) -> Option<String> {
		None
	}

	fn pause_session(&self) {}

	fn resume_session(&self) {}

	fn put_app_environment_value(&self, _key: &str, _value: Option<&str>) {}

	fn put_error_environment_value(&self, _key: &str, _value: Option<&str>) {}

	fn report_ad_revenue(&self, _ad_revenue: &AdRevenue) {}

	fn report_app_open(&self, _deeplink: &str) {}

	fn report_ecommerce(&self, _event: &EcommerceEvent) {}

	fn report_error(&self, _message: &str, _details: &ErrorDetails) {}

	fn report_error_with_identifier(
		&self,
		_identifier: &str,
		_message: Option<&str>,
		_details: Option<&ErrorDetails>,
	) {
	}

	fn report_event(&self, _name: &str, _payload: Option<&EventPayload>) {}

	fn report_revenue(&self, _revenue: &Revenue) {}

	fn report_unhandled_exception(&self, _details: &ErrorDetails) {}

	fn report_user_profile(&self, _profile: &UserProfile) {}

	fn request_deferred_deeplink(&self, completion: DeeplinkCompletion) {
		debug!("deferred deeplink unsupported on this platform, completion dropped");
		drop(completion);
	}

	fn request_deferred_deeplink_parameters(&self, completion: DeeplinkParametersCompletion) {
		debug!("deferred deeplink parameters unsupported on this platform, completion dropped");
		drop(completion);
	}

	fn request_startup_params(&self, completion: StartupParamsCompletion, _keys: &[StartupKey]) {
		debug!("startup params unsupported on this platform, completion dropped");
		drop(completion);
	}

	fn send_events_buffer(&self) {}

	fn set_data_sending_enabled(&self, _enabled: bool) {}

	fn set_location(&self, _location: Option<&Location>) {}

	fn set_location_tracking(&self, _enabled: bool) {}

	fn set_user_profile_id(&self, _id: Option<&str>) {}
}

/// Reporter handle produced by [`InertBackend`].
#[derive(Debug, Default)]
pub struct InertReporter;

impl NativeReporter for InertReporter {
	fn report_event(&self, _name: &str, _payload: Option<&EventPayload>) {}

	fn report_error(&self, _message: &str, _details: &ErrorDetails) {}

	fn report_error_with_identifier(
		&self,
		_identifier: &str,
		_message: Option<&str>,
		_details: Option<&ErrorDetails>,
	) {
	}

	fn report_unhandled_exception(&self, _details: &ErrorDetails) {}

	fn report_revenue(&self, _revenue: &Revenue) {}

	fn report_ad_revenue(&self, _ad_revenue: &AdRevenue) {}

	fn report_ecommerce(&self, _event: &EcommerceEvent) {}

	fn report_user_profile(&self, _profile: &UserProfile) {}

	fn set_user_profile_id(&self, _id: Option<&str>) {}

	fn set_data_sending_enabled(&self, _enabled: bool) {}

	fn send_events_buffer(&self) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn queries_answer_none() {
		let backend = InertBackend::new();
		assert!(backend.device_id().is_none());
		assert!(backend.uuid().is_none());
	}

	#[test]
	fn library_version_is_this_crate() {
		assert_eq!(InertBackend::new().library_version(), env!("CARGO_PKG_VERSION"));
	}

	#[test]
	fn completions_are_dropped_not_fired() {
		let backend = InertBackend::new();

		let (completion, rx) = DeeplinkCompletion::channel();
		backend.request_deferred_deeplink(completion);
		assert!(rx.recv().is_err());

		let (completion, rx) = StartupParamsCompletion::channel();
		backend.request_startup_params(completion, &[StartupKey::Uuid]);
		assert!(rx.recv().is_err());
	}

	#[test]
	fn reporter_calls_complete_without_effect() {
		let backend = InertBackend::new();
		let reporter = backend.reporter("any-key");

		reporter.report_event("event", None);
		reporter.report_revenue(&Revenue::new(1, "USD"));
		reporter.set_data_sending_enabled(false);
		reporter.send_events_buffer();
	}
}
