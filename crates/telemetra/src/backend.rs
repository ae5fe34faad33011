// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Backend capability interface and build-target selection.
//!
//! Exactly one [`NativeBackend`] implementation is active per process,
//! chosen at compile time by [`platform_backend`]: the Android bridge, the
//! iOS bridge, or the inert fallback. The facade never inspects which one it
//! got; whatever the active backend does for an operation is exactly what
//! the caller observes.

use std::sync::Arc;

use telemetra_core::{
	ActivationConfig, AdRevenue, EcommerceEvent, ErrorDetails, EventPayload, Location,
	ReporterConfig, Revenue, StartupKey, UserProfile,
};

use crate::callback::{DeeplinkCompletion, DeeplinkParametersCompletion, StartupParamsCompletion};

#[cfg(target_os = "android")]
pub mod android;
pub mod inert;
#[cfg(target_os = "ios")]
pub mod ios;

/// Process-scope capability set of a platform-native analytics
/// implementation.
///
/// Implementations own all analytics behavior: buffering, persistence,
/// transport, retries, crash grouping, identifier resolution. This layer
/// forwards arguments unchanged and adds nothing.
pub trait NativeBackend: Send + Sync {
	/// Activates the main analytics session.
	fn activate(&self, config: &ActivationConfig);

	/// Applies configuration for a secondary reporter ahead of first use.
	fn activate_reporter(&self, config: &ReporterConfig);

	/// Clears the persisted app environment.
	fn clear_app_environment(&self);

	/// Device identifier, when the backend has resolved one.
	fn device_id(&self) -> Option<String>;

	/// Version of the underlying native library.
	fn library_version(&self) -> String;

	/// Constructs the native reporter handle for an alternate API key.
	///
	/// Callers go through the facade's cache; the backend is asked at most
	/// once per distinct key.
	fn reporter(&self, api_key: &str) -> Arc<dyn NativeReporter>;

	/// Installation UUID, when the backend has resolved one.
	fn uuid(&self) -> Option<String>;

	/// Marks the foreground session as paused.
	fn pause_session(&self);

	/// Marks the foreground session as resumed.
	fn resume_session(&self);

	/// Sets a persistent app environment pair attached to all future
	/// reports. `None` removes the pair.
	fn put_app_environment_value(&self, key: &str, value: Option<&str>);

	/// Sets an environment pair attached to error and crash reports.
	/// `None` removes the pair.
	fn put_error_environment_value(&self, key: &str, value: Option<&str>);

	fn report_ad_revenue(&self, ad_revenue: &AdRevenue);

	/// Reports that the app was opened via the given deeplink.
	fn report_app_open(&self, deeplink: &str);

	fn report_ecommerce(&self, event: &EcommerceEvent);

	/// Reports a handled error, grouped by the stack trace in `details`.
	fn report_error(&self, message: &str, details: &ErrorDetails);

	/// Reports a handled error, grouped solely by `identifier`. The stack
	/// trace inside `details` is never used for grouping.
	fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	);

	/// Reports a named event with an optional JSON payload.
	fn report_event(&self, name: &str, payload: Option<&EventPayload>);

	fn report_revenue(&self, revenue: &Revenue);

	/// Reports an error that terminated the application.
	fn report_unhandled_exception(&self, details: &ErrorDetails);

	fn report_user_profile(&self, profile: &UserProfile);

	/// Requests the deferred deeplink recovered from install attribution.
	/// The completion may fire much later, or never.
	fn request_deferred_deeplink(&self, completion: DeeplinkCompletion);

	/// Requests the deferred deeplink query parameters. The completion may
	/// fire much later, or never.
	fn request_deferred_deeplink_parameters(&self, completion: DeeplinkParametersCompletion);

	/// Requests startup identifiers. An empty key list asks for
	/// [`telemetra_core::DEFAULT_STARTUP_KEYS`].
	fn request_startup_params(&self, completion: StartupParamsCompletion, keys: &[StartupKey]);

	/// Forces the backend to flush its event buffer now.
	fn send_events_buffer(&self);

	/// Toggles data sending for the main session and every reporter.
	fn set_data_sending_enabled(&self, enabled: bool);

	/// Overrides the auto-collected location; `None` switches back to
	/// auto collection.
	fn set_location(&self, location: Option<&Location>);

	fn set_location_tracking(&self, enabled: bool);

	/// Sets the user profile ID, at most
	/// [`telemetra_core::USER_PROFILE_ID_MAX_LEN`] characters; `None`
	/// clears it.
	fn set_user_profile_id(&self, id: Option<&str>);
}

/// Per-API-key capability subset backing a secondary reporter.
pub trait NativeReporter: Send + Sync {
	fn report_event(&self, name: &str, payload: Option<&EventPayload>);

	/// Grouped by the stack trace in `details`.
	fn report_error(&self, message: &str, details: &ErrorDetails);

	/// Grouped solely by `identifier`.
	fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	);

	fn report_unhandled_exception(&self, details: &ErrorDetails);

	fn report_revenue(&self, revenue: &Revenue);

	fn report_ad_revenue(&self, ad_revenue: &AdRevenue);

	fn report_ecommerce(&self, event: &EcommerceEvent);

	fn report_user_profile(&self, profile: &UserProfile);

	fn set_user_profile_id(&self, id: Option<&str>);

	fn set_data_sending_enabled(&self, enabled: bool);

	fn send_events_buffer(&self);
}

/// Resolves the backend for the current build target.
///
/// Android and iOS builds get their platform bridge; every other target
/// gets the inert fallback, so calls on unsupported platforms silently
/// no-op instead of erroring. An Android bridge that cannot attach to the
/// JVM also falls back to inert rather than failing.
#[allow(unreachable_code)]
pub fn platform_backend() -> Arc<dyn NativeBackend> {
	#[cfg(target_os = "android")]
	{
		match android::AndroidBackend::attach() {
			Ok(backend) => return Arc::new(backend),
			Err(error) => {
				tracing::warn!(%error, "Android bridge unavailable, using inert backend");
			}
		}
	}

	#[cfg(target_os = "ios")]
	{
		return Arc::new(ios::IosBackend::new());
	}

	Arc::new(inert::InertBackend::new())
}
