// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The SDK facade client.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use telemetra_core::{
	ActivationConfig, AdRevenue, EcommerceEvent, ErrorDetails, EventPayload, Location,
	ReporterConfig, Revenue, StartupKey, UserProfile,
};

use crate::backend::{platform_backend, NativeBackend};
use crate::callback::{DeeplinkCompletion, DeeplinkParametersCompletion, StartupParamsCompletion};
use crate::reporter::Reporter;

type ReporterMap = HashMap<String, Reporter>;

/// Facade over the platform-native analytics implementation.
///
/// All analytics behavior belongs to the backend; this type forwards every
/// operation verbatim and owns exactly one piece of state, the cache of
/// secondary reporters. For every API key at most one reporter is created
/// for the process lifetime, no matter how many threads ask for it.
///
/// # Example
///
/// ```
/// use telemetra::{ActivationConfig, TelemetraClient};
///
/// let client = TelemetraClient::platform_default();
/// client.activate(&ActivationConfig::new("your-api-key"));
/// client.report_event("app_started");
/// ```
pub struct TelemetraClient {
	native: Arc<dyn NativeBackend>,
	reporters: RwLock<ReporterMap>,
}

impl TelemetraClient {
	/// Creates a client over an explicit backend.
	///
	/// Embedders and tests use this to substitute their own
	/// [`NativeBackend`]; production callers usually want
	/// [`TelemetraClient::platform_default`].
	pub fn new(native: Arc<dyn NativeBackend>) -> Self {
		Self {
			native,
			reporters: RwLock::new(HashMap::new()),
		}
	}

	/// Creates a client over the backend resolved for the current build
	/// target.
	pub fn platform_default() -> Self {
		Self::new(platform_backend())
	}

	/// Activates the main analytics session.
	pub fn activate(&self, config: &ActivationConfig) {
		info!("Activating analytics session");
		self.native.activate(config);
	}

	/// Applies configuration for a secondary reporter ahead of first use.
	pub fn activate_reporter(&self, config: &ReporterConfig) {
		self.native.activate_reporter(config);
	}

	/// Clears the persisted app environment.
	pub fn clear_app_environment(&self) {
		self.native.clear_app_environment();
	}

	/// Device identifier, when the backend has resolved one.
	pub fn device_id(&self) -> Option<String> {
		self.native.device_id()
	}

	/// Version of the underlying native library.
	pub fn library_version(&self) -> String {
		self.native.library_version()
	}

	/// Returns the reporter for `api_key`, creating it on first use.
	///
	/// The common path takes only the shared lock. On a miss the exclusive
	/// lock is taken and the map re-checked, since another thread may have
	/// created the reporter while we waited; only then is the backend asked
	/// to construct one.
	pub fn reporter(&self, api_key: &str) -> Reporter {
		if let Some(reporter) = self.read_reporters().get(api_key) {
			return reporter.clone();
		}

		let mut reporters = self.write_reporters();
		if let Some(reporter) = reporters.get(api_key) {
			return reporter.clone();
		}

		debug!(api_key_len = api_key.len(), "Creating reporter");
		let reporter = Reporter::new(api_key, self.native.reporter(api_key));
		reporters.insert(api_key.to_string(), reporter.clone());
		reporter
	}

	/// Installation UUID, when the backend has resolved one.
	pub fn uuid(&self) -> Option<String> {
		self.native.uuid()
	}

	/// Marks the foreground session as paused.
	pub fn pause_session(&self) {
		self.native.pause_session();
	}

	/// Marks the foreground session as resumed.
	pub fn resume_session(&self) {
		self.native.resume_session();
	}

	/// Sets a persistent app environment pair attached to all future
	/// reports; `None` removes the pair.
	pub fn put_app_environment_value(&self, key: &str, value: Option<&str>) {
		self.native.put_app_environment_value(key, value);
	}

	/// Sets an environment pair attached to error and crash reports;
	/// `None` removes the pair.
	pub fn put_error_environment_value(&self, key: &str, value: Option<&str>) {
		self.native.put_error_environment_value(key, value);
	}

	pub fn report_ad_revenue(&self, ad_revenue: &AdRevenue) {
		self.native.report_ad_revenue(ad_revenue);
	}

	/// Reports that the app was opened via the given deeplink.
	pub fn report_app_open(&self, deeplink: &str) {
		self.native.report_app_open(deeplink);
	}

	pub fn report_ecommerce(&self, event: &EcommerceEvent) {
		self.native.report_ecommerce(event);
	}

	/// Reports a handled error, grouped by the stack trace in `details`.
	///
	/// To control grouping yourself use
	/// [`TelemetraClient::report_error_with_identifier`].
	pub fn report_error(&self, message: &str, details: &ErrorDetails) {
		self.native.report_error(message, details);
	}

	/// Reports a handled error, grouped solely by `identifier`. Errors with
	/// the same identifier land in one group; the stack trace is never
	/// consulted. Avoid dynamically built identifiers, they fragment the
	/// grouping.
	pub fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	) {
		self.native
			.report_error_with_identifier(identifier, message, details);
	}

	/// Reports a named event without a payload.
	pub fn report_event(&self, name: &str) {
		self.native.report_event(name, None);
	}

	/// Reports a named event with a JSON payload.
	pub fn report_event_with_payload(&self, name: &str, payload: &EventPayload) {
		self.native.report_event(name, Some(payload));
	}

	pub fn report_revenue(&self, revenue: &Revenue) {
		self.native.report_revenue(revenue);
	}

	/// Reports an error that terminated the application.
	pub fn report_unhandled_exception(&self, details: &ErrorDetails) {
		self.native.report_unhandled_exception(details);
	}

	pub fn report_user_profile(&self, profile: &UserProfile) {
		self.native.report_user_profile(profile);
	}

	/// Requests the deferred deeplink recovered from install attribution.
	///
	/// The completion is handed to the backend and may fire on any thread
	/// at any later time, or never; see [`crate::callback`].
	pub fn request_deferred_deeplink(&self, completion: DeeplinkCompletion) {
		self.native.request_deferred_deeplink(completion);
	}

	/// Requests the deferred deeplink query parameters.
	pub fn request_deferred_deeplink_parameters(&self, completion: DeeplinkParametersCompletion) {
		self.native.request_deferred_deeplink_parameters(completion);
	}

	/// Requests startup identifiers. Works before [`TelemetraClient::activate`],
	/// it just takes longer. An empty key list asks for
	/// [`telemetra_core::DEFAULT_STARTUP_KEYS`].
	pub fn request_startup_params(&self, completion: StartupParamsCompletion, keys: &[StartupKey]) {
		self.native.request_startup_params(completion, keys);
	}

	/// Forces the backend to flush its event buffer now. Frequent use
	/// raises traffic and battery drain.
	pub fn send_events_buffer(&self) {
		self.native.send_events_buffer();
	}

	/// Toggles data sending. Disabling also stops every secondary reporter.
	pub fn set_data_sending_enabled(&self, enabled: bool) {
		self.native.set_data_sending_enabled(enabled);
	}

	/// Overrides the auto-collected location; `None` switches back to auto
	/// collection.
	pub fn set_location(&self, location: Option<&Location>) {
		self.native.set_location(location);
	}

	pub fn set_location_tracking(&self, enabled: bool) {
		self.native.set_location_tracking(enabled);
	}

	/// Sets the user profile ID, at most
	/// [`telemetra_core::USER_PROFILE_ID_MAX_LEN`] characters; `None`
	/// clears it.
	pub fn set_user_profile_id(&self, id: Option<&str>) {
		self.native.set_user_profile_id(id);
	}

	// A panic in another thread only ever poisons the map between mutations,
	// never mid-mutation: insertion is the last operation performed under
	// the lock. Recovering the guard keeps later lookups working.
	fn read_reporters(&self) -> RwLockReadGuard<'_, ReporterMap> {
		self.reporters.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write_reporters(&self) -> RwLockWriteGuard<'_, ReporterMap> {
		self.reporters.write().unwrap_or_else(PoisonError::into_inner)
	}
}

impl std::fmt::Debug for TelemetraClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TelemetraClient").finish_non_exhaustive()
	}
}
