// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Facade dispatch behavior against a recording fake backend.
//!
//! Every facade method must produce exactly one backend call carrying the
//! caller's arguments unchanged, and query results must come back unchanged.
//! The reporter cache must hand out one instance per API key no matter how
//! many callers or threads ask.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use telemetra::backend::inert::InertBackend;
use telemetra::{
	ActivationConfig, AdRevenue, AdType, DeeplinkCompletion, DeeplinkParametersCompletion,
	EcommerceEvent, ErrorDetails, EventPayload, Location, NativeBackend, NativeReporter,
	PreloadInfo, Reporter, ReporterConfig, Revenue, Screen, StartupKey, StartupParamsCompletion,
	StartupParamsResult, TelemetraClient, UserProfile,
};

/// One recorded backend invocation, arguments owned.
#[derive(Debug, Clone, PartialEq)]
enum Call {
	Activate(ActivationConfig),
	ActivateReporter(ReporterConfig),
	ClearAppEnvironment,
	DeviceId,
	LibraryVersion,
	GetReporter(String),
	Uuid,
	PauseSession,
	ResumeSession,
	PutAppEnvironmentValue(String, Option<String>),
	PutErrorEnvironmentValue(String, Option<String>),
	ReportAdRevenue(AdRevenue),
	ReportAppOpen(String),
	ReportEcommerce(EcommerceEvent),
	ReportError(String, ErrorDetails),
	ReportErrorWithIdentifier(String, Option<String>, Option<ErrorDetails>),
	ReportEvent(String, Option<EventPayload>),
	ReportRevenue(Revenue),
	ReportUnhandledException(ErrorDetails),
	ReportUserProfile(UserProfile),
	RequestDeferredDeeplink,
	RequestDeferredDeeplinkParameters,
	RequestStartupParams(Vec<StartupKey>),
	SendEventsBuffer,
	SetDataSendingEnabled(bool),
	SetLocation(Option<Location>),
	SetLocationTracking(bool),
	SetUserProfileId(Option<String>),
}

/// Fake backend that records every call and answers queries with canned
/// values. Completion handles are resolved inline so tests can observe that
/// the caller-supplied completion reached the backend intact.
#[derive(Default)]
struct RecordingBackend {
	calls: Mutex<Vec<Call>>,
	reporter_constructions: AtomicUsize,
}

impl RecordingBackend {
	fn record(&self, call: Call) {
		self.calls.lock().unwrap().push(call);
	}

	fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}

	fn construction_count(&self) -> usize {
		self.reporter_constructions.load(Ordering::SeqCst)
	}
}

impl NativeBackend for RecordingBackend {
	fn activate(&self, config: &ActivationConfig) {
		self.record(Call::Activate(config.clone()));
	}

	fn activate_reporter(&self, config: &ReporterConfig) {
		self.record(Call::ActivateReporter(config.clone()));
	}

	fn clear_app_environment(&self) {
		self.record(Call::ClearAppEnvironment);
	}

	fn device_id(&self) -> Option<String> {
		self.record(Call::DeviceId);
		Some("device-314".to_string())
	}

	fn library_version(&self) -> String {
		self.record(Call::LibraryVersion);
		"7.2.0-native".to_string()
	}

	fn reporter(&self, api_key: &str) -> Arc<dyn NativeReporter> {
		self.record(Call::GetReporter(api_key.to_string()));
		self.reporter_constructions.fetch_add(1, Ordering::SeqCst);
		// Widen the window in which a second thread could race the first
		// construction.
		thread::sleep(Duration::from_millis(5));
		Arc::new(RecordingReporter::default())
	}

	fn uuid(&self) -> Option<String> {
		self.record(Call::Uuid);
		Some("uuid-2718".to_string())
	}

	fn pause_session(&self) {
		self.record(Call::PauseSession);
	}

	fn resume_session(&self) {
		self.record(Call::ResumeSession);
	}

	fn put_app_environment_value(&self, key: &str, value: Option<&str>) {
		self.record(Call::PutAppEnvironmentValue(
			key.to_string(),
			value.map(str::to_string),
		));
	}

	fn put_error_environment_value(&self, key: &str, value: Option<&str>) {
		self.record(Call::PutErrorEnvironmentValue(
			key.to_string(),
			value.map(str::to_string),
		));
	}

	fn report_ad_revenue(&self, ad_revenue: &AdRevenue) {
		self.record(Call::ReportAdRevenue(ad_revenue.clone()));
	}

	fn report_app_open(&self, deeplink: &str) {
		self.record(Call::ReportAppOpen(deeplink.to_string()));
	}

	fn report_ecommerce(&self, event: &EcommerceEvent) {
		self.record(Call::ReportEcommerce(event.clone()));
	}

	fn report_error(&self, message: &str, details: &ErrorDetails) {
		self.record(Call::ReportError(message.to_string(), details.clone()));
	}

	fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	) {
		self.record(Call::ReportErrorWithIdentifier(
			identifier.to_string(),
			message.map(str::to_string),
			details.cloned(),
		));
	}

	fn report_event(&self, name: &str, payload: Option<&EventPayload>) {
		self.record(Call::ReportEvent(name.to_string(), payload.cloned()));
	}

	fn report_revenue(&self, revenue: &Revenue) {
		self.record(Call::ReportRevenue(revenue.clone()));
	}

	fn report_unhandled_exception(&self, details: &ErrorDetails) {
		self.record(Call::ReportUnhandledException(details.clone()));
	}

	fn report_user_profile(&self, profile: &UserProfile) {
		self.record(Call::ReportUserProfile(profile.clone()));
	}

	fn request_deferred_deeplink(&self, completion: DeeplinkCompletion) {
		self.record(Call::RequestDeferredDeeplink);
		completion.resolve("app://landing/42");
	}

	fn request_deferred_deeplink_parameters(&self, completion: DeeplinkParametersCompletion) {
		self.record(Call::RequestDeferredDeeplinkParameters);
		let mut parameters = HashMap::new();
		parameters.insert("utm_source".to_string(), "store".to_string());
		completion.resolve(parameters);
	}

	fn request_startup_params(&self, completion: StartupParamsCompletion, keys: &[StartupKey]) {
		self.record(Call::RequestStartupParams(keys.to_vec()));
		let mut parameters = HashMap::new();
		parameters.insert("uuid".to_string(), "u-99".to_string());
		completion.resolve(StartupParamsResult { parameters });
	}

	fn send_events_buffer(&self) {
		self.record(Call::SendEventsBuffer);
	}

	fn set_data_sending_enabled(&self, enabled: bool) {
		self.record(Call::SetDataSendingEnabled(enabled));
	}

	fn set_location(&self, location: Option<&Location>) {
		self.record(Call::SetLocation(location.cloned()));
	}

	fn set_location_tracking(&self, enabled: bool) {
		self.record(Call::SetLocationTracking(enabled));
	}

	fn set_user_profile_id(&self, id: Option<&str>) {
		self.record(Call::SetUserProfileId(id.map(str::to_string)));
	}
}

/// One recorded reporter invocation.
#[derive(Debug, Clone, PartialEq)]
enum ReporterCall {
	ReportEvent(String, Option<EventPayload>),
	ReportError(String, ErrorDetails),
	ReportErrorWithIdentifier(String, Option<String>, Option<ErrorDetails>),
	ReportUnhandledException(ErrorDetails),
	ReportRevenue(Revenue),
	ReportAdRevenue(AdRevenue),
	ReportEcommerce(EcommerceEvent),
	ReportUserProfile(UserProfile),
	SetUserProfileId(Option<String>),
	SetDataSendingEnabled(bool),
	SendEventsBuffer,
}

#[derive(Default)]
struct RecordingReporter {
	calls: Mutex<Vec<ReporterCall>>,
}

impl RecordingReporter {
	fn record(&self, call: ReporterCall) {
		self.calls.lock().unwrap().push(call);
	}

	fn calls(&self) -> Vec<ReporterCall> {
		self.calls.lock().unwrap().clone()
	}
}

impl NativeReporter for RecordingReporter {
	fn report_event(&self, name: &str, payload: Option<&EventPayload>) {
		self.record(ReporterCall::ReportEvent(
			name.to_string(),
			payload.cloned(),
		));
	}

	fn report_error(&self, message: &str, details: &ErrorDetails) {
		self.record(ReporterCall::ReportError(
			message.to_string(),
			details.clone(),
		));
	}

	fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	) {
		self.record(ReporterCall::ReportErrorWithIdentifier(
			identifier.to_string(),
			message.map(str::to_string),
			details.cloned(),
		));
	}

	fn report_unhandled_exception(&self, details: &ErrorDetails) {
		self.record(ReporterCall::ReportUnhandledException(details.clone()));
	}

	fn report_revenue(&self, revenue: &Revenue) {
		self.record(ReporterCall::ReportRevenue(revenue.clone()));
	}

	fn report_ad_revenue(&self, ad_revenue: &AdRevenue) {
		self.record(ReporterCall::ReportAdRevenue(ad_revenue.clone()));
	}

	fn report_ecommerce(&self, event: &EcommerceEvent) {
		self.record(ReporterCall::ReportEcommerce(event.clone()));
	}

	fn report_user_profile(&self, profile: &UserProfile) {
		self.record(ReporterCall::ReportUserProfile(profile.clone()));
	}

	fn set_user_profile_id(&self, id: Option<&str>) {
		self.record(ReporterCall::SetUserProfileId(id.map(str::to_string)));
	}

	fn set_data_sending_enabled(&self, enabled: bool) {
		self.record(ReporterCall::SetDataSendingEnabled(enabled));
	}

	fn send_events_buffer(&self) {
		self.record(ReporterCall::SendEventsBuffer);
	}
}

fn client_over(backend: &Arc<RecordingBackend>) -> TelemetraClient {
	TelemetraClient::new(backend.clone() as Arc<dyn NativeBackend>)
}

#[test]
fn activate_forwards_config_unchanged() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let config = ActivationConfig::new("main-key")
		.with_app_version("3.1.4")
		.with_session_timeout(25)
		.with_data_sending_enabled(true)
		.with_preload_info(PreloadInfo::new("track-1").with_param("channel", "store"));
	client.activate(&config);

	assert_eq!(backend.calls(), vec![Call::Activate(config)]);
}

#[test]
fn activate_reporter_forwards_config_unchanged() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let config = ReporterConfig::new("alt-key").with_logs(true);
	client.activate_reporter(&config);

	assert_eq!(backend.calls(), vec![Call::ActivateReporter(config)]);
}

#[test]
fn queries_return_backend_values_unchanged() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	assert_eq!(client.device_id().as_deref(), Some("device-314"));
	assert_eq!(client.uuid().as_deref(), Some("uuid-2718"));
	assert_eq!(client.library_version(), "7.2.0-native");

	assert_eq!(
		backend.calls(),
		vec![Call::DeviceId, Call::Uuid, Call::LibraryVersion]
	);
}

#[test]
fn session_and_environment_calls_forward() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	client.pause_session();
	client.resume_session();
	client.put_app_environment_value("build", Some("1207"));
	client.put_app_environment_value("build", None);
	client.put_error_environment_value("graphics", Some("vulkan"));
	client.clear_app_environment();
	client.send_events_buffer();
	client.set_data_sending_enabled(false);
	client.set_location_tracking(true);
	client.set_user_profile_id(Some("player-1"));
	client.set_user_profile_id(None);

	assert_eq!(
		backend.calls(),
		vec![
			Call::PauseSession,
			Call::ResumeSession,
			Call::PutAppEnvironmentValue("build".into(), Some("1207".into())),
			Call::PutAppEnvironmentValue("build".into(), None),
			Call::PutErrorEnvironmentValue("graphics".into(), Some("vulkan".into())),
			Call::ClearAppEnvironment,
			Call::SendEventsBuffer,
			Call::SetDataSendingEnabled(false),
			Call::SetLocationTracking(true),
			Call::SetUserProfileId(Some("player-1".into())),
			Call::SetUserProfileId(None),
		]
	);
}

#[test]
fn location_override_and_reset_forward() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let location = Location::new(48.85, 2.35).with_altitude(35.0);
	client.set_location(Some(&location));
	client.set_location(None);

	assert_eq!(
		backend.calls(),
		vec![Call::SetLocation(Some(location)), Call::SetLocation(None)]
	);
}

#[test]
fn report_calls_forward_payloads_unchanged() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let payload = EventPayload::new(serde_json::json!({"difficulty": "hard"})).unwrap();
	let revenue = Revenue::new(990_000, "USD").with_product_id("gems.small");
	let ad_revenue = AdRevenue::new(12_000, "USD").with_ad_type(AdType::Banner);
	let ecommerce = EcommerceEvent::show_screen(Screen::new().with_name("shop"));
	let profile = UserProfile::new().with_name("Robin").with_counter("wins", 2.0);

	client.report_event("level_started");
	client.report_event_with_payload("level_finished", &payload);
	client.report_revenue(&revenue);
	client.report_ad_revenue(&ad_revenue);
	client.report_ecommerce(&ecommerce);
	client.report_user_profile(&profile);
	client.report_app_open("app://invite/abc");

	assert_eq!(
		backend.calls(),
		vec![
			Call::ReportEvent("level_started".into(), None),
			Call::ReportEvent("level_finished".into(), Some(payload)),
			Call::ReportRevenue(revenue),
			Call::ReportAdRevenue(ad_revenue),
			Call::ReportEcommerce(ecommerce),
			Call::ReportUserProfile(profile),
			Call::ReportAppOpen("app://invite/abc".into()),
		]
	);
}

#[test]
fn error_reports_keep_their_grouping_operation() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let details = ErrorDetails::new("SaveError", "could not write slot 3");
	client.report_error("save failed", &details);
	client.report_unhandled_exception(&details);

	assert_eq!(
		backend.calls(),
		vec![
			Call::ReportError("save failed".into(), details.clone()),
			Call::ReportUnhandledException(details),
		]
	);
}

#[test]
fn identifier_only_error_reaches_backend_with_absent_fields() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	client.report_error_with_identifier("crash-group-1", None, None);

	assert_eq!(
		backend.calls(),
		vec![Call::ReportErrorWithIdentifier("crash-group-1".into(), None, None)]
	);
}

#[test]
fn identifier_error_with_full_payload_forwards() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let details = ErrorDetails::new("NetError", "socket closed");
	client.report_error_with_identifier("net-layer", Some("reconnect failed"), Some(&details));

	assert_eq!(
		backend.calls(),
		vec![Call::ReportErrorWithIdentifier(
			"net-layer".into(),
			Some("reconnect failed".into()),
			Some(details),
		)]
	);
}

#[test]
fn deferred_deeplink_completion_passes_through() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let (completion, rx) = DeeplinkCompletion::channel();
	client.request_deferred_deeplink(completion);

	assert_eq!(backend.calls(), vec![Call::RequestDeferredDeeplink]);
	assert_eq!(rx.recv().unwrap().unwrap(), "app://landing/42");
}

#[test]
fn deeplink_parameters_completion_passes_through() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let (completion, rx) = DeeplinkParametersCompletion::channel();
	client.request_deferred_deeplink_parameters(completion);

	let parameters = rx.recv().unwrap().unwrap();
	assert_eq!(parameters["utm_source"], "store");
}

#[test]
fn startup_params_forward_requested_keys() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let (completion, rx) = StartupParamsCompletion::channel();
	client.request_startup_params(completion, &[StartupKey::Uuid, StartupKey::DeviceId]);

	assert_eq!(
		backend.calls(),
		vec![Call::RequestStartupParams(vec![
			StartupKey::Uuid,
			StartupKey::DeviceId,
		])]
	);
	assert_eq!(rx.recv().unwrap().unwrap().uuid(), Some("u-99"));
}

#[test]
fn sequential_reporter_lookups_share_one_instance() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let first = client.reporter("key-A");
	let second = client.reporter("key-A");

	assert!(first.ptr_eq(&second));
	assert_eq!(backend.construction_count(), 1);
	// The backend saw exactly one construction request.
	assert_eq!(backend.calls(), vec![Call::GetReporter("key-A".into())]);
}

#[test]
fn distinct_keys_build_distinct_reporters() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);

	let a = client.reporter("key-A");
	let b = client.reporter("key-B");

	assert!(!a.ptr_eq(&b));
	assert_eq!(a.api_key(), "key-A");
	assert_eq!(b.api_key(), "key-B");
	assert_eq!(backend.construction_count(), 2);
}

#[test]
fn concurrent_lookups_for_one_key_construct_once() {
	let backend = Arc::new(RecordingBackend::default());
	let client = Arc::new(client_over(&backend));
	let threads = 8;
	let barrier = Arc::new(Barrier::new(threads));

	let handles: Vec<_> = (0..threads)
		.map(|_| {
			let client = client.clone();
			let barrier = barrier.clone();
			thread::spawn(move || {
				barrier.wait();
				client.reporter("key-B")
			})
		})
		.collect();

	let reporters: Vec<Reporter> = handles.into_iter().map(|h| h.join().unwrap()).collect();

	for reporter in &reporters[1..] {
		assert!(reporters[0].ptr_eq(reporter));
	}
	assert_eq!(backend.construction_count(), 1);
}

#[test]
fn reporter_methods_forward_scoped_to_their_key() {
	let backend = Arc::new(RecordingBackend::default());
	let client = client_over(&backend);
	let reporter = client.reporter("partner-key");

	let payload = EventPayload::from_json(r#"{"stage": 2}"#).unwrap();
	reporter.report_event("partner_event");
	reporter.report_event_with_payload("partner_event", &payload);
	reporter.report_error_with_identifier("partner-crash", None, None);
	reporter.set_data_sending_enabled(true);
	reporter.send_events_buffer();

	// The facade made exactly one backend construction call and no other
	// backend-level dispatches for the reporter traffic.
	assert_eq!(backend.calls(), vec![Call::GetReporter("partner-key".into())]);
}

#[test]
fn reporter_forwarding_reaches_native_reporter() {
	let native = Arc::new(RecordingReporter::default());

	struct FixedReporterBackend {
		native: Arc<RecordingReporter>,
	}

	impl NativeBackend for FixedReporterBackend {
		fn activate(&self, _config: &ActivationConfig) {}
		fn activate_reporter(&self, _config: &ReporterConfig) {}
		fn clear_app_environment(&self) {}
		fn device_id(&self) -> Option<String> {
			None
		}
		fn library_version(&self) -> String {
			String::new()
		}
		fn reporter(&self, _api_key: &str) -> Arc<dyn NativeReporter> {
			self.native.clone()
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
		fn request_deferred_deeplink(&self, _completion: DeeplinkCompletion) {}
		fn request_deferred_deeplink_parameters(
			&self,
			_completion: DeeplinkParametersCompletion,
		) {
		}
		fn request_startup_params(
			&self,
			_completion: StartupParamsCompletion,
			_keys: &[StartupKey],
		) {
		}
		fn send_events_buffer(&self) {}
		fn set_data_sending_enabled(&self, _enabled: bool) {}
		fn set_location(&self, _location: Option<&Location>) {}
		fn set_location_tracking(&self, _enabled: bool) {}
		fn set_user_profile_id(&self, _id: Option<&str>) {}
	}

	let client = TelemetraClient::new(Arc::new(FixedReporterBackend {
		native: native.clone(),
	}));
	let reporter = client.reporter("partner-key");

	let details = ErrorDetails::new("PartnerError", "handshake failed");
	let revenue = Revenue::new(10, "EUR");
	reporter.report_event("partner_event");
	reporter.report_error("handshake", &details);
	reporter.report_error_with_identifier("partner-crash", Some("m"), None);
	reporter.report_unhandled_exception(&details);
	reporter.report_revenue(&revenue);
	reporter.set_user_profile_id(Some("partner-user"));
	reporter.set_data_sending_enabled(false);
	reporter.send_events_buffer();

	assert_eq!(
		native.calls(),
		vec![
			ReporterCall::ReportEvent("partner_event".into(), None),
			ReporterCall::ReportError("handshake".into(), details.clone()),
			ReporterCall::ReportErrorWithIdentifier("partner-crash".into(), Some("m".into()), None),
			ReporterCall::ReportUnhandledException(details),
			ReporterCall::ReportRevenue(revenue),
			ReporterCall::SetUserProfileId(Some("partner-user".into())),
			ReporterCall::SetDataSendingEnabled(false),
			ReporterCall::SendEventsBuffer,
		]
	);
}

#[test]
fn inert_platform_completes_every_call_without_effect() {
	let client = TelemetraClient::new(Arc::new(InertBackend::new()));

	client.activate(&ActivationConfig::new("key"));
	client.activate_reporter(&ReporterConfig::new("alt"));
	client.clear_app_environment();
	assert!(client.device_id().is_none());
	assert!(client.uuid().is_none());
	assert!(!client.library_version().is_empty());
	client.pause_session();
	client.resume_session();
	client.put_app_environment_value("k", Some("v"));
	client.put_error_environment_value("k", None);
	client.report_ad_revenue(&AdRevenue::new(1, "USD"));
	client.report_app_open("app://x");
	client.report_ecommerce(&EcommerceEvent::show_screen(Screen::new()));
	client.report_error("m", &ErrorDetails::new("E", "m"));
	client.report_error_with_identifier("id", None, None);
	client.report_event("e");
	client.report_revenue(&Revenue::new(1, "USD"));
	client.report_unhandled_exception(&ErrorDetails::new("E", "m"));
	client.report_user_profile(&UserProfile::new());
	client.send_events_buffer();
	client.set_data_sending_enabled(true);
	client.set_location(None);
	client.set_location_tracking(false);
	client.set_user_profile_id(None);

	let reporter = client.reporter("alt");
	reporter.report_event("e");

	// Dropped completions disconnect their receivers instead of firing.
	let (completion, rx) = DeeplinkCompletion::channel();
	client.request_deferred_deeplink(completion);
	assert!(rx.recv().is_err());

	let (completion, rx) = DeeplinkParametersCompletion::channel();
	client.request_deferred_deeplink_parameters(completion);
	assert!(rx.recv().is_err());

	let (completion, rx) = StartupParamsCompletion::channel();
	client.request_startup_params(completion, &[StartupKey::Uuid]);
	assert!(rx.recv().is_err());
}
