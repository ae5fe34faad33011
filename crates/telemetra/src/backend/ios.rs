// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! C bridge to the vendor iOS analytics SDK.
//!
//! The vendor framework ships an Objective-C shim with a flat C interface
//! (`tlm_*`). Structured payloads cross as JSON strings; strings returned by
//! the shim are copies that must be released with `tlm_string_free`.
//! Asynchronous results arrive through the extern "C" trampolines below,
//! keyed by a pending-completion token.
//!
//! This module only marshals; all analytics behavior stays in the vendor
//! framework.

use std::collections::HashMap;
use std::ffi::{c_char, CStr, CString};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::warn;

use telemetra_core::{
	ActivationConfig, AdRevenue, DeeplinkFailure, DeeplinkFailureReason, EcommerceEvent,
	ErrorDetails, EventPayload, Location, ReporterConfig, Revenue, StartupError, StartupKey,
	StartupParamsResult, UserProfile,
};

use crate::backend::{NativeBackend, NativeReporter};
use crate::callback::{DeeplinkCompletion, DeeplinkParametersCompletion, StartupParamsCompletion};

type SuccessCallback = extern "C" fn(token: u64, payload: *const c_char);
type FailureCallback =
	extern "C" fn(token: u64, reason: *const c_char, description: *const c_char);
type StartupCallback =
	extern "C" fn(token: u64, payload: *const c_char, error: *const c_char);

extern "C" {
	fn tlm_activate(config_json: *const c_char);
	fn tlm_activate_reporter(config_json: *const c_char);
	fn tlm_clear_app_environment();
	fn tlm_copy_device_id() -> *mut c_char;
	fn tlm_copy_library_version() -> *mut c_char;
	fn tlm_copy_uuid() -> *mut c_char;
	fn tlm_string_free(value: *mut c_char);
	fn tlm_pause_session();
	fn tlm_resume_session();
	fn tlm_put_app_environment_value(key: *const c_char, value: *const c_char);
	fn tlm_put_error_environment_value(key: *const c_char, value: *const c_char);
	fn tlm_report_ad_revenue(json: *const c_char);
	fn tlm_report_app_open(deeplink: *const c_char);
	fn tlm_report_ecommerce(json: *const c_char);
	fn tlm_report_error(message: *const c_char, details_json: *const c_char);
	fn tlm_report_error_with_identifier(
		identifier: *const c_char,
		message: *const c_char,
		details_json: *const c_char,
	);
	fn tlm_report_event(name: *const c_char, payload_json: *const c_char);
	fn tlm_report_revenue(json: *const c_char);
	fn tlm_report_unhandled_exception(details_json: *const c_char);
	fn tlm_report_user_profile(json: *const c_char);
	fn tlm_request_deferred_deeplink(
		token: u64,
		on_success: SuccessCallback,
		on_failure: FailureCallback,
	);
	fn tlm_request_deferred_deeplink_parameters(
		token: u64,
		on_success: SuccessCallback,
		on_failure: FailureCallback,
	);
	fn tlm_request_startup_params(token: u64, keys_json: *const c_char, callback: StartupCallback);
	fn tlm_send_events_buffer();
	fn tlm_set_data_sending_enabled(enabled: bool);
	fn tlm_set_location(location_json: *const c_char);
	fn tlm_set_location_tracking(enabled: bool);
	fn tlm_set_user_profile_id(id: *const c_char);

	fn tlm_reporter_report_event(
		api_key: *const c_char,
		name: *const c_char,
		payload_json: *const c_char,
	);
	fn tlm_reporter_report_error(
		api_key: *const c_char,
		message: *const c_char,
		details_json: *const c_char,
	);
	fn tlm_reporter_report_error_with_identifier(
		api_key: *const c_char,
		identifier: *const c_char,
		message: *const c_char,
		details_json: *const c_char,
	);
	fn tlm_reporter_report_unhandled_exception(api_key: *const c_char, details_json: *const c_char);
	fn tlm_reporter_report_revenue(api_key: *const c_char, json: *const c_char);
	fn tlm_reporter_report_ad_revenue(api_key: *const c_char, json: *const c_char);
	fn tlm_reporter_report_ecommerce(api_key: *const c_char, json: *const c_char);
	fn tlm_reporter_report_user_profile(api_key: *const c_char, json: *const c_char);
	fn tlm_reporter_set_user_profile_id(api_key: *const c_char, id: *const c_char);
	fn tlm_reporter_set_data_sending_enabled(api_key: *const c_char, enabled: bool);
	fn tlm_reporter_send_events_buffer(api_key: *const c_char);
}

/// Turns a Rust string into a C string, which JSON and API keys always are;
/// interior NULs only ever come from hostile payloads and are dropped with
/// a log line.
fn c_string(value: &str) -> Option<CString> {
	match CString::new(value) {
		Ok(value) => Some(value),
		Err(error) => {
			warn!(%error, "string contains an interior NUL byte, call dropped");
			None
		}
	}
}

fn optional_c_string(value: Option<&str>) -> Option<Option<CString>> {
	match value {
		Some(value) => c_string(value).map(Some),
		None => Some(None),
	}
}

fn as_ptr(value: &Option<CString>) -> *const c_char {
	value
		.as_ref()
		.map_or(std::ptr::null(), |value| value.as_ptr())
}

fn to_json<T: serde::Serialize>(payload: &T) -> Option<CString> {
	match serde_json::to_string(payload) {
		Ok(json) => c_string(&json),
		Err(error) => {
			warn!(%error, "failed to encode payload");
			None
		}
	}
}

/// Copies a shim-owned string into Rust and releases the original.
fn take_shim_string(value: *mut c_char) -> Option<String> {
	if value.is_null() {
		return None;
	}
	let copied = unsafe { CStr::from_ptr(value) }.to_string_lossy().into_owned();
	unsafe { tlm_string_free(value) };
	Some(copied)
}

fn read_c_string(value: *const c_char) -> Option<String> {
	if value.is_null() {
		return None;
	}
	Some(unsafe { CStr::from_ptr(value) }.to_string_lossy().into_owned())
}

/// Backend dispatching into the vendor iOS framework.
#[derive(Debug, Default)]
pub struct IosBackend;

impl IosBackend {
	pub fn new() -> Self {
		Self
	}
}

impl NativeBackend for IosBackend {
	fn activate(&self, config: &ActivationConfig) {
		if let Some(json) = to_json(config) {
			unsafe { tlm_activate(json.as_ptr()) };
		}
	}

	fn activate_reporter(&self, config: &ReporterConfig) {
		if let Some(json) = to_json(config) {
			unsafe { tlm_activate_reporter(json.as_ptr()) };
		}
	}

	fn clear_app_environment(&self) {
		unsafe { tlm_clear_app_environment() };
	}

	fn device_id(&self) -> Option<String> {
		take_shim_string(unsafe { tlm_copy_device_id() })
	}

	fn library_version(&self) -> String {
		take_shim_string(unsafe { tlm_copy_library_version() }).unwrap_or_default()
	}

	fn reporter(&self, api_key: &str) -> Arc<dyn NativeReporter> {
		match c_string(api_key) {
			Some(api_key) => Arc::new(IosReporter { api_key }),
			None => Arc::new(super::inert::InertReporter),
		}
	}

	fn uuid(&self) -> Option<String> {
		take_shim_string(unsafe { tlm_copy_uuid() })
	}

	fn pause_session(&self) {
		unsafe { tlm_pause_session() };
	}

	fn resume_session(&self) {
		unsafe { tlm_resume_session() };
	}

	fn put_app_environment_value(&self, key: &str, value: Option<&str>) {
		let (Some(key), Some(value)) = (c_string(key), optional_c_string(value)) else {
			return;
		};
		unsafe { tlm_put_app_environment_value(key.as_ptr(), as_ptr(&value)) };
	}

	fn put_error_environment_value(&self, key: &str, value: Option<&str>) {
		let (Some(key), Some(value)) = (c_string(key), optional_c_string(value)) else {
			return;
		};
		unsafe { tlm_put_error_environment_value(key.as_ptr(), as_ptr(&value)) };
	}

	fn report_ad_revenue(&self, ad_revenue: &AdRevenue) {
		if let Some(json) = to_json(ad_revenue) {
			unsafe { tlm_report_ad_revenue(json.as_ptr()) };
		}
	}

	fn report_app_open(&self, deeplink: &str) {
		if let Some(deeplink) = c_string(deeplink) {
			unsafe { tlm_report_app_open(deeplink.as_ptr()) };
		}
	}

	fn report_ecommerce(&self, event: &EcommerceEvent) {
		if let Some(json) = to_json(event) {
			unsafe { tlm_report_ecommerce(json.as_ptr()) };
		}
	}

	fn report_error(&self, message: &str, details: &ErrorDetails) {
		let (Some(message), Some(details)) = (c_string(message), to_json(details)) else {
			return;
		};
		unsafe { tlm_report_error(message.as_ptr(), details.as_ptr()) };
	}

	fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	) {
		let Some(identifier) = c_string(identifier) else {
			return;
		};
		let Some(message) = optional_c_string(message) else {
			return;
		};
		let details = match details {
			Some(details) => match to_json(details) {
				Some(json) => Some(json),
				None => return,
			},
			None => None,
		};
		unsafe {
			tlm_report_error_with_identifier(identifier.as_ptr(), as_ptr(&message), as_ptr(&details))
		};
	}

	fn report_event(&self, name: &str, payload: Option<&EventPayload>) {
		let Some(name) = c_string(name) else {
			return;
		};
		let payload = match payload {
			Some(payload) => match to_json(payload) {
				Some(json) => Some(json),
				None => return,
			},
			None => None,
		};
		unsafe { tlm_report_event(name.as_ptr(), as_ptr(&payload)) };
	}

	fn report_revenue(&self, revenue: &Revenue) {
		if let Some(json) = to_json(revenue) {
			unsafe { tlm_report_revenue(json.as_ptr()) };
		}
	}

	fn report_unhandled_exception(&self, details: &ErrorDetails) {
		if let Some(json) = to_json(details) {
			unsafe { tlm_report_unhandled_exception(json.as_ptr()) };
		}
	}

	fn report_user_profile(&self, profile: &UserProfile) {
		if let Some(json) = to_json(profile) {
			unsafe { tlm_report_user_profile(json.as_ptr()) };
		}
	}

	fn request_deferred_deeplink(&self, completion: DeeplinkCompletion) {
		let token = register(Pending::Deeplink(completion));
		unsafe { tlm_request_deferred_deeplink(token, on_deeplink, on_deeplink_failure) };
	}

	fn request_deferred_deeplink_parameters(&self, completion: DeeplinkParametersCompletion) {
		let token = register(Pending::DeeplinkParameters(completion));
		unsafe {
			tlm_request_deferred_deeplink_parameters(
				token,
				on_deeplink_parameters,
				on_deeplink_parameters_failure,
			)
		};
	}

	fn request_startup_params(&self, completion: StartupParamsCompletion, keys: &[StartupKey]) {
		let names: Vec<&str> = keys.iter().map(StartupKey::as_str).collect();
		let Some(keys_json) = to_json(&names) else {
			return;
		};
		let token = register(Pending::Startup(completion));
		unsafe { tlm_request_startup_params(token, keys_json.as_ptr(), on_startup_params) };
	}

	fn send_events_buffer(&self) {
		unsafe { tlm_send_events_buffer() };
	}

	fn set_data_sending_enabled(&self, enabled: bool) {
		unsafe { tlm_set_data_sending_enabled(enabled) };
	}

	fn set_location(&self, location: Option<&Location>) {
		let json = match location {
			Some(location) => match to_json(location) {
				Some(json) => Some(json),
				None => return,
			},
			None => None,
		};
		unsafe { tlm_set_location(as_ptr(&json)) };
	}

	fn set_location_tracking(&self, enabled: bool) {
		unsafe { tlm_set_location_tracking(enabled) };
	}

	fn set_user_profile_id(&self, id: Option<&str>) {
		let Some(id) = optional_c_string(id) else {
			return;
		};
		unsafe { tlm_set_user_profile_id(as_ptr(&id)) };
	}
}

/// Reporter handle scoped to one API key on the shim side.
struct IosReporter {
	api_key: CString,
}

impl NativeReporter for IosReporter {
	fn report_event(&self, name: &str, payload: Option<&EventPayload>) {
		let Some(name) = c_string(name) else {
			return;
		};
		let payload = match payload {
			Some(payload) => match to_json(payload) {
				Some(json) => Some(json),
				None => return,
			},
			None => None,
		};
		unsafe { tlm_reporter_report_event(self.api_key.as_ptr(), name.as_ptr(), as_ptr(&payload)) };
	}

	fn report_error(&self, message: &str, details: &ErrorDetails) {
		let (Some(message), Some(details)) = (c_string(message), to_json(details)) else {
			return;
		};
		unsafe {
			tlm_reporter_report_error(self.api_key.as_ptr(), message.as_ptr(), details.as_ptr())
		};
	}

	fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	) {
		let Some(identifier) = c_string(identifier) else {
			return;
		};
		let Some(message) = optional_c_string(message) else {
			return;
		};
		let details = match details {
			Some(details) => match to_json(details) {
				Some(json) => Some(json),
				None => return,
			},
			None => None,
		};
		unsafe {
			tlm_reporter_report_error_with_identifier(
				self.api_key.as_ptr(),
				identifier.as_ptr(),
				as_ptr(&message),
				as_ptr(&details),
			)
		};
	}

	fn report_unhandled_exception(&self, details: &ErrorDetails) {
		if let Some(json) = to_json(details) {
			unsafe { tlm_reporter_report_unhandled_exception(self.api_key.as_ptr(), json.as_ptr()) };
		}
	}

	fn report_revenue(&self, revenue: &Revenue) {
		if let Some(json) = to_json(revenue) {
			unsafe { tlm_reporter_report_revenue(self.api_key.as_ptr(), json.as_ptr()) };
		}
	}

	fn report_ad_revenue(&self, ad_revenue: &AdRevenue) {
		if let Some(json) = to_json(ad_revenue) {
			unsafe { tlm_reporter_report_ad_revenue(self.api_key.as_ptr(), json.as_ptr()) };
		}
	}

	fn report_ecommerce(&self, event: &EcommerceEvent) {
		if let Some(json) = to_json(event) {
			unsafe { tlm_reporter_report_ecommerce(self.api_key.as_ptr(), json.as_ptr()) };
		}
	}

	fn report_user_profile(&self, profile: &UserProfile) {
		if let Some(json) = to_json(profile) {
			unsafe { tlm_reporter_report_user_profile(self.api_key.as_ptr(), json.as_ptr()) };
		}
	}

	fn set_user_profile_id(&self, id: Option<&str>) {
		let Some(id) = optional_c_string(id) else {
			return;
		};
		unsafe { tlm_reporter_set_user_profile_id(self.api_key.as_ptr(), as_ptr(&id)) };
	}

	fn set_data_sending_enabled(&self, enabled: bool) {
		unsafe { tlm_reporter_set_data_sending_enabled(self.api_key.as_ptr(), enabled) };
	}

	fn send_events_buffer(&self) {
		unsafe { tlm_reporter_send_events_buffer(self.api_key.as_ptr()) };
	}
}

/// A completion parked until the shim reports back.
enum Pending {
	Deeplink(DeeplinkCompletion),
	DeeplinkParameters(DeeplinkParametersCompletion),
	Startup(StartupParamsCompletion),
}

fn pending() -> &'static Mutex<HashMap<u64, Pending>> {
	static PENDING: OnceLock<Mutex<HashMap<u64, Pending>>> = OnceLock::new();
	PENDING.get_or_init(|| Mutex::new(HashMap::new()))
}

fn register(completion: Pending) -> u64 {
	static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);
	let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
	pending()
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.insert(token, completion);
	token
}

fn take(token: u64) -> Option<Pending> {
	pending()
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.remove(&token)
}

fn failure_of(reason: *const c_char, description: *const c_char) -> DeeplinkFailure {
	let reason = read_c_string(reason)
		.and_then(|raw| raw.parse().ok())
		.unwrap_or(DeeplinkFailureReason::Unknown);
	let mut failure = DeeplinkFailure::new(reason);
	if let Some(description) = read_c_string(description) {
		failure = failure.with_description(description);
	}
	failure
}

extern "C" fn on_deeplink(token: u64, payload: *const c_char) {
	let Some(Pending::Deeplink(completion)) = take(token) else {
		warn!(token, "no pending deeplink completion for token");
		return;
	};
	match read_c_string(payload) {
		Some(deeplink) => completion.resolve(deeplink),
		None => completion.fail(DeeplinkFailure::new(DeeplinkFailureReason::Unknown)),
	}
}

extern "C" fn on_deeplink_failure(token: u64, reason: *const c_char, description: *const c_char) {
	let Some(Pending::Deeplink(completion)) = take(token) else {
		warn!(token, "no pending deeplink completion for token");
		return;
	};
	completion.fail(failure_of(reason, description));
}

extern "C" fn on_deeplink_parameters(token: u64, payload: *const c_char) {
	let Some(Pending::DeeplinkParameters(completion)) = take(token) else {
		warn!(token, "no pending deeplink parameters completion for token");
		return;
	};
	let parameters = read_c_string(payload)
		.and_then(|raw| serde_json::from_str::<HashMap<String, String>>(&raw).ok());
	match parameters {
		Some(parameters) => completion.resolve(parameters),
		None => completion.fail(DeeplinkFailure::new(DeeplinkFailureReason::ParseError)),
	}
}

extern "C" fn on_deeplink_parameters_failure(
	token: u64,
	reason: *const c_char,
	description: *const c_char,
) {
	let Some(Pending::DeeplinkParameters(completion)) = take(token) else {
		warn!(token, "no pending deeplink parameters completion for token");
		return;
	};
	completion.fail(failure_of(reason, description));
}

extern "C" fn on_startup_params(token: u64, payload: *const c_char, error: *const c_char) {
	let Some(Pending::Startup(completion)) = take(token) else {
		warn!(token, "no pending startup params completion for token");
		return;
	};
	if let Some(error) = read_c_string(error) {
		let error = match error.as_str() {
			"network" => StartupError::Network,
			"invalid_response" => StartupError::InvalidResponse,
			_ => StartupError::Unknown,
		};
		completion.fail(error);
		return;
	}
	let parameters = read_c_string(payload)
		.and_then(|raw| serde_json::from_str::<HashMap<String, String>>(&raw).ok());
	match parameters {
		Some(parameters) => completion.resolve(StartupParamsResult { parameters }),
		None => completion.fail(StartupError::InvalidResponse),
	}
}
