// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JNI bridge to the vendor Android analytics SDK.
//!
//! All structured payloads cross the boundary as JSON strings; the Java side
//! (`io.telemetra.bridge.TelemetraBridge`) decodes them and calls the vendor
//! SDK. Asynchronous results come back through the exported
//! `Java_io_telemetra_bridge_*` entry points below, keyed by a pending-
//! completion token handed out when the request was made.
//!
//! This module only marshals. Buffering, persistence, transport and retry
//! behavior all belong to the vendor SDK on the other side of the bridge.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::jlong;
use jni::{JNIEnv, JavaVM};
use thiserror::Error;
use tracing::warn;

use telemetra_core::{
	ActivationConfig, AdRevenue, DeeplinkFailure, DeeplinkFailureReason, EcommerceEvent,
	ErrorDetails, EventPayload, Location, ReporterConfig, Revenue, StartupError, StartupKey,
	StartupParamsResult, UserProfile,
};

use crate::backend::{NativeBackend, NativeReporter};
use crate::callback::{DeeplinkCompletion, DeeplinkParametersCompletion, StartupParamsCompletion};

const BRIDGE_CLASS: &str = "io/telemetra/bridge/TelemetraBridge";

/// Errors from attaching to the JVM-side bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
	#[error("no Android context is registered for this process")]
	MissingContext,
	#[error("JNI error: {0}")]
	Jni(#[from] jni::errors::Error),
}

/// Backend dispatching into the vendor Android SDK over JNI.
pub struct AndroidBackend {
	vm: Arc<JavaVM>,
	bridge: GlobalRef,
}

impl AndroidBackend {
	/// Attaches to the JVM and instantiates the Java-side bridge object.
	pub fn attach() -> Result<Self, BridgeError> {
		let ctx = ndk_context::android_context();
		if ctx.vm().is_null() {
			return Err(BridgeError::MissingContext);
		}
		let vm = unsafe { JavaVM::from_raw(ctx.vm().cast())? };

		let bridge = {
			let mut env = vm.attach_current_thread()?;
			let class = env.find_class(BRIDGE_CLASS)?;
			let object = env.new_object(&class, "()V", &[])?;
			env.new_global_ref(object)?
		};

		Ok(Self {
			vm: Arc::new(vm),
			bridge,
		})
	}

	/// Runs a JNI closure on the current thread, logging failures instead
	/// of propagating them: backend failure signals belong to the vendor
	/// SDK, JNI plumbing failures only to the log.
	fn with_env<T>(
		&self,
		op: &'static str,
		f: impl FnOnce(&mut JNIEnv) -> jni::errors::Result<T>,
	) -> Option<T> {
		let mut env = match self.vm.attach_current_thread() {
			Ok(env) => env,
			Err(error) => {
				warn!(%error, op, "failed to attach current thread to JVM");
				return None;
			}
		};
		match f(&mut env) {
			Ok(value) => Some(value),
			Err(error) => {
				warn!(%error, op, "bridge call failed");
				None
			}
		}
	}

	fn call_void(&self, method: &'static str) {
		self.with_env(method, |env| {
			env.call_method(self.bridge.as_obj(), method, "()V", &[])?;
			Ok(())
		});
	}

	fn call_with_string(&self, method: &'static str, value: &str) {
		self.with_env(method, |env| {
			let arg = env.new_string(value)?;
			env.call_method(
				self.bridge.as_obj(),
				method,
				"(Ljava/lang/String;)V",
				&[JValue::Object(&arg)],
			)?;
			Ok(())
		});
	}

	fn call_with_json<T: serde::Serialize>(&self, method: &'static str, payload: &T) {
		match serde_json::to_string(payload) {
			Ok(json) => self.call_with_string(method, &json),
			Err(error) => warn!(%error, method, "failed to encode payload"),
		}
	}

	fn call_with_optional_strings(
		&self,
		method: &'static str,
		first: &str,
		second: Option<&str>,
	) {
		self.with_env(method, |env| {
			let first = env.new_string(first)?;
			let second = match second {
				Some(second) => JObject::from(env.new_string(second)?),
				None => JObject::null(),
			};
			env.call_method(
				self.bridge.as_obj(),
				method,
				"(Ljava/lang/String;Ljava/lang/String;)V",
				&[JValue::Object(&first), JValue::Object(&second)],
			)?;
			Ok(())
		});
	}

	fn call_with_bool(&self, method: &'static str, value: bool) {
		self.with_env(method, |env| {
			env.call_method(self.bridge.as_obj(), method, "(Z)V", &[JValue::Bool(value.into())])?;
			Ok(())
		});
	}

	fn call_returning_string(&self, method: &'static str) -> Option<String> {
		self.with_env(method, |env| {
			let result = env
				.call_method(self.bridge.as_obj(), method, "()Ljava/lang/String;", &[])?
				.l()?;
			if result.is_null() {
				return Ok(None);
			}
			let value: String = env.get_string(&JString::from(result))?.into();
			Ok(Some(value))
		})
		.flatten()
	}

	fn call_request(&self, method: &'static str, token: i64, detail_json: Option<&str>) {
		self.with_env(method, |env| {
			match detail_json {
				Some(detail) => {
					let detail = env.new_string(detail)?;
					env.call_method(
						self.bridge.as_obj(),
						method,
						"(JLjava/lang/String;)V",
						&[JValue::Long(token), JValue::Object(&detail)],
					)?;
				}
				None => {
					env.call_method(
						self.bridge.as_obj(),
						method,
						"(J)V",
						&[JValue::Long(token)],
					)?;
				}
			}
			Ok(())
		});
	}
}

impl NativeBackend for AndroidBackend {
	fn activate(&self, config: &ActivationConfig) {
		self.call_with_json("activate", config);
	}

	fn activate_reporter(&self, config: &ReporterConfig) {
		self.call_with_json("activateReporter", config);
	}

	fn clear_app_environment(&self) {
		self.call_void("clearAppEnvironment");
	}

	fn device_id(&self) -> Option<String> {
		self.call_returning_string("getDeviceId")
	}

	fn library_version(&self) -> String {
		self.call_returning_string("getLibraryVersion").unwrap_or_default()
	}

	fn reporter(&self, api_key: &str) -> Arc<dyn NativeReporter> {
		let handle = self.with_env("getReporter", |env| {
			let key = env.new_string(api_key)?;
			let reporter = env
				.call_method(
					self.bridge.as_obj(),
					"getReporter",
					"(Ljava/lang/String;)Lio/telemetra/bridge/TelemetraReporter;",
					&[JValue::Object(&key)],
				)?
				.l()?;
			env.new_global_ref(reporter)
		});

		match handle {
			Some(reporter) => Arc::new(AndroidReporter {
				vm: self.vm.clone(),
				reporter,
			}),
			// A broken bridge degrades to a reporter that drops everything.
			None => Arc::new(super::inert::InertReporter),
		}
	}

	fn uuid(&self) -> Option<String> {
		self.call_returning_string("getUuid")
	}

	fn pause_session(&self) {
		self.call_void("pauseSession");
	}

	fn resume_session(&self) {
		self.call_void("resumeSession");
	}

	fn put_app_environment_value(&self, key: &str, value: Option<&str>) {
		self.call_with_optional_strings("putAppEnvironmentValue", key, value);
	}

	fn put_error_environment_value(&self, key: &str, value: Option<&str>) {
		self.call_with_optional_strings("putErrorEnvironmentValue", key, value);
	}

	fn report_ad_revenue(&self, ad_revenue: &AdRevenue) {
		self.call_with_json("reportAdRevenue", ad_revenue);
	}

	fn report_app_open(&self, deeplink: &str) {
		self.call_with_string("reportAppOpen", deeplink);
	}

	fn report_ecommerce(&self, event: &EcommerceEvent) {
		self.call_with_json("reportEcommerce", event);
	}

	fn report_error(&self, message: &str, details: &ErrorDetails) {
		match serde_json::to_string(details) {
			Ok(json) => self.call_with_optional_strings("reportError", message, Some(&json)),
			Err(error) => warn!(%error, "failed to encode error details"),
		}
	}

	fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	) {
		let details_json = match details.map(serde_json::to_string).transpose() {
			Ok(json) => json,
			Err(error) => {
				warn!(%error, "failed to encode error details");
				return;
			}
		};
		self.with_env("reportErrorWithIdentifier", |env| {
			let identifier = env.new_string(identifier)?;
			let message = match message {
				Some(message) => JObject::from(env.new_string(message)?),
				None => JObject::null(),
			};
			let details = match details_json.as_deref() {
				Some(details) => JObject::from(env.new_string(details)?),
				None => JObject::null(),
			};
			env.call_method(
				self.bridge.as_obj(),
				"reportErrorWithIdentifier",
				"(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)V",
				&[
					JValue::Object(&identifier),
					JValue::Object(&message),
					JValue::Object(&details),
				],
			)?;
			Ok(())
		});
	}

	fn report_event(&self, name: &str, payload: Option<&EventPayload>) {
		let payload_json = match payload.map(serde_json::to_string).transpose() {
			Ok(json) => json,
			Err(error) => {
				warn!(%error, "failed to encode event payload");
				return;
			}
		};
		self.call_with_optional_strings("reportEvent", name, payload_json.as_deref());
	}

	fn report_revenue(&self, revenue: &Revenue) {
		self.call_with_json("reportRevenue", revenue);
	}

	fn report_unhandled_exception(&self, details: &ErrorDetails) {
		self.call_with_json("reportUnhandledException", details);
	}

	fn report_user_profile(&self, profile: &UserProfile) {
		self.call_with_json("reportUserProfile", profile);
	}

	fn request_deferred_deeplink(&self, completion: DeeplinkCompletion) {
		let token = register(Pending::Deeplink(completion));
		self.call_request("requestDeferredDeeplink", token, None);
	}

	fn request_deferred_deeplink_parameters(&self, completion: DeeplinkParametersCompletion) {
		let token = register(Pending::DeeplinkParameters(completion));
		self.call_request("requestDeferredDeeplinkParameters", token, None);
	}

	fn request_startup_params(&self, completion: StartupParamsCompletion, keys: &[StartupKey]) {
		let names: Vec<&str> = keys.iter().map(StartupKey::as_str).collect();
		let keys_json = match serde_json::to_string(&names) {
			Ok(json) => json,
			Err(error) => {
				warn!(%error, "failed to encode startup keys");
				return;
			}
		};
		let token = register(Pending::Startup(completion));
		self.call_request("requestStartupParams", token, Some(&keys_json));
	}

	fn send_events_buffer(&self) {
		self.call_void("sendEventsBuffer");
	}

	fn set_data_sending_enabled(&self, enabled: bool) {
		self.call_with_bool("setDataSendingEnabled", enabled);
	}

	fn set_location(&self, location: Option<&Location>) {
		match location {
			Some(location) => self.call_with_json("setLocation", location),
			None => self.call_void("resetLocation"),
		}
	}

	fn set_location_tracking(&self, enabled: bool) {
		self.call_with_bool("setLocationTracking", enabled);
	}

	fn set_user_profile_id(&self, id: Option<&str>) {
		self.with_env("setUserProfileId", |env| {
			let id = match id {
				Some(id) => JObject::from(env.new_string(id)?),
				None => JObject::null(),
			};
			env.call_method(
				self.bridge.as_obj(),
				"setUserProfileId",
				"(Ljava/lang/String;)V",
				&[JValue::Object(&id)],
			)?;
			Ok(())
		});
	}
}

/// Reporter handle bound to a Java-side reporter object.
struct AndroidReporter {
	vm: Arc<JavaVM>,
	reporter: GlobalRef,
}

impl AndroidReporter {
	fn with_env<T>(
		&self,
		op: &'static str,
		f: impl FnOnce(&mut JNIEnv) -> jni::errors::Result<T>,
	) -> Option<T> {
		let mut env = match self.vm.attach_current_thread() {
			Ok(env) => env,
			Err(error) => {
				warn!(%error, op, "failed to attach current thread to JVM");
				return None;
			}
		};
		match f(&mut env) {
			Ok(value) => Some(value),
			Err(error) => {
				warn!(%error, op, "reporter bridge call failed");
				None
			}
		}
	}

	fn call_with_optional_strings(
		&self,
		method: &'static str,
		first: &str,
		second: Option<&str>,
	) {
		self.with_env(method, |env| {
			let first = env.new_string(first)?;
			let second = match second {
				Some(second) => JObject::from(env.new_string(second)?),
				None => JObject::null(),
			};
			env.call_method(
				self.reporter.as_obj(),
				method,
				"(Ljava/lang/String;Ljava/lang/String;)V",
				&[JValue::Object(&first), JValue::Object(&second)],
			)?;
			Ok(())
		});
	}

	fn call_with_json<T: serde::Serialize>(&self, method: &'static str, payload: &T) {
		match serde_json::to_string(payload) {
			Ok(json) => {
				self.with_env(method, |env| {
					let json = env.new_string(&json)?;
					env.call_method(
						self.reporter.as_obj(),
						method,
						"(Ljava/lang/String;)V",
						&[JValue::Object(&json)],
					)?;
					Ok(())
				});
			}
			Err(error) => warn!(%error, method, "failed to encode payload"),
		}
	}
}

impl NativeReporter for AndroidReporter {
	fn report_event(&self, name: &str, payload: Option<&EventPayload>) {
		let payload_json = match payload.map(serde_json::to_string).transpose() {
			Ok(json) => json,
			Err(error) => {
				warn!(%error, "failed to encode event payload");
				return;
			}
		};
		self.call_with_optional_strings("reportEvent", name, payload_json.as_deref());
	}

	fn report_error(&self, message: &str, details: &ErrorDetails) {
		match serde_json::to_string(details) {
			Ok(json) => self.call_with_optional_strings("reportError", message, Some(&json)),
			Err(error) => warn!(%error, "failed to encode error details"),
		}
	}

	fn report_error_with_identifier(
		&self,
		identifier: &str,
		message: Option<&str>,
		details: Option<&ErrorDetails>,
	) {
		let details_json = match details.map(serde_json::to_string).transpose() {
			Ok(json) => json,
			Err(error) => {
				warn!(%error, "failed to encode error details");
				return;
			}
		};
		self.with_env("reportErrorWithIdentifier", |env| {
			let identifier = env.new_string(identifier)?;
			let message = match message {
				Some(message) => JObject::from(env.new_string(message)?),
				None => JObject::null(),
			};
			let details = match details_json.as_deref() {
				Some(details) => JObject::from(env.new_string(details)?),
				None => JObject::null(),
			};
			env.call_method(
				self.reporter.as_obj(),
				"reportErrorWithIdentifier",
				"(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)V",
				&[
					JValue::Object(&identifier),
					JValue::Object(&message),
					JValue::Object(&details),
				],
			)?;
			Ok(())
		});
	}

	fn report_unhandled_exception(&self, details: &ErrorDetails) {
		self.call_with_json("reportUnhandledException", details);
	}

	fn report_revenue(&self, revenue: &Revenue) {
		self.call_with_json("reportRevenue", revenue);
	}

	fn report_ad_revenue(&self, ad_revenue: &AdRevenue) {
		self.call_with_json("reportAdRevenue", ad_revenue);
	}

	fn report_ecommerce(&self, event: &EcommerceEvent) {
		self.call_with_json("reportEcommerce", event);
	}

	fn report_user_profile(&self, profile: &UserProfile) {
		self.call_with_json("reportUserProfile", profile);
	}

	fn set_user_profile_id(&self, id: Option<&str>) {
		self.with_env("setUserProfileId", |env| {
			let id = match id {
				Some(id) => JObject::from(env.new_string(id)?),
				None => JObject::null(),
			};
			env.call_method(
				self.reporter.as_obj(),
				"setUserProfileId",
				"(Ljava/lang/String;)V",
				&[JValue::Object(&id)],
			)?;
			Ok(())
		});
	}

	fn set_data_sending_enabled(&self, enabled: bool) {
		self.with_env("setDataSendingEnabled", |env| {
			env.call_method(
				self.reporter.as_obj(),
				"setDataSendingEnabled",
				"(Z)V",
				&[JValue::Bool(enabled.into())],
			)?;
			Ok(())
		});
	}

	fn send_events_buffer(&self) {
		self.with_env("sendEventsBuffer", |env| {
			env.call_method(self.reporter.as_obj(), "sendEventsBuffer", "()V", &[])?;
			Ok(())
		});
	}
}

/// A completion parked until the Java side reports back.
enum Pending {
	Deeplink(DeeplinkCompletion),
	DeeplinkParameters(DeeplinkParametersCompletion),
	Startup(StartupParamsCompletion),
}

fn pending() -> &'static Mutex<HashMap<i64, Pending>> {
	static PENDING: OnceLock<Mutex<HashMap<i64, Pending>>> = OnceLock::new();
	PENDING.get_or_init(|| Mutex::new(HashMap::new()))
}

fn register(completion: Pending) -> i64 {
	static NEXT_TOKEN: AtomicI64 = AtomicI64::new(1);
	let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
	pending()
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.insert(token, completion);
	token
}

fn take(token: i64) -> Option<Pending> {
	pending()
		.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.remove(&token)
}

fn read_string(env: &mut JNIEnv, value: JString) -> Option<String> {
	if value.is_null() {
		return None;
	}
	match env.get_string(&value) {
		Ok(value) => Some(value.into()),
		Err(error) => {
			warn!(%error, "failed to read string from JVM");
			None
		}
	}
}

/// Called by the Java bridge when a deferred deeplink resolved.
#[no_mangle]
pub extern "system" fn Java_io_telemetra_bridge_TelemetraBridge_nativeOnDeferredDeeplink(
	mut env: JNIEnv,
	_class: JClass,
	token: jlong,
	deeplink: JString,
) {
	let Some(Pending::Deeplink(completion)) = take(token) else {
		warn!(token, "no pending deeplink completion for token");
		return;
	};
	match read_string(&mut env, deeplink) {
		Some(deeplink) => completion.resolve(deeplink),
		None => completion.fail(DeeplinkFailure::new(DeeplinkFailureReason::Unknown)),
	}
}

/// Called by the Java bridge when a deferred deeplink request failed.
#[no_mangle]
pub extern "system" fn Java_io_telemetra_bridge_TelemetraBridge_nativeOnDeferredDeeplinkError(
	mut env: JNIEnv,
	_class: JClass,
	token: jlong,
	reason: JString,
	description: JString,
) {
	let Some(Pending::Deeplink(completion)) = take(token) else {
		warn!(token, "no pending deeplink completion for token");
		return;
	};
	let reason = read_string(&mut env, reason)
		.and_then(|raw| raw.parse().ok())
		.unwrap_or(DeeplinkFailureReason::Unknown);
	let mut failure = DeeplinkFailure::new(reason);
	if let Some(description) = read_string(&mut env, description) {
		failure = failure.with_description(description);
	}
	completion.fail(failure);
}

/// Called by the Java bridge when deeplink parameters resolved; `json` is a
/// string-to-string map.
#[no_mangle]
pub extern "system" fn Java_io_telemetra_bridge_TelemetraBridge_nativeOnDeeplinkParameters(
	mut env: JNIEnv,
	_class: JClass,
	token: jlong,
	json: JString,
) {
	let Some(Pending::DeeplinkParameters(completion)) = take(token) else {
		warn!(token, "no pending deeplink parameters completion for token");
		return;
	};
	let parameters = read_string(&mut env, json)
		.and_then(|raw| serde_json::from_str::<HashMap<String, String>>(&raw).ok());
	match parameters {
		Some(parameters) => completion.resolve(parameters),
		None => completion.fail(DeeplinkFailure::new(DeeplinkFailureReason::ParseError)),
	}
}

/// Called by the Java bridge when a deeplink parameters request failed.
#[no_mangle]
pub extern "system" fn Java_io_telemetra_bridge_TelemetraBridge_nativeOnDeeplinkParametersError(
	mut env: JNIEnv,
	_class: JClass,
	token: jlong,
	reason: JString,
	description: JString,
) {
	let Some(Pending::DeeplinkParameters(completion)) = take(token) else {
		warn!(token, "no pending deeplink parameters completion for token");
		return;
	};
	let reason = read_string(&mut env, reason)
		.and_then(|raw| raw.parse().ok())
		.unwrap_or(DeeplinkFailureReason::Unknown);
	let mut failure = DeeplinkFailure::new(reason);
	if let Some(description) = read_string(&mut env, description) {
		failure = failure.with_description(description);
	}
	completion.fail(failure);
}

/// Called by the Java bridge when startup identifiers resolved; `json` is a
/// string-to-string map keyed by identifier names.
#[no_mangle]
pub extern "system" fn Java_io_telemetra_bridge_TelemetraBridge_nativeOnStartupParams(
	mut env: JNIEnv,
	_class: JClass,
	token: jlong,
	json: JString,
	error: JString,
) {
	let Some(Pending::Startup(completion)) = take(token) else {
		warn!(token, "no pending startup params completion for token");
		return;
	};
	if let Some(error) = read_string(&mut env, error) {
		let error = match error.as_str() {
			"network" => StartupError::Network,
			"invalid_response" => StartupError::InvalidResponse,
			_ => StartupError::Unknown,
		};
		completion.fail(error);
		return;
	}
	let parameters = read_string(&mut env, json)
		.and_then(|raw| serde_json::from_str::<HashMap<String, String>>(&raw).ok());
	match parameters {
		Some(parameters) => completion.resolve(StartupParamsResult { parameters }),
		None => completion.fail(StartupError::InvalidResponse),
	}
}
