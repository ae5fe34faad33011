// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Telemetra mobile analytics SDK facade.
//!
//! This crate presents one method surface over the platform-native analytics
//! implementations. Every operation is forwarded verbatim to the backend
//! selected for the build target: the Android bridge, the iOS bridge, or an
//! inert fallback that silently discards everything on unsupported
//! platforms. Analytics behavior itself (event queuing, persistence,
//! transport, retries, crash grouping) lives entirely inside the native
//! vendor SDKs behind the [`backend::NativeBackend`] seam.
//!
//! The one piece of state this layer owns is the reporter cache: secondary
//! reporters for alternate API keys are created lazily, at most once per
//! key, and shared across all callers for the process lifetime.
//!
//! # Example
//!
//! ```
//! use telemetra::{ActivationConfig, TelemetraClient};
//!
//! let client = TelemetraClient::platform_default();
//! client.activate(&ActivationConfig::new("your-api-key"));
//! client.report_event("level_started");
//!
//! // Secondary reporter for a partner key; repeated lookups return the
//! // same instance.
//! let partner = client.reporter("partner-api-key");
//! partner.report_event("partner_event");
//! ```

pub mod backend;
pub mod backtrace;
pub mod callback;
pub mod client;
pub mod reporter;

pub use backend::{platform_backend, NativeBackend, NativeReporter};
pub use backtrace::{capture_stacktrace, describe_error};
pub use callback::{DeeplinkCompletion, DeeplinkParametersCompletion, StartupParamsCompletion};
pub use client::TelemetraClient;
pub use reporter::Reporter;

pub use telemetra_core::{
	ActivationConfig, AdRevenue, AdType, CartItem, DeeplinkFailure, DeeplinkFailureReason,
	EcommerceEvent, ErrorDetails, EventPayload, Frame, Gender, Location, Order, PayloadError,
	PreloadInfo, Price, Product, ProfileUpdate, Receipt, Referrer, ReporterConfig, Revenue,
	Screen, Stacktrace, StartupError, StartupKey, StartupParamsResult, UserProfile,
	DEFAULT_STARTUP_KEYS, MAX_JSON_DEPTH, USER_PROFILE_ID_MAX_LEN,
};
