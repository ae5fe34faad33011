// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Telemetra mobile analytics SDK.
//!
//! This crate holds the configuration and payload types that flow through the
//! SDK facade into the platform-native backends. It is pure data: every type
//! here is serde-serializable and performs no I/O. The facade crate
//! (`telemetra`) forwards these values to whichever native implementation is
//! active for the build target.
//!
//! # Overview
//!
//! - Activation and reporter configuration ([`ActivationConfig`], [`ReporterConfig`])
//! - Named events with JSON payloads ([`EventPayload`])
//! - Error reports with stack traces ([`ErrorDetails`], [`Stacktrace`], [`Frame`])
//! - Purchase and ad revenue ([`Revenue`], [`AdRevenue`])
//! - E-commerce funnel events ([`EcommerceEvent`])
//! - User profile attribute updates ([`UserProfile`])
//! - Location overrides ([`Location`])
//! - Startup identifier requests ([`StartupKey`], [`StartupParamsResult`])
//! - Deferred deeplink failures ([`DeeplinkFailure`])

pub mod ad_revenue;
pub mod config;
pub mod deeplink;
pub mod ecommerce;
pub mod error_report;
pub mod event;
pub mod location;
pub mod profile;
pub mod revenue;
pub mod startup;

pub use ad_revenue::{AdRevenue, AdType};
pub use config::{ActivationConfig, PreloadInfo, ReporterConfig};
pub use deeplink::{DeeplinkFailure, DeeplinkFailureReason};
pub use ecommerce::{CartItem, EcommerceEvent, Order, Price, Product, Referrer, Screen};
pub use error_report::{ErrorDetails, Frame, Stacktrace};
pub use event::{EventPayload, PayloadError, MAX_JSON_DEPTH};
pub use location::Location;
pub use profile::{Gender, ProfileUpdate, UserProfile, USER_PROFILE_ID_MAX_LEN};
pub use revenue::{Receipt, Revenue};
pub use startup::{StartupError, StartupKey, StartupParamsResult, DEFAULT_STARTUP_KEYS};
