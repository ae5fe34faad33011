// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for activating the analytics session and secondary reporters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Configuration for activating the main analytics session.
///
/// Only the API key is required; every other field is an optional knob that
/// the native backend interprets. Fields left unset keep the backend's own
/// defaults.
///
/// # Example
///
/// ```
/// use telemetra_core::ActivationConfig;
///
/// let config = ActivationConfig::new("a1b2c3d4")
///     .with_app_version("1.4.0")
///     .with_session_timeout(30)
///     .with_logs(true);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationConfig {
	/// API key the session reports under.
	pub api_key: String,
	/// Application version override. When unset the backend reads it from
	/// the platform package metadata.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub app_version: Option<String>,
	/// Session timeout in seconds.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub session_timeout: Option<u32>,
	/// Location to attach to reports instead of the auto-collected one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<Location>,
	/// Whether the backend collects location information at all.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location_tracking: Option<bool>,
	/// Whether the backend is allowed to send data to the server.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data_sending_enabled: Option<bool>,
	/// Whether the backend emits its own diagnostic logs.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub logs: Option<bool>,
	/// Initial user profile ID, at most [`crate::USER_PROFILE_ID_MAX_LEN`] characters.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_profile_id: Option<String>,
	/// Cap on locally stored pending reports.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_reports_in_db_count: Option<u32>,
	/// Treat the first activation as an update of an already installed app.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_activation_as_update: Option<bool>,
	/// Attribution info for preinstalled applications.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub preload_info: Option<PreloadInfo>,
}

impl ActivationConfig {
	/// Creates a configuration with the given API key and everything else unset.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			app_version: None,
			session_timeout: None,
			location: None,
			location_tracking: None,
			data_sending_enabled: None,
			logs: None,
			user_profile_id: None,
			max_reports_in_db_count: None,
			first_activation_as_update: None,
			preload_info: None,
		}
	}

	/// Sets the application version override.
	pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
		self.app_version = Some(version.into());
		self
	}

	/// Sets the session timeout in seconds.
	pub fn with_session_timeout(mut self, seconds: u32) -> Self {
		self.session_timeout = Some(seconds);
		self
	}

	/// Sets a fixed location for all reports.
	pub fn with_location(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}

	/// Enables or disables location collection.
	pub fn with_location_tracking(mut self, enabled: bool) -> Self {
		self.location_tracking = Some(enabled);
		self
	}

	/// Enables or disables data sending.
	pub fn with_data_sending_enabled(mut self, enabled: bool) -> Self {
		self.data_sending_enabled = Some(enabled);
		self
	}

	/// Enables or disables backend diagnostic logging.
	pub fn with_logs(mut self, enabled: bool) -> Self {
		self.logs = Some(enabled);
		self
	}

	/// Sets the initial user profile ID.
	pub fn with_user_profile_id(mut self, id: impl Into<String>) -> Self {
		self.user_profile_id = Some(id.into());
		self
	}

	/// Sets the cap on locally stored pending reports.
	pub fn with_max_reports_in_db_count(mut self, count: u32) -> Self {
		self.max_reports_in_db_count = Some(count);
		self
	}

	/// Marks the first activation as an app update.
	pub fn with_first_activation_as_update(mut self, enabled: bool) -> Self {
		self.first_activation_as_update = Some(enabled);
		self
	}

	/// Attaches preinstall attribution info.
	pub fn with_preload_info(mut self, info: PreloadInfo) -> Self {
		self.preload_info = Some(info);
		self
	}
}

/// Attribution info for applications preinstalled on the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreloadInfo {
	pub tracking_id: String,
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub additional_params: HashMap<String, String>,
}

impl PreloadInfo {
	/// Creates preload info with the given tracking ID.
	pub fn new(tracking_id: impl Into<String>) -> Self {
		Self {
			tracking_id: tracking_id.into(),
			additional_params: HashMap::new(),
		}
	}

	/// Adds an additional attribution parameter.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.additional_params.insert(key.into(), value.into());
		self
	}
}

/// Configuration for a secondary reporter scoped to an alternate API key.
///
/// Activating a reporter ahead of first use lets the backend apply these
/// settings before any events are queued for that key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterConfig {
	/// API key the reporter reports under.
	pub api_key: String,
	/// Session timeout in seconds.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub session_timeout: Option<u32>,
	/// Whether the backend emits its own diagnostic logs for this reporter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub logs: Option<bool>,
	/// Whether this reporter is allowed to send data.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data_sending_enabled: Option<bool>,
	/// Cap on locally stored pending reports for this key.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_reports_in_db_count: Option<u32>,
	/// Initial user profile ID for this reporter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_profile_id: Option<String>,
}

impl ReporterConfig {
	/// Creates a reporter configuration with the given API key.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			session_timeout: None,
			logs: None,
			data_sending_enabled: None,
			max_reports_in_db_count: None,
			user_profile_id: None,
		}
	}

	/// Sets the session timeout in seconds.
	pub fn with_session_timeout(mut self, seconds: u32) -> Self {
		self.session_timeout = Some(seconds);
		self
	}

	/// Enables or disables backend diagnostic logging.
	pub fn with_logs(mut self, enabled: bool) -> Self {
		self.logs = Some(enabled);
		self
	}

	/// Enables or disables data sending for this reporter.
	pub fn with_data_sending_enabled(mut self, enabled: bool) -> Self {
		self.data_sending_enabled = Some(enabled);
		self
	}

	/// Sets the cap on locally stored pending reports.
	pub fn with_max_reports_in_db_count(mut self, count: u32) -> Self {
		self.max_reports_in_db_count = Some(count);
		self
	}

	/// Sets the initial user profile ID.
	pub fn with_user_profile_id(mut self, id: impl Into<String>) -> Self {
		self.user_profile_id = Some(id.into());
		self
	}
}
