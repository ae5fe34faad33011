// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Startup identifier requests.
//!
//! Startup identifiers are resolved by the backend, possibly over the
//! network, and independently of whether the main session was activated.
//! Results arrive asynchronously through a completion handle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An identifier that can be requested from the backend at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupKey {
	/// Installation UUID.
	Uuid,
	/// Device identifier.
	DeviceId,
	/// Hash of the device identifier.
	DeviceIdHash,
}

impl StartupKey {
	pub fn as_str(&self) -> &'static str {
		match self {
			StartupKey::Uuid => "uuid",
			StartupKey::DeviceId => "device_id",
			StartupKey::DeviceIdHash => "device_id_hash",
		}
	}
}

impl std::fmt::Display for StartupKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for StartupKey {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"uuid" => Ok(StartupKey::Uuid),
			"device_id" => Ok(StartupKey::DeviceId),
			"device_id_hash" => Ok(StartupKey::DeviceIdHash),
			_ => Err(format!("invalid startup key: {}", s)),
		}
	}
}

/// The identifiers requested when the caller passes an empty list.
pub const DEFAULT_STARTUP_KEYS: [StartupKey; 3] =
	[StartupKey::Uuid, StartupKey::DeviceId, StartupKey::DeviceIdHash];

/// Identifiers returned by a startup parameters request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartupParamsResult {
	/// Resolved identifiers keyed by [`StartupKey::as_str`] names. Keys the
	/// backend could not resolve are absent.
	pub parameters: HashMap<String, String>,
}

impl StartupParamsResult {
	/// Looks up a resolved identifier.
	pub fn get(&self, key: StartupKey) -> Option<&str> {
		self.parameters.get(key.as_str()).map(String::as_str)
	}

	pub fn uuid(&self) -> Option<&str> {
		self.get(StartupKey::Uuid)
	}

	pub fn device_id(&self) -> Option<&str> {
		self.get(StartupKey::DeviceId)
	}

	pub fn device_id_hash(&self) -> Option<&str> {
		self.get(StartupKey::DeviceIdHash)
	}
}

/// Why a startup parameters request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupError {
	#[error("identifiers could not be fetched over the network")]
	Network,
	#[error("the identifier response could not be parsed")]
	InvalidResponse,
	#[error("unknown startup failure")]
	Unknown,
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn startup_key_round_trips_as_str() {
		for key in DEFAULT_STARTUP_KEYS {
			assert_eq!(key.as_str().parse::<StartupKey>().unwrap(), key);
		}
	}

	#[test]
	fn startup_key_rejects_unknown() {
		assert!("imei".parse::<StartupKey>().is_err());
	}

	#[test]
	fn result_accessors_read_by_key_name() {
		let mut parameters = HashMap::new();
		parameters.insert("uuid".to_string(), "u-123".to_string());
		parameters.insert("device_id".to_string(), "d-456".to_string());
		let result = StartupParamsResult { parameters };

		assert_eq!(result.uuid(), Some("u-123"));
		assert_eq!(result.device_id(), Some("d-456"));
		assert_eq!(result.device_id_hash(), None);
	}

	#[test]
	fn startup_error_serializes_snake_case() {
		let json = serde_json::to_value(StartupError::InvalidResponse).unwrap();
		assert_eq!(json, "invalid_response");
	}

	proptest! {
		#[test]
		fn result_serde_roundtrip(
			entries in proptest::collection::hash_map("[a-z_]{1,16}", "[a-zA-Z0-9-]{1,32}", 0..6),
		) {
			let result = StartupParamsResult { parameters: entries };
			let json = serde_json::to_string(&result).unwrap();
			let parsed: StartupParamsResult = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(result, parsed);
		}
	}
}
