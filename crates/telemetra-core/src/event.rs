// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON payloads attached to named events.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Maximum nesting depth the native backends accept for event payloads.
///
/// A scalar has depth 0; each object or array level adds 1.
pub const MAX_JSON_DEPTH: usize = 5;

/// Errors from constructing an [`EventPayload`].
#[derive(Debug, Error)]
pub enum PayloadError {
	/// The payload nests deeper than the backends accept.
	#[error("payload nesting depth {depth} exceeds the maximum of {MAX_JSON_DEPTH}")]
	TooDeep { depth: usize },

	/// The raw string is not valid JSON.
	#[error("payload is not valid JSON: {0}")]
	InvalidJson(#[from] serde_json::Error),
}

/// A JSON payload for a named event.
///
/// Construction checks the vendor limit on nesting depth so that a payload
/// which would be rejected on-device fails fast at the call site instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventPayload(Value);

impl EventPayload {
	/// Wraps a JSON value, rejecting values nested deeper than [`MAX_JSON_DEPTH`].
	pub fn new(value: Value) -> Result<Self, PayloadError> {
		let depth = depth_of(&value);
		if depth > MAX_JSON_DEPTH {
			return Err(PayloadError::TooDeep { depth });
		}
		Ok(Self(value))
	}

	/// Parses a raw JSON string into a payload.
	pub fn from_json(raw: &str) -> Result<Self, PayloadError> {
		Self::new(serde_json::from_str(raw)?)
	}

	/// Returns the wrapped JSON value.
	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Unwraps the JSON value.
	pub fn into_value(self) -> Value {
		self.0
	}
}

/// Nesting depth of a JSON value: scalars are 0, containers add one level.
fn depth_of(value: &Value) -> usize {
	match value {
		Value::Object(map) => 1 + map.values().map(depth_of).max().unwrap_or(0),
		Value::Array(items) => 1 + items.iter().map(depth_of).max().unwrap_or(0),
		_ => 0,
	}
}
