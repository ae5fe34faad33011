// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Location overrides for reports.

use serde::{Deserialize, Serialize};

/// A geographic position used instead of the auto-collected location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
	pub latitude: f64,
	pub longitude: f64,
	/// Meters above sea level.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub altitude: Option<f64>,
	/// Horizontal accuracy radius in meters.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub horizontal_accuracy: Option<f64>,
}

impl Location {
	pub fn new(latitude: f64, longitude: f64) -> Self {
		Self {
			latitude,
			longitude,
			altitude: None,
			horizontal_accuracy: None,
		}
	}

	pub fn with_altitude(mut self, meters: f64) -> Self {
		self.altitude = Some(meters);
		self
	}

	pub fn with_horizontal_accuracy(mut self, meters: f64) -> Self {
		self.horizontal_accuracy = Some(meters);
		self
	}
}
