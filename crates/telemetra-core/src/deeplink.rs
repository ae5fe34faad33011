// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deferred deeplink failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a deferred deeplink could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeeplinkFailureReason {
	/// Deferred deeplinks are only resolvable on the first launch after
	/// install.
	NotAFirstLaunch,
	/// The store referrer was received but no deeplink could be parsed
	/// out of it.
	ParseError,
	/// No store referrer arrived.
	NoReferrer,
	Unknown,
}

impl DeeplinkFailureReason {
	pub fn as_str(&self) -> &'static str {
		match self {
			DeeplinkFailureReason::NotAFirstLaunch => "not_a_first_launch",
			DeeplinkFailureReason::ParseError => "parse_error",
			DeeplinkFailureReason::NoReferrer => "no_referrer",
			DeeplinkFailureReason::Unknown => "unknown",
		}
	}
}

impl std::fmt::Display for DeeplinkFailureReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for DeeplinkFailureReason {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"not_a_first_launch" => Ok(DeeplinkFailureReason::NotAFirstLaunch),
			"parse_error" => Ok(DeeplinkFailureReason::ParseError),
			"no_referrer" => Ok(DeeplinkFailureReason::NoReferrer),
			"unknown" => Ok(DeeplinkFailureReason::Unknown),
			_ => Err(format!("invalid deeplink failure reason: {}", s)),
		}
	}
}

/// A failed deferred deeplink request.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("deferred deeplink request failed: {reason}")]
pub struct DeeplinkFailure {
	pub reason: DeeplinkFailureReason,
	/// Backend-supplied detail, e.g. the unparseable referrer string.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

impl DeeplinkFailure {
	pub fn new(reason: DeeplinkFailureReason) -> Self {
		Self {
			reason,
			description: None,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}
