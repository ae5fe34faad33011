// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error report payloads.
//!
//! The SDK exposes two error-reporting operations with different grouping
//! semantics. `report_error` groups by the stack trace carried in
//! [`ErrorDetails`]; `report_error_with_identifier` groups solely by a
//! caller-chosen identifier and never consults the stack trace. Both carry
//! the same payload type; the grouping decision is the backend's.

use serde::{Deserialize, Serialize};

/// A single resolved stack frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub function: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub module: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filename: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lineno: Option<u32>,
	/// Whether the frame is application code rather than runtime or
	/// standard library internals.
	#[serde(default)]
	pub in_app: bool,
}

/// An ordered list of frames, outermost call last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stacktrace {
	pub frames: Vec<Frame>,
}

impl Stacktrace {
	/// Returns true if no frames were captured.
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

/// Description of an error or unhandled exception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
	/// Type of the error, e.g. the Rust type path of the source error.
	pub exception_type: String,
	/// Human-readable message.
	pub message: String,
	/// Stack trace at the point the error was observed. May be empty when
	/// capture was unavailable.
	#[serde(default)]
	pub stacktrace: Stacktrace,
}

impl ErrorDetails {
	/// Creates details with an empty stack trace.
	pub fn new(exception_type: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			exception_type: exception_type.into(),
			message: message.into(),
			stacktrace: Stacktrace::default(),
		}
	}

	/// Builds details from any error value, using its type path and display
	/// output. No stack trace is captured here; attach one with
	/// [`ErrorDetails::with_stacktrace`].
	pub fn from_error<E>(error: &E) -> Self
	where
		E: std::error::Error + ?Sized,
	{
		Self::new(std::any::type_name_of_val(error), error.to_string())
	}

	/// Attaches a stack trace.
	pub fn with_stacktrace(mut self, stacktrace: Stacktrace) -> Self {
		self.stacktrace = stacktrace;
		self
	}
}
