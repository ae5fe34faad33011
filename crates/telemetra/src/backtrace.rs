// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stack capture for error reports.

use std::backtrace::Backtrace;

use rustc_demangle::demangle;

use telemetra_core::{ErrorDetails, Frame, Stacktrace};

/// Captures the current stack as a [`Stacktrace`].
///
/// Frame detail depends on compilation mode and available debug info; a
/// release build without symbols can yield sparse frames.
pub fn capture_stacktrace() -> Stacktrace {
	parse_backtrace(&Backtrace::force_capture())
}

/// Builds [`ErrorDetails`] for an error value with the current stack
/// attached.
pub fn describe_error<E>(error: &E) -> ErrorDetails
where
	E: std::error::Error + ?Sized,
{
	ErrorDetails::from_error(error).with_stacktrace(capture_stacktrace())
}

/// Parses the textual backtrace into frames.
///
/// The format is a numbered symbol line, optionally followed by an
/// `at file:line` continuation that belongs to it:
///
/// ```text
///    4: my_game::save::write_slot
///              at ./src/save.rs:88:13
/// ```
fn parse_backtrace(backtrace: &Backtrace) -> Stacktrace {
	let rendered = format!("{:#}", backtrace);
	let mut frames: Vec<Frame> = Vec::new();

	for line in rendered.lines() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		if let Some(location) = line.strip_prefix("at ") {
			// Continuation line: attach the location to the frame above.
			if let Some(frame) = frames.last_mut() {
				let (filename, lineno) = split_location(location);
				frame.filename = filename;
				frame.lineno = lineno;
			}
			continue;
		}

		if let Some(symbol) = symbol_of(line) {
			let function = demangle(symbol).to_string();
			let module = function.rfind("::").map(|idx| function[..idx].to_string());
			let in_app = !is_runtime_frame(&function);
			frames.push(Frame {
				function: Some(function),
				module,
				filename: None,
				lineno: None,
				in_app,
			});
		}
	}

	Stacktrace { frames }
}

/// Extracts the symbol from a `"  4: symbol"` line. Lines without a frame
/// number prefix are taken as bare symbols.
fn symbol_of(line: &str) -> Option<&str> {
	let symbol = match line.split_once(':') {
		Some((prefix, rest)) if prefix.trim().parse::<u32>().is_ok() => rest.trim(),
		_ => line,
	};
	(!symbol.is_empty()).then_some(symbol)
}

/// Splits a `path/file.rs:line:column` location into path and line number.
fn split_location(location: &str) -> (Option<String>, Option<u32>) {
	let mut pieces = location.rsplitn(3, ':');
	let _column = pieces.next();
	let lineno = pieces.next().and_then(|s| s.parse().ok());
	let filename = pieces.next().map(str::to_string);
	match (filename, lineno) {
		(Some(filename), lineno) => (Some(filename), lineno),
		// Fewer than three pieces means there was no line:column suffix.
		_ => (Some(location.to_string()), None),
	}
}

/// Whether a demangled symbol belongs to the language runtime or a
/// foundational crate rather than application code.
fn is_runtime_frame(function: &str) -> bool {
	const PREFIXES: &[&str] = &["std::", "core::", "alloc::", "tracing::", "backtrace::"];
	const MARKERS: &[&str] = &["::panicking::", "::panic::", "::rt::", "::sys::"];

	if function.starts_with("rust_") || function.starts_with("__rust") {
		return true;
	}
	let stripped = function.strip_prefix('<').unwrap_or(function);
	PREFIXES.iter().any(|p| stripped.starts_with(p))
		|| MARKERS.iter().any(|m| function.contains(m))
}
