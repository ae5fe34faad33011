// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One-shot completion handles for asynchronous backend results.
//!
//! Deferred deeplinks and startup identifiers are resolved by the backend at
//! an arbitrary later time, on an arbitrary thread. A completion is handed to
//! the backend and consumed on delivery: `resolve` and `fail` take `self`, so
//! each completion fires at most once by construction.
//!
//! A completion may also never fire at all. The process can exit first, the
//! feature may be unsupported on the platform, and the inert backend drops
//! completions outright. Callers must not assume timely delivery; nothing in
//! this layer cancels, times out, or re-orders deliveries.

use std::collections::HashMap;
use std::sync::mpsc;

use telemetra_core::{DeeplinkFailure, StartupError, StartupParamsResult};

/// Completion for a deferred deeplink request.
pub struct DeeplinkCompletion {
	on_success: Box<dyn FnOnce(String) + Send + 'static>,
	on_failure: Option<Box<dyn FnOnce(DeeplinkFailure) + Send + 'static>>,
}

impl DeeplinkCompletion {
	/// Creates a completion that only observes success.
	pub fn new(on_success: impl FnOnce(String) + Send + 'static) -> Self {
		Self {
			on_success: Box::new(on_success),
			on_failure: None,
		}
	}

	/// Adds a failure observer.
	pub fn on_failure(mut self, handler: impl FnOnce(DeeplinkFailure) + Send + 'static) -> Self {
		self.on_failure = Some(Box::new(handler));
		self
	}

	/// Delivers the resolved deeplink.
	pub fn resolve(self, deeplink: impl Into<String>) {
		(self.on_success)(deeplink.into());
	}

	/// Delivers a failure. Quiet when no failure observer was attached.
	pub fn fail(self, failure: DeeplinkFailure) {
		if let Some(handler) = self.on_failure {
			handler(failure);
		}
	}

	/// Pairs a completion with a receiver, for callers who prefer to poll
	/// or block instead of installing closures.
	///
	/// Dropping the completion without delivery disconnects the receiver.
	pub fn channel() -> (Self, mpsc::Receiver<Result<String, DeeplinkFailure>>) {
		let (tx, rx) = mpsc::channel();
		let failure_tx = tx.clone();
		let completion = Self::new(move |deeplink| {
			let _ = tx.send(Ok(deeplink));
		})
		.on_failure(move |failure| {
			let _ = failure_tx.send(Err(failure));
		});
		(completion, rx)
	}
}

/// Completion for a deferred deeplink parameters request.
pub struct DeeplinkParametersCompletion {
	on_success: Box<dyn FnOnce(HashMap<String, String>) + Send + 'static>,
	on_failure: Option<Box<dyn FnOnce(DeeplinkFailure) + Send + 'static>>,
}

impl DeeplinkParametersCompletion {
	/// Creates a completion that only observes success.
	pub fn new(on_success: impl FnOnce(HashMap<String, String>) + Send + 'static) -> Self {
		Self {
			on_success: Box::new(on_success),
			on_failure: None,
		}
	}

	/// Adds a failure observer.
	pub fn on_failure(mut self, handler: impl FnOnce(DeeplinkFailure) + Send + 'static) -> Self {
		self.on_failure = Some(Box::new(handler));
		self
	}

	/// Delivers the resolved parameters.
	pub fn resolve(self, parameters: HashMap<String, String>) {
		(self.on_success)(parameters);
	}

	/// Delivers a failure. Quiet when no failure observer was attached.
	pub fn fail(self, failure: DeeplinkFailure) {
		if let Some(handler) = self.on_failure {
			handler(failure);
		}
	}

	/// Pairs a completion with a receiver.
	pub fn channel() -> (
		Self,
		mpsc::Receiver<Result<HashMap<String, String>, DeeplinkFailure>>,
	) {
		let (tx, rx) = mpsc::channel();
		let failure_tx = tx.clone();
		let completion = Self::new(move |parameters| {
			let _ = tx.send(Ok(parameters));
		})
		.on_failure(move |failure| {
			let _ = failure_tx.send(Err(failure));
		});
		(completion, rx)
	}
}

/// Completion for a startup parameters request.
pub struct StartupParamsCompletion {
	on_result: Box<dyn FnOnce(Result<StartupParamsResult, StartupError>) + Send + 'static>,
}

impl StartupParamsCompletion {
	pub fn new(
		on_result: impl FnOnce(Result<StartupParamsResult, StartupError>) + Send + 'static,
	) -> Self {
		Self {
			on_result: Box::new(on_result),
		}
	}

	/// Delivers resolved identifiers.
	pub fn resolve(self, result: StartupParamsResult) {
		(self.on_result)(Ok(result));
	}

	/// Delivers a failure.
	pub fn fail(self, error: StartupError) {
		(self.on_result)(Err(error));
	}

	/// Pairs a completion with a receiver.
	pub fn channel() -> (
		Self,
		mpsc::Receiver<Result<StartupParamsResult, StartupError>>,
	) {
		let (tx, rx) = mpsc::channel();
		let completion = Self::new(move |result| {
			let _ = tx.send(result);
		});
		(completion, rx)
	}
}
