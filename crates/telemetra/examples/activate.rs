// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: activate the SDK and report a few events.
//!
//! Run with:
//!   cargo run --example activate -p telemetra
//!
//! On a desktop target the inert backend is selected, so every call
//! completes silently; on Android or iOS the same code reaches the vendor
//! SDK.

use telemetra::{
	ActivationConfig, DeeplinkCompletion, EventPayload, Revenue, TelemetraClient, UserProfile,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "debug".into()),
		)
		.init();

	let api_key = std::env::var("TELEMETRA_API_KEY").unwrap_or_else(|_| "demo-api-key".into());

	let client = TelemetraClient::platform_default();
	println!("Native library version: {}", client.library_version());

	client.activate(
		&ActivationConfig::new(&api_key)
			.with_app_version("0.1.0-example")
			.with_session_timeout(30)
			.with_logs(true),
	);

	// Plain and payload-carrying events.
	client.report_event("example_started");
	client.report_event_with_payload(
		"example_progress",
		&EventPayload::from_json(r#"{"step": 1, "mode": "demo"}"#)?,
	);

	// A purchase and a profile update.
	client.report_revenue(&Revenue::new(990_000, "USD").with_product_id("example.bundle"));
	client.report_user_profile(&UserProfile::new().with_name("Example Player"));

	// A secondary reporter; looking it up again returns the same instance.
	let partner = client.reporter("partner-demo-key");
	partner.report_event("partner_ping");

	// Deferred deeplink: on unsupported platforms the completion never
	// fires and the receiver disconnects.
	let (completion, rx) = DeeplinkCompletion::channel();
	client.request_deferred_deeplink(completion);
	match rx.try_recv() {
		Ok(result) => println!("Deferred deeplink: {:?}", result),
		Err(_) => println!("No deferred deeplink on this platform."),
	}

	client.send_events_buffer();
	println!("Done.");

	Ok(())
}
