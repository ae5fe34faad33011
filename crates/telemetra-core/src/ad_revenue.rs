// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ad revenue payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Kind of ad that produced the revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdType {
	Native,
	Banner,
	Rewarded,
	Interstitial,
	Mrec,
	AppOpen,
	Other,
}

impl AdType {
	pub fn as_str(&self) -> &'static str {
		match self {
			AdType::Native => "native",
			AdType::Banner => "banner",
			AdType::Rewarded => "rewarded",
			AdType::Interstitial => "interstitial",
			AdType::Mrec => "mrec",
			AdType::AppOpen => "app_open",
			AdType::Other => "other",
		}
	}
}

impl std::fmt::Display for AdType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for AdType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"native" => Ok(AdType::Native),
			"banner" => Ok(AdType::Banner),
			"rewarded" => Ok(AdType::Rewarded),
			"interstitial" => Ok(AdType::Interstitial),
			"mrec" => Ok(AdType::Mrec),
			"app_open" => Ok(AdType::AppOpen),
			"other" => Ok(AdType::Other),
			_ => Err(format!("invalid ad type: {}", s)),
		}
	}
}

/// Revenue produced by showing an ad.
///
/// Amounts are carried in micros of the currency unit, matching [`crate::Revenue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRevenue {
	/// Amount in micros of the currency unit.
	pub amount_micros: i64,
	/// ISO 4217 currency code.
	pub currency: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ad_type: Option<AdType>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ad_network: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ad_unit_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ad_unit_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ad_placement_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ad_placement_name: Option<String>,
	/// Mediator-reported precision of the amount, e.g. `"exact"` or `"estimated"`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub precision: Option<String>,
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub payload: HashMap<String, String>,
}

impl AdRevenue {
	/// Creates an ad revenue record for the given amount and currency.
	pub fn new(amount_micros: i64, currency: impl Into<String>) -> Self {
		Self {
			amount_micros,
			currency: currency.into(),
			ad_type: None,
			ad_network: None,
			ad_unit_id: None,
			ad_unit_name: None,
			ad_placement_id: None,
			ad_placement_name: None,
			precision: None,
			payload: HashMap::new(),
		}
	}

	pub fn with_ad_type(mut self, ad_type: AdType) -> Self {
		self.ad_type = Some(ad_type);
		self
	}

	pub fn with_ad_network(mut self, network: impl Into<String>) -> Self {
		self.ad_network = Some(network.into());
		self
	}

	pub fn with_ad_unit_id(mut self, id: impl Into<String>) -> Self {
		self.ad_unit_id = Some(id.into());
		self
	}

	pub fn with_ad_unit_name(mut self, name: impl Into<String>) -> Self {
		self.ad_unit_name = Some(name.into());
		self
	}

	pub fn with_ad_placement_id(mut self, id: impl Into<String>) -> Self {
		self.ad_placement_id = Some(id.into());
		self
	}

	pub fn with_ad_placement_name(mut self, name: impl Into<String>) -> Self {
		self.ad_placement_name = Some(name.into());
		self
	}

	pub fn with_precision(mut self, precision: impl Into<String>) -> Self {
		self.precision = Some(precision.into());
		self
	}

	/// Adds a payload entry.
	pub fn with_payload_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.payload.insert(key.into(), value.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn ad_type_round_trips_as_str() {
		let all = [
			AdType::Native,
			AdType::Banner,
			AdType::Rewarded,
			AdType::Interstitial,
			AdType::Mrec,
			AdType::AppOpen,
			AdType::Other,
		];
		for ad_type in all {
			assert_eq!(ad_type.as_str().parse::<AdType>().unwrap(), ad_type);
		}
	}

	#[test]
	fn ad_type_rejects_unknown() {
		assert!("popup".parse::<AdType>().is_err());
	}

	#[test]
	fn ad_revenue_builder_chain() {
		let revenue = AdRevenue::new(120_000, "USD")
			.with_ad_type(AdType::Rewarded)
			.with_ad_network("admob")
			.with_ad_unit_id("unit-1")
			.with_ad_placement_name("level-end")
			.with_precision("exact")
			.with_payload_entry("mediation", "max");

		assert_eq!(revenue.ad_type, Some(AdType::Rewarded));
		assert_eq!(revenue.ad_network.as_deref(), Some("admob"));
		assert_eq!(revenue.payload["mediation"], "max");
	}

	#[test]
	fn minimal_ad_revenue_serializes_two_fields() {
		let json = serde_json::to_value(AdRevenue::new(5, "GBP")).unwrap();
		assert_eq!(json.as_object().unwrap().len(), 2);
	}

	proptest! {
		#[test]
		fn ad_revenue_serde_roundtrip(
			amount in proptest::num::i64::ANY,
			currency in "[A-Z]{3}",
			network in proptest::option::of("[a-z]{1,12}"),
		) {
			let mut revenue = AdRevenue::new(amount, currency);
			if let Some(network) = network {
				revenue = revenue.with_ad_network(network);
			}

			let json = serde_json::to_string(&revenue).unwrap();
			let parsed: AdRevenue = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(revenue, parsed);
		}
	}
}
