// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Purchase revenue payloads.

use serde::{Deserialize, Serialize};

/// Information about a purchase.
///
/// Prices are carried in micros of the currency unit (one millionth), so
/// `$0.99` is `990_000` with currency `"USD"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
	/// Price in micros of the currency unit.
	pub price_micros: i64,
	/// ISO 4217 currency code.
	pub currency: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub quantity: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub product_id: Option<String>,
	/// Extra JSON attached to the purchase, as a raw string.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub payload: Option<String>,
	/// Store receipt used by the backend for purchase validation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub receipt: Option<Receipt>,
}

impl Revenue {
	/// Creates a revenue record for the given price and currency.
	pub fn new(price_micros: i64, currency: impl Into<String>) -> Self {
		Self {
			price_micros,
			currency: currency.into(),
			quantity: None,
			product_id: None,
			payload: None,
			receipt: None,
		}
	}

	/// Sets the number of purchased items.
	pub fn with_quantity(mut self, quantity: u32) -> Self {
		self.quantity = Some(quantity);
		self
	}

	/// Sets the store product identifier.
	pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
		self.product_id = Some(product_id.into());
		self
	}

	/// Attaches extra JSON to the purchase.
	pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
		self.payload = Some(payload.into());
		self
	}

	/// Attaches the store receipt.
	pub fn with_receipt(mut self, receipt: Receipt) -> Self {
		self.receipt = Some(receipt);
		self
	}
}

/// Store receipt details for purchase validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub signature: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transaction_id: Option<String>,
}

impl Receipt {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the raw receipt data.
	pub fn with_data(mut self, data: impl Into<String>) -> Self {
		self.data = Some(data.into());
		self
	}

	/// Sets the receipt signature.
	pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
		self.signature = Some(signature.into());
		self
	}

	/// Sets the store transaction identifier.
	pub fn with_transaction_id(mut self, id: impl Into<String>) -> Self {
		self.transaction_id = Some(id.into());
		self
	}
}
