// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! E-commerce funnel events.
//!
//! These mirror the funnel the native backends understand: a user views a
//! screen, views a product, puts it in the cart, starts checkout, and pays.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An application screen shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screen {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub search_query: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub categories: Vec<String>,
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub payload: HashMap<String, String>,
}

impl Screen {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
		self.search_query = Some(query.into());
		self
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.categories.push(category.into());
		self
	}
}

/// A money amount in micros of a currency unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
	pub amount_micros: i64,
	/// ISO 4217 currency code.
	pub currency: String,
}

impl Price {
	pub fn new(amount_micros: i64, currency: impl Into<String>) -> Self {
		Self {
			amount_micros,
			currency: currency.into(),
		}
	}
}

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
	/// Stock keeping unit, the stable product identifier.
	pub sku: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub categories: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub actual_price: Option<Price>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub original_price: Option<Price>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub promocodes: Vec<String>,
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub payload: HashMap<String, String>,
}

impl Product {
	pub fn new(sku: impl Into<String>) -> Self {
		Self {
			sku: sku.into(),
			name: None,
			categories: Vec::new(),
			actual_price: None,
			original_price: None,
			promocodes: Vec::new(),
			payload: HashMap::new(),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.categories.push(category.into());
		self
	}

	pub fn with_actual_price(mut self, price: Price) -> Self {
		self.actual_price = Some(price);
		self
	}

	pub fn with_original_price(mut self, price: Price) -> Self {
		self.original_price = Some(price);
		self
	}

	pub fn with_promocode(mut self, code: impl Into<String>) -> Self {
		self.promocodes.push(code.into());
		self
	}
}

/// Where a product interaction came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Referrer {
	/// Kind of source, e.g. `"button"` or `"banner"`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub identifier: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub screen: Option<Screen>,
}

impl Referrer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = Some(kind.into());
		self
	}

	pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
		self.identifier = Some(identifier.into());
		self
	}

	pub fn with_screen(mut self, screen: Screen) -> Self {
		self.screen = Some(screen);
		self
	}
}

/// A product placed in the cart, with the price it was offered at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
	pub product: Product,
	pub quantity: f64,
	/// Total revenue for this cart position.
	pub revenue: Price,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub referrer: Option<Referrer>,
}

impl CartItem {
	pub fn new(product: Product, quantity: f64, revenue: Price) -> Self {
		Self {
			product,
			quantity,
			revenue,
			referrer: None,
		}
	}

	pub fn with_referrer(mut self, referrer: Referrer) -> Self {
		self.referrer = Some(referrer);
		self
	}
}

/// A checkout order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	pub identifier: String,
	pub items: Vec<CartItem>,
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub payload: HashMap<String, String>,
}

impl Order {
	pub fn new(identifier: impl Into<String>, items: Vec<CartItem>) -> Self {
		Self {
			identifier: identifier.into(),
			items,
			payload: HashMap::new(),
		}
	}

	pub fn with_payload_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.payload.insert(key.into(), value.into());
		self
	}
}

/// One step of the e-commerce funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EcommerceEvent {
	/// The user opened a screen.
	ShowScreen { screen: Screen },
	/// The user saw a product card on a screen.
	ShowProductCard { product: Product, screen: Screen },
	/// The user opened the product details page.
	ShowProductDetails {
		product: Product,
		#[serde(skip_serializing_if = "Option::is_none")]
		referrer: Option<Referrer>,
	},
	/// The user added an item to the cart.
	AddCartItem { item: CartItem },
	/// The user removed an item from the cart.
	RemoveCartItem { item: CartItem },
	/// The user started checkout.
	BeginCheckout { order: Order },
	/// The user completed the purchase.
	Purchase { order: Order },
}

impl EcommerceEvent {
	pub fn show_screen(screen: Screen) -> Self {
		EcommerceEvent::ShowScreen { screen }
	}

	pub fn show_product_card(product: Product, screen: Screen) -> Self {
		EcommerceEvent::ShowProductCard { product, screen }
	}

	pub fn show_product_details(product: Product, referrer: Option<Referrer>) -> Self {
		EcommerceEvent::ShowProductDetails { product, referrer }
	}

	pub fn add_cart_item(item: CartItem) -> Self {
		EcommerceEvent::AddCartItem { item }
	}

	pub fn remove_cart_item(item: CartItem) -> Self {
		EcommerceEvent::RemoveCartItem { item }
	}

	pub fn begin_checkout(order: Order) -> Self {
		EcommerceEvent::BeginCheckout { order }
	}

	pub fn purchase(order: Order) -> Self {
		EcommerceEvent::Purchase { order }
	}
}
