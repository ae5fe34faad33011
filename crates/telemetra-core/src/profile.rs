// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User profile attribute updates.
//!
//! A [`UserProfile`] is an ordered batch of attribute updates applied by the
//! backend in one report. Passing `None` for a predefined or custom value
//! resets that attribute.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum length of a user profile ID, enforced by the native backends.
pub const USER_PROFILE_ID_MAX_LEN: usize = 200;

/// Gender attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
	Male,
	Female,
	Other,
}

impl Gender {
	pub fn as_str(&self) -> &'static str {
		match self {
			Gender::Male => "male",
			Gender::Female => "female",
			Gender::Other => "other",
		}
	}
}

impl std::fmt::Display for Gender {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// A single attribute update within a profile report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileUpdate {
	/// Predefined name attribute; `None` resets it.
	Name { value: Option<String> },
	/// Predefined gender attribute; `None` resets it.
	Gender { value: Option<Gender> },
	/// Predefined birth date attribute; `None` resets it.
	BirthDate { value: Option<NaiveDate> },
	/// Predefined notifications-enabled attribute; `None` resets it.
	NotificationsEnabled { value: Option<bool> },
	/// Custom string attribute; `None` resets it.
	StringValue { key: String, value: Option<String> },
	/// Custom number attribute; `None` resets it.
	NumberValue { key: String, value: Option<f64> },
	/// Custom boolean attribute; `None` resets it.
	BoolValue { key: String, value: Option<bool> },
	/// Custom counter attribute, modified by a signed delta.
	Counter { key: String, delta: f64 },
}

/// An ordered batch of profile attribute updates.
///
/// # Example
///
/// ```
/// use telemetra_core::{Gender, UserProfile};
///
/// let profile = UserProfile::new()
///     .with_name("Robin")
///     .with_gender(Gender::Other)
///     .with_string_value("clan", "nightowls")
///     .with_counter("matches_played", 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
	updates: Vec<ProfileUpdate>,
}

impl UserProfile {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a raw update.
	pub fn apply(mut self, update: ProfileUpdate) -> Self {
		self.updates.push(update);
		self
	}

	pub fn with_name(self, name: impl Into<String>) -> Self {
		self.apply(ProfileUpdate::Name {
			value: Some(name.into()),
		})
	}

	pub fn reset_name(self) -> Self {
		self.apply(ProfileUpdate::Name { value: None })
	}

	pub fn with_gender(self, gender: Gender) -> Self {
		self.apply(ProfileUpdate::Gender {
			value: Some(gender),
		})
	}

	pub fn with_birth_date(self, date: NaiveDate) -> Self {
		self.apply(ProfileUpdate::BirthDate { value: Some(date) })
	}

	pub fn with_notifications_enabled(self, enabled: bool) -> Self {
		self.apply(ProfileUpdate::NotificationsEnabled {
			value: Some(enabled),
		})
	}

	pub fn with_string_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.apply(ProfileUpdate::StringValue {
			key: key.into(),
			value: Some(value.into()),
		})
	}

	pub fn with_number_value(self, key: impl Into<String>, value: f64) -> Self {
		self.apply(ProfileUpdate::NumberValue {
			key: key.into(),
			value: Some(value),
		})
	}

	pub fn with_bool_value(self, key: impl Into<String>, value: bool) -> Self {
		self.apply(ProfileUpdate::BoolValue {
			key: key.into(),
			value: Some(value),
		})
	}

	/// Resets a custom attribute of any value type.
	pub fn reset_value(self, key: impl Into<String>) -> Self {
		self.apply(ProfileUpdate::StringValue {
			key: key.into(),
			value: None,
		})
	}

	pub fn with_counter(self, key: impl Into<String>, delta: f64) -> Self {
		self.apply(ProfileUpdate::Counter {
			key: key.into(),
			delta,
		})
	}

	/// The updates in application order.
	pub fn updates(&self) -> &[ProfileUpdate] {
		&self.updates
	}

	pub fn is_empty(&self) -> bool {
		self.updates.is_empty()
	}

	pub fn len(&self) -> usize {
		self.updates.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn new_profile_is_empty() {
		assert!(UserProfile::new().is_empty());
	}

	#[test]
	fn updates_keep_application_order() {
		let profile = UserProfile::new()
			.with_name("Robin")
			.with_counter("wins", 1.0)
			.reset_name();

		assert_eq!(profile.len(), 3);
		assert!(matches!(
			profile.updates()[0],
			ProfileUpdate::Name { value: Some(_) }
		));
		assert!(matches!(
			profile.updates()[1],
			ProfileUpdate::Counter { .. }
		));
		assert!(matches!(
			profile.updates()[2],
			ProfileUpdate::Name { value: None }
		));
	}

	#[test]
	fn birth_date_round_trips() {
		let date = NaiveDate::from_ymd_opt(1993, 6, 21).unwrap();
		let profile = UserProfile::new().with_birth_date(date);

		let json = serde_json::to_string(&profile).unwrap();
		let parsed: UserProfile = serde_json::from_str(&json).unwrap();
		assert_eq!(profile, parsed);
	}

	#[test]
	fn update_serialization_is_tagged() {
		let profile = UserProfile::new().with_bool_value("beta_tester", true);
		let json = serde_json::to_value(&profile).unwrap();

		assert_eq!(json["updates"][0]["type"], "bool_value");
		assert_eq!(json["updates"][0]["key"], "beta_tester");
		assert_eq!(json["updates"][0]["value"], true);
	}

	#[test]
	fn gender_as_str_matches_serde() {
		for gender in [Gender::Male, Gender::Female, Gender::Other] {
			let json = serde_json::to_value(gender).unwrap();
			assert_eq!(json, gender.as_str());
		}
	}

	proptest! {
		#[test]
		fn profile_serde_roundtrip(
			name in "[a-zA-Z]{1,20}",
			counter in proptest::num::f64::NORMAL,
		) {
			let profile = UserProfile::new()
				.with_name(name)
				.with_counter("sessions", counter);

			let json = serde_json::to_string(&profile).unwrap();
			let parsed: UserProfile = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(profile, parsed);
		}

		#[test]
		fn len_matches_update_count(count in 0usize..30) {
			let mut profile = UserProfile::new();
			for i in 0..count {
				profile = profile.with_number_value(format!("k{}", i), i as f64);
			}
			prop_assert_eq!(profile.len(), count);
		}
	}
}
