// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property bags for event properties and identify traits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// An ordered map of property name to [`Value`].
///
/// # Example
///
/// ```
/// use beacon_analytics_core::Properties;
///
/// let props = Properties::new()
///     .insert("button_name", "checkout")
///     .insert("page", "/cart")
///     .insert("price", 99.99)
///     .insert("is_premium", true);
///
/// assert_eq!(props.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: BTreeMap<String, Value>,
}

impl Properties {
	/// Creates a new empty property bag.
	pub fn new() -> Self {
		Self {
			inner: BTreeMap::new(),
		}
	}

	/// Inserts a key-value pair (builder pattern).
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Inserts a key-value pair in place, returning the previous value.
	pub fn set<K, V>(&mut self, key: K, value: V) -> Option<Value>
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into())
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	/// Removes a key, returning its value if it was present.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.inner.remove(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.inner.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.inner.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns a new bag holding only the entries whose key is listed.
	///
	/// Listed keys that are absent are omitted rather than set to null.
	pub fn pick<I, S>(&self, keys: I) -> Properties
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut picked = Properties::new();
		for key in keys {
			let key = key.as_ref();
			if let Some(value) = self.inner.get(key) {
				picked.inner.insert(key.to_string(), value.clone());
			}
		}
		picked
	}

	/// Renames keys according to `(from, to)` pairs. Unlisted keys are kept.
	pub fn rename_keys(mut self, renames: &[(&str, &str)]) -> Self {
		for (from, to) in renames {
			if let Some(value) = self.inner.remove(*from) {
				self.inner.insert((*to).to_string(), value);
			}
		}
		self
	}

	/// Converts every date-valued leaf to its ISO-8601 string.
	pub fn encode_dates(self) -> Self {
		Self {
			inner: self
				.inner
				.into_iter()
				.map(|(k, v)| (k, v.encode_dates()))
				.collect(),
		}
	}

	/// Converts the bag into an object [`Value`].
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<serde_json::Value> for Properties {
	fn from(value: serde_json::Value) -> Self {
		Properties::from(Value::from(value))
	}
}

impl From<BTreeMap<String, Value>> for Properties {
	fn from(map: BTreeMap<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self {
			inner: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl IntoIterator for Properties {
	type Item = (String, Value);
	type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.into_iter()
	}
}
