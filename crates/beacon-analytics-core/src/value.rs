// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property values carried by generic events.
//!
//! [`Value`] mirrors `serde_json::Value` with one addition: a native
//! [`Value::Date`] variant. Integrations decide per destination whether a
//! date travels as-is or as an ISO-8601 string (see [`Value::encode_dates`]).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::properties::Properties;

/// A property or trait value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	Null,
	Bool(bool),
	Number(serde_json::Number),
	String(String),
	Date(DateTime<Utc>),
	Array(Vec<Value>),
	Object(BTreeMap<String, Value>),
}

/// Formats a timestamp the way browsers render `Date#toISOString`.
///
/// ```
/// use beacon_analytics_core::iso_string;
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
/// assert_eq!(iso_string(&date), "2024-03-01T12:30:00.000Z");
/// ```
pub fn iso_string(date: &DateTime<Utc>) -> String {
	date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Value {
	/// Returns the string slice if this is a string value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the value as `f64` if it is a number.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Number(n) => n.as_f64(),
			_ => None,
		}
	}

	/// Returns the timestamp if this is a date value.
	pub fn as_date(&self) -> Option<&DateTime<Utc>> {
		match self {
			Value::Date(d) => Some(d),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Replaces every date leaf with its ISO-8601 string, walking nested
	/// arrays and objects. Non-date leaves are untouched.
	pub fn encode_dates(self) -> Value {
		match self {
			Value::Date(d) => Value::String(iso_string(&d)),
			Value::Array(items) => Value::Array(items.into_iter().map(Value::encode_dates).collect()),
			Value::Object(map) => Value::Object(
				map.into_iter()
					.map(|(k, v)| (k, v.encode_dates()))
					.collect(),
			),
			other => other,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::String(s) => f.write_str(s),
			other => write!(f, "{}", serde_json::Value::from(other.clone())),
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Value::Number(n.into())
	}
}

impl From<i64> for Value {
	fn from(n: i64) -> Self {
		Value::Number(n.into())
	}
}

impl From<u64> for Value {
	fn from(n: u64) -> Self {
		Value::Number(n.into())
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		serde_json::Number::from_f64(n)
			.map(Value::Number)
			.unwrap_or(Value::Null)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(d: DateTime<Utc>) -> Self {
		Value::Date(d)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(items: Vec<T>) -> Self {
		Value::Array(items.into_iter().map(Into::into).collect())
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		props.into_value()
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => Value::Number(n),
			serde_json::Value::String(s) => Value::String(s),
			serde_json::Value::Array(items) => {
				Value::Array(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => {
				Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
			}
		}
	}
}

impl From<Value> for serde_json::Value {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => serde_json::Value::Null,
			Value::Bool(b) => serde_json::Value::Bool(b),
			Value::Number(n) => serde_json::Value::Number(n),
			Value::String(s) => serde_json::Value::String(s),
			Value::Date(d) => serde_json::Value::String(iso_string(&d)),
			Value::Array(items) => {
				serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
			}
			Value::Object(map) => serde_json::Value::Object(
				map.into_iter()
					.map(|(k, v)| (k, serde_json::Value::from(v)))
					.collect(),
			),
		}
	}
}
