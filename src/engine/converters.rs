//! Stock convert functions for field descriptors.
//!
//! Destination actions attach these to [`FieldMap::converted_with`] when a
//! sink needs a coerced representation of a field. All converters follow
//! the engine's shape-tolerance contract: input they cannot make sense of
//! passes through unchanged rather than erroring.
//!
//! [`FieldMap::converted_with`]: crate::engine::spec::FieldMap::converted_with

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

use crate::engine::spec::ConvertFn;
use crate::engine::value_utils::stringify;

/// Converts any value to its string representation.
///
/// Strings pass through; everything else is JSON-serialized, matching the
/// behavior of named unmapped sinks.
pub fn stringified() -> ConvertFn {
    Arc::new(|value| Value::String(stringify(value)))
}

/// Lowercases string values; non-strings pass through.
///
/// Common for destinations that require normalized identifiers (email
/// addresses, country codes) in a case-insensitive match key.
pub fn lowercased() -> ConvertFn {
    Arc::new(|value| match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other.clone(),
    })
}

/// Converts a numeric epoch-seconds value to an RFC 3339 UTC timestamp
/// string. Non-numeric and out-of-range input passes through.
pub fn epoch_seconds_to_rfc3339() -> ConvertFn {
    Arc::new(|value| {
        let Some(seconds) = value.as_f64() else {
            return value.clone();
        };
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9).round() as u32;
        match DateTime::from_timestamp(whole as i64, nanos) {
            Some(ts) => Value::String(ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => value.clone(),
        }
    })
}
