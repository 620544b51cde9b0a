//! Recursive tree mapper: the core payload-transformation algorithm.
//!
//! [`map_event`] turns a normalized analytics payload into the nested JSON
//! object a destination API expects, driven by an [`EventMap`]
//! specification. The same algorithm applies at every recursion level, so
//! object and array sub-fields are mapped with their own nested specs.
//!
//! # Algorithm
//!
//! Per recursion level:
//! 1. **Attribute promotion**: an object under [`ATTRIBUTES_KEY`] is
//!    merged into a working copy of the input as lower-priority values
//!    (existing sibling keys win) and removed.
//! 2. **Default seeding**: the output starts as a shallow copy of the
//!    spec's defaults.
//! 3. **Per-key dispatch**: each input key, in insertion order, is
//!    dropped, copied, converted/recursed, or routed to the unmapped sink
//!    according to its directive. Every write is gated on the emptiness
//!    predicate, so hollow values never reach the output.
//! 4. **Finalize**: the hook attached to this level's spec, if any, runs
//!    over the completed output object.
//! 5. **Result**: an output with no keys signals "no result" (`None` from
//!    the helper); only the top-level entry point turns that into an error.
//!
//! # Shape tolerance
//!
//! Upstream events are heterogeneous and sometimes partially malformed, so
//! the recursive core never errors on a shape mismatch: a non-object where
//! an object is expected, or a non-array value for an array field, simply
//! contributes nothing for that key. This is a deliberate contract: a
//! single odd field must not block delivery of the rest of the event. The
//! one user-visible failure is [`MappingError::NoMappableFields`], raised
//! by [`map_event`] when the *entire* transformation comes up empty.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use eventmap::engine::mapper::map_event;
//! use eventmap::engine::spec::{EventMap, FieldDirective, FieldMap};
//! use serde_json::json;
//!
//! let spec = EventMap::new(HashMap::from([
//!     ("email".to_string(), FieldDirective::Copy),
//!     (
//!         "name".to_string(),
//!         FieldDirective::from(FieldMap::scalar().renamed("customerName")),
//!     ),
//! ]));
//!
//! let output = map_event(&spec, &json!({"email": "a@b.co", "name": "Ada"})).unwrap();
//! assert_eq!(output, json!({"email": "a@b.co", "customerName": "Ada"}));
//! ```

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::engine::spec::{
    EventMap, FieldDirective, FieldMap, FieldShape, OutputName, UnmappedSink, ATTRIBUTES_KEY,
};
use crate::engine::value_utils::{is_non_empty, stringify};
use crate::errors::MappingError;

/// Maps a payload with the given spec, erroring when nothing maps.
///
/// This is the top-level entry point destination actions call once per
/// event. An empty result means the payload has no fields this destination
/// understands; that is surfaced as [`MappingError::NoMappableFields`]
/// (HTTP-equivalent 400) so the caller can decide whether to block
/// delivery. All other shape problems are tolerated silently; see the
/// module docs.
pub fn map_event(spec: &EventMap, payload: &Value) -> Result<Value, MappingError> {
    match map_event_helper(spec, payload) {
        Some(output) => Ok(Value::Object(output)),
        None => {
            debug!("Mapping produced no output fields for payload");
            Err(MappingError::NoMappableFields)
        }
    }
}

/// Non-erroring recursive core of [`map_event`].
///
/// Returns `None` when the fully processed output object (after defaults,
/// per-key dispatch, and finalize) has no keys, distinct from an empty
/// object, which never escapes this function. Public so destinations can
/// embed one mapped payload inside another without triggering the
/// top-level error.
pub fn map_event_helper(spec: &EventMap, payload: &Value) -> Option<Map<String, Value>> {
    let promoted = promote_attributes(payload);
    let input = promoted.as_ref().or_else(|| payload.as_object());

    let mut output = spec.defaults.clone().unwrap_or_default();

    // Non-object input contributes no entries but still receives defaults
    // and finalize.
    if let Some(input) = input {
        for (key, value) in input {
            match spec.fields.get(key) {
                None => route_unmapped(spec, &mut output, key, value),
                Some(FieldDirective::Drop) => {
                    trace!("Dropping field {}", key);
                }
                Some(FieldDirective::Copy) => {
                    write_output(&mut output, &OutputName::Key(key.clone()), value.clone());
                }
                Some(FieldDirective::Field(field)) => {
                    apply_field(field, &mut output, key, value);
                }
            }
        }
    }

    let output = match &spec.finalize {
        Some(finalize) => finalize(output),
        None => output,
    };

    if output.is_empty() {
        None
    } else {
        Some(output)
    }
}

/// Merges a promoted-attributes object into a working copy of the input.
///
/// Returns `None` when the payload is not an object or carries no object
/// under [`ATTRIBUTES_KEY`], in which case the caller maps the payload
/// as-is. Existing input keys keep their values and positions; attribute
/// keys not already present are appended after them.
fn promote_attributes(payload: &Value) -> Option<Map<String, Value>> {
    let input = payload.as_object()?;
    if !matches!(input.get(ATTRIBUTES_KEY), Some(Value::Object(_))) {
        return None;
    }

    let mut merged = input.clone();
    let Some(Value::Object(attributes)) = merged.shift_remove(ATTRIBUTES_KEY) else {
        return None;
    };
    for (key, value) in attributes {
        merged.entry(key).or_insert(value);
    }
    Some(merged)
}

/// Routes a key with no `fields` entry to the spec's unmapped sink.
fn route_unmapped(spec: &EventMap, output: &mut Map<String, Value>, key: &str, value: &Value) {
    if !is_non_empty(value) {
        trace!("Suppressing empty unmapped field {}", key);
        return;
    }

    match &spec.unmapped {
        None => trace!("Discarding unmapped field {}", key),
        Some(UnmappedSink::Root) => {
            // Root capture keeps the original JSON type.
            output.insert(key.to_string(), value.clone());
        }
        Some(UnmappedSink::Named(name)) => {
            let sink = output
                .entry(name.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !sink.is_object() {
                *sink = Value::Object(Map::new());
            }
            if let Value::Object(sink) = sink {
                // Named sinks accept only string-typed additional
                // properties.
                sink.insert(key.to_string(), Value::String(stringify(value)));
            }
        }
    }
}

/// Applies a field descriptor: convert, shape-specific handling, then a
/// gated write under the effective output name.
fn apply_field(field: &FieldMap, output: &mut Map<String, Value>, key: &str, value: &Value) {
    let converted = match &field.convert {
        Some(convert) => convert(value),
        None => value.clone(),
    };

    let mapped = match &field.shape {
        FieldShape::Scalar | FieldShape::Array => Some(converted),
        FieldShape::Object(nested) => map_event_helper(nested, &converted).map(Value::Object),
        FieldShape::MappedArray(nested) => match converted {
            Value::Array(items) => Some(Value::Array(
                items
                    .iter()
                    .filter_map(|item| map_event_helper(nested, item).map(Value::Object))
                    .collect(),
            )),
            _ => {
                trace!("Skipping non-array value for array field {}", key);
                None
            }
        },
    };

    if let Some(mapped) = mapped {
        let name = field
            .name
            .clone()
            .unwrap_or_else(|| OutputName::Key(key.to_string()));
        write_output(output, &name, mapped);
    }
}

/// Writes a value under an output name, gated on the emptiness predicate.
///
/// Path writes create intermediate objects as needed, replacing any
/// non-object already sitting on the path.
fn write_output(output: &mut Map<String, Value>, name: &OutputName, value: Value) {
    if !is_non_empty(&value) {
        trace!("Suppressing empty value for {:?}", name);
        return;
    }

    match name {
        OutputName::Key(key) => {
            output.insert(key.clone(), value);
        }
        OutputName::Path(segments) => {
            let Some((last, intermediate)) = segments.split_last() else {
                // Empty paths are rejected by spec validation; nothing to
                // write at runtime.
                return;
            };
            let mut cursor = output;
            for segment in intermediate {
                let slot = cursor
                    .entry(segment.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                let Value::Object(next) = slot else {
                    return;
                };
                cursor = next;
            }
            cursor.insert(last.clone(), value);
        }
    }
}
