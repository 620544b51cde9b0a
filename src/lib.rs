//! # eventmap
//!
//! eventmap is the mapping core of a destination-action pipeline: it takes
//! a normalized analytics event (track/identify/page data as arbitrary
//! nested JSON) and transforms it into the nested payload a third-party
//! marketing or analytics API expects. Each destination action declares an
//! immutable [`engine::spec::EventMap`] (which fields to copy, drop,
//! rename, convert, or recurse into, where unmapped fields go, and which
//! defaults seed the output) and reuses it for every event it processes.
//!
//! ## Architecture Overview
//!
//! - **Mapping specs** are static configuration, built once per
//!   destination action and shared across calls.
//! - **The tree mapper** applies a spec recursively: object and array
//!   sub-fields carry their own nested specs and are mapped with the same
//!   algorithm at every level.
//! - **Shape tolerance**: upstream events are heterogeneous, so mismatched
//!   shapes never error inside the mapper; they simply contribute nothing.
//!   The only user-visible error is raised at the top level, when an
//!   entire payload maps to nothing.
//!
//! The crate is pure and synchronous: no I/O, no shared mutable state, no
//! async. HTTP delivery, auth, batching, and field-schema resolution
//! belong to the host framework, which hands this crate already-resolved
//! payloads and receives a JSON-serializable object back.
//!
//! ## Error Handling
//!
//! All error strings use the format: `error-eventmap-<domain>-<number> <message>`
//!
//! ## Examples
//!
//! ```
//! use std::collections::HashMap;
//! use eventmap::engine::spec::{EventMap, FieldDirective, FieldMap, UnmappedSink};
//! use eventmap::map_event;
//! use serde_json::json;
//!
//! let spec = EventMap::new(HashMap::from([
//!     ("email".to_string(), FieldDirective::Copy),
//!     ("internalId".to_string(), FieldDirective::Drop),
//!     (
//!         "name".to_string(),
//!         FieldDirective::from(FieldMap::scalar().renamed("customerName")),
//!     ),
//! ]))
//! .with_unmapped(UnmappedSink::named("additionalProperties"));
//!
//! let payload = json!({
//!     "email": "ada@example.com",
//!     "internalId": "u-123",
//!     "name": "Ada",
//!     "plan": "pro"
//! });
//!
//! let output = map_event(&spec, &payload).unwrap();
//! assert_eq!(
//!     output,
//!     json!({
//!         "email": "ada@example.com",
//!         "customerName": "Ada",
//!         "additionalProperties": {"plan": "pro"}
//!     })
//! );
//! ```

/// Payload-mapping engine: specification model, recursive tree mapper,
/// value utilities, and stock converters.
pub mod engine;

pub(crate) mod errors;

/// Structural validation for static mapping specs, run once per
/// destination action at registration time.
pub mod validation;

/// Mapping entry points, re-exported for convenience in destination code.
pub use engine::mapper::{map_event, map_event_helper};

/// Error types, re-exported for callers matching on mapping outcomes.
pub use errors::{MappingError, SpecError};
