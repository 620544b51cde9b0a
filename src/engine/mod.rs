//! Payload-mapping engine.
//!
//! The engine turns a normalized analytics payload into the nested JSON
//! payload a third-party destination API expects, driven by an immutable
//! declarative [`EventMap`](spec::EventMap) specification.
//!
//! # Components
//!
//! - [`spec`]: the mapping-specification model with field directives,
//!   output names, unmapped-field sinks, defaults, and the
//!   convert/finalize hooks.
//! - [`mapper`]: the recursive tree mapper that applies a spec to a
//!   payload, with the same algorithm at every nesting level.
//! - [`value_utils`]: the emptiness predicate and stringifier every
//!   mapping decision depends on.
//! - [`converters`]: stock convert functions destinations attach to
//!   individual fields.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use eventmap::engine::mapper::map_event;
//! use eventmap::engine::spec::{EventMap, FieldDirective, UnmappedSink};
//! use serde_json::json;
//!
//! let spec = EventMap::new(HashMap::from([
//!     ("email".to_string(), FieldDirective::Copy),
//! ]))
//! .with_unmapped(UnmappedSink::named("additionalProperties"));
//!
//! let payload = json!({"email": "a@b.co", "plan": "pro"});
//! let output = map_event(&spec, &payload).unwrap();
//! assert_eq!(
//!     output,
//!     json!({"email": "a@b.co", "additionalProperties": {"plan": "pro"}})
//! );
//! ```

pub mod converters;
pub mod mapper;
pub mod spec;
pub mod value_utils;

pub use mapper::{map_event, map_event_helper};
pub use spec::{
    EventMap, FieldDirective, FieldMap, FieldShape, OutputName, UnmappedSink, ATTRIBUTES_KEY,
};
