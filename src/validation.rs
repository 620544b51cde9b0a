//! One-time structural validation for static mapping specs.
//!
//! Destination actions validate their [`EventMap`] once at registration,
//! before any event flows through it. Runtime mapping deliberately never
//! validates: the engine tolerates mismatched payload shapes, but a spec
//! that can never write anywhere (an empty output path, a nameless sink)
//! is a configuration bug and should fail loudly up front.

use crate::engine::spec::{EventMap, FieldDirective, FieldShape, OutputName, UnmappedSink};
use crate::errors::SpecError;

/// Validates a mapping spec and every nested spec it contains.
///
/// Rejects output names with no segments or empty segments and named
/// unmapped sinks with an empty name. Returns the first problem found.
pub fn validate_event_map(spec: &EventMap) -> Result<(), SpecError> {
    if let Some(UnmappedSink::Named(name)) = &spec.unmapped {
        if name.is_empty() {
            return Err(SpecError::EmptyUnmappedSinkName);
        }
    }

    for (key, directive) in &spec.fields {
        let FieldDirective::Field(field) = directive else {
            continue;
        };

        match &field.name {
            Some(OutputName::Key(name)) if name.is_empty() => {
                return Err(SpecError::EmptyOutputSegment { field: key.clone() });
            }
            Some(OutputName::Path(path)) if path.is_empty() => {
                return Err(SpecError::EmptyOutputPath { field: key.clone() });
            }
            Some(OutputName::Path(path)) if path.iter().any(String::is_empty) => {
                return Err(SpecError::EmptyOutputSegment { field: key.clone() });
            }
            _ => {}
        }

        match &field.shape {
            FieldShape::Object(nested) | FieldShape::MappedArray(nested) => {
                validate_event_map(nested)?;
            }
            FieldShape::Scalar | FieldShape::Array => {}
        }
    }

    Ok(())
}
