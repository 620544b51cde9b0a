use thiserror::Error;

/// Errors raised while mapping an event payload.
///
/// The recursive mapper core never errors; this surfaces only at the
/// top-level entry point.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("error-eventmap-mapper-1 Payload has no fields this destination understands")]
    NoMappableFields,
}

impl MappingError {
    /// Machine-readable error code for the host framework's response
    /// shaping.
    pub fn code(&self) -> &'static str {
        match self {
            MappingError::NoMappableFields => "INVALID_REQUEST_DATA",
        }
    }

    /// HTTP-equivalent status for the host framework's response shaping.
    pub fn status(&self) -> u16 {
        match self {
            MappingError::NoMappableFields => 400,
        }
    }
}

/// Errors raised by one-time validation of a static mapping spec.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpecError {
    #[error("error-eventmap-spec-1 Output path is empty for field: {field}")]
    EmptyOutputPath { field: String },

    #[error("error-eventmap-spec-2 Output name has an empty segment for field: {field}")]
    EmptyOutputSegment { field: String },

    #[error("error-eventmap-spec-3 Unmapped sink name is empty")]
    EmptyUnmappedSinkName,
}
