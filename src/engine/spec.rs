//! Declarative mapping-specification model.
//!
//! An [`EventMap`] describes how one nested JSON shape becomes another:
//! which input keys are copied, dropped, renamed, converted, or recursed
//! into, where unmapped keys go, which defaults seed the output, and an
//! optional finalize hook that runs over the completed output.
//!
//! The model is a closed set of typed variants: field entries are
//! [`FieldDirective`]s (`Copy`, `Drop`, or a full [`FieldMap`] descriptor),
//! output names are [`OutputName`]s (single key or nested path), and the
//! unmapped-field destination is an [`UnmappedSink`] (a named sub-object or
//! the output root). Specs are immutable static configuration: a
//! destination action builds its `EventMap` once and reuses it for every
//! event it processes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Input key whose object value is promoted into its enclosing level
/// before mapping begins.
///
/// When an input object (at any recursion level) carries this key with an
/// object value, those attributes are merged into the level as
/// lower-priority values: an existing sibling key always wins over a
/// same-named attribute. The key itself never appears in the output. This
/// is part of the upstream wire contract and is not configurable per spec.
pub const ATTRIBUTES_KEY: &str = "friendbuyAttributes";

/// Pure value transform applied to a field before shape-specific handling.
///
/// Converts are total: they return a value for any input and never fail.
/// A convert that cannot make sense of its input should pass it through
/// (or return something the emptiness gate will suppress).
pub type ConvertFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Post-processing hook applied to the fully built output object of one
/// recursion level. Runs after every field has been dispatched and before
/// the level's emptiness check.
pub type FinalizeFn = Arc<dyn Fn(Map<String, Value>) -> Map<String, Value> + Send + Sync>;

/// Declarative description of how to transform one nested-object shape
/// into another.
#[derive(Clone, Default)]
pub struct EventMap {
    /// Per-input-key directives. Keys absent from this map are "unmapped"
    /// and routed per [`EventMap::unmapped`].
    pub fields: HashMap<String, FieldDirective>,
    /// Where unmapped input keys go; `None` discards them.
    pub unmapped: Option<UnmappedSink>,
    /// Partial output merged in as defaults before processing. A default
    /// survives only if no mapped or unmapped value overwrites it.
    pub defaults: Option<Map<String, Value>>,
    /// Optional hook over this level's completed output object.
    pub finalize: Option<FinalizeFn>,
}

impl EventMap {
    /// Creates a spec with the given field directives and nothing else.
    pub fn new(fields: HashMap<String, FieldDirective>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Routes unmapped input keys to the given sink.
    pub fn with_unmapped(mut self, sink: UnmappedSink) -> Self {
        self.unmapped = Some(sink);
        self
    }

    /// Seeds the output with default key/value pairs.
    pub fn with_defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Attaches a finalize hook to this level.
    pub fn with_finalize<F>(mut self, finalize: F) -> Self
    where
        F: Fn(Map<String, Value>) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.finalize = Some(Arc::new(finalize));
        self
    }
}

impl fmt::Debug for EventMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventMap")
            .field("fields", &self.fields)
            .field("unmapped", &self.unmapped)
            .field("defaults", &self.defaults)
            .field("finalize", &self.finalize.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// What to do with one input key.
#[derive(Clone, Debug)]
pub enum FieldDirective {
    /// Copy the field unchanged under its input key.
    Copy,
    /// Discard the field unconditionally. A `Drop` entry still counts as
    /// mapped: the key is never routed to the unmapped sink.
    Drop,
    /// Apply the full field descriptor.
    Field(FieldMap),
}

impl From<FieldMap> for FieldDirective {
    fn from(field: FieldMap) -> Self {
        FieldDirective::Field(field)
    }
}

/// Field descriptor: output name, optional convert, and shape.
#[derive(Clone, Default)]
pub struct FieldMap {
    /// Output key or nested path; defaults to the input key when `None`.
    pub name: Option<OutputName>,
    /// Value transform applied before shape-specific handling.
    pub convert: Option<ConvertFn>,
    /// How the (converted) value is treated.
    pub shape: FieldShape,
}

impl FieldMap {
    /// Scalar passthrough descriptor, equivalent to [`FieldDirective::Copy`]
    /// until a name or convert is attached.
    pub fn scalar() -> Self {
        Self::default()
    }

    /// Descriptor for a nested object mapped with its own spec.
    pub fn object(spec: EventMap) -> Self {
        Self {
            shape: FieldShape::Object(spec),
            ..Self::default()
        }
    }

    /// Descriptor for an array whose elements are each mapped with the
    /// given spec. Elements that map to nothing are dropped.
    pub fn array_of(spec: EventMap) -> Self {
        Self {
            shape: FieldShape::MappedArray(spec),
            ..Self::default()
        }
    }

    /// Descriptor for an array copied through unchanged.
    pub fn array() -> Self {
        Self {
            shape: FieldShape::Array,
            ..Self::default()
        }
    }

    /// Writes the field under a different output name or nested path.
    pub fn renamed(mut self, name: impl Into<OutputName>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Applies a convert function to the raw value before shape handling.
    pub fn converted<F>(mut self, convert: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.convert = Some(Arc::new(convert));
        self
    }

    /// Applies an already-shared convert function.
    pub fn converted_with(mut self, convert: ConvertFn) -> Self {
        self.convert = Some(convert);
        self
    }
}

impl fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMap")
            .field("name", &self.name)
            .field("convert", &self.convert.as_ref().map(|_| "<fn>"))
            .field("shape", &self.shape)
            .finish()
    }
}

/// How a field's (converted) value is treated.
#[derive(Clone, Debug, Default)]
pub enum FieldShape {
    /// Use the value as-is.
    #[default]
    Scalar,
    /// Recurse into the value as an object, mapped with the nested spec.
    Object(EventMap),
    /// Map each array element with the nested spec, dropping elements
    /// that map to nothing and preserving the order of the rest.
    MappedArray(EventMap),
    /// Copy an array through unchanged, without element mapping.
    Array,
}

/// Output location for a mapped field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputName {
    /// A single output key.
    Key(String),
    /// An ordered path of nested keys; intermediate objects are created
    /// as needed when writing.
    Path(Vec<String>),
}

impl From<&str> for OutputName {
    fn from(key: &str) -> Self {
        OutputName::Key(key.to_string())
    }
}

impl From<String> for OutputName {
    fn from(key: String) -> Self {
        OutputName::Key(key)
    }
}

impl From<Vec<&str>> for OutputName {
    fn from(path: Vec<&str>) -> Self {
        OutputName::Path(path.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for OutputName {
    fn from(path: Vec<String>) -> Self {
        OutputName::Path(path)
    }
}

/// Where unmapped input keys are written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnmappedSink {
    /// A named sub-object of the output. Values routed here are
    /// stringified, since such "additional properties" sinks accept only
    /// string-typed values.
    Named(String),
    /// The top-level output object itself. Values routed here keep their
    /// original JSON types.
    Root,
}

impl UnmappedSink {
    /// Convenience constructor for a named sink.
    pub fn named(name: impl Into<String>) -> Self {
        UnmappedSink::Named(name.into())
    }
}
