//! The dynamic value abstraction: the single boundary between tmplkit's
//! evaluator and whatever runtime value representation a host embeds.
//!
//! Every capability is optional except [`Value::kind`] — a host type only
//! implements the methods that apply to it. The evaluator loops
//! [`Value::strip_one`] to transparently unwrap pointer/reference/any-style
//! indirection before inspecting a value's kind.

mod json;
mod key;
mod kind;

pub use json::DynValue;
pub use key::{ValueKey, ValueKeyKind};
pub use kind::ValueKind;

use std::fmt;

/// Reflective access over a host's dynamic runtime values.
pub trait Value: fmt::Debug {
    /// What kind of value this is, for error messages and dispatch.
    fn kind(&self) -> ValueKind;

    fn as_bool(&self) -> Option<bool> {
        None
    }
    fn as_int(&self) -> Option<i64> {
        None
    }
    fn as_float(&self) -> Option<f64> {
        None
    }
    fn as_str(&self) -> Option<&str> {
        None
    }

    /// Length of a sequence or field-count of a record.
    fn len(&self) -> Option<usize> {
        None
    }
    fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    /// Sequence element at a non-negative, bounds-checked position.
    fn seq_get(&self, _index: usize) -> Option<&dyn Value> {
        None
    }

    /// Record field by name.
    fn field(&self, _name: &str) -> Option<&dyn Value> {
        None
    }
    /// Record field by declaration ordinal.
    fn field_at(&self, _ordinal: usize) -> Option<&dyn Value> {
        None
    }

    /// The key kind this value accepts for associative lookup, if any.
    fn key_kind(&self) -> Option<ValueKeyKind> {
        None
    }
    /// Associative lookup by typed key.
    fn map_get(&self, _key: &ValueKey) -> Option<&dyn Value> {
        None
    }
    /// All keys of an associative value, for `for` iteration.
    fn keys(&self) -> Option<Vec<ValueKey>> {
        None
    }

    /// Strip one layer of transparent indirection (pointer, reference, any
    /// wrapper). The evaluator loops this until it returns `None`.
    fn strip_one(&self) -> Option<&dyn Value> {
        None
    }

    /// A host-provided string conversion, used by value interpolation when
    /// a type exposes one (e.g. newtypes that aren't plain strings).
    fn to_output_string(&self) -> Option<String> {
        None
    }

    /// JSON serialization, used by value interpolation for sequences,
    /// records and associative containers.
    fn to_json(&self) -> Option<serde_json::Value> {
        None
    }
}

impl dyn Value + '_ {
    /// Repeatedly strips indirection until a concrete value is reached.
    pub fn strip(&self) -> &dyn Value {
        let mut current = self;
        while let Some(inner) = current.strip_one() {
            current = inner;
        }
        current
    }

    pub fn is_truthy(&self) -> Option<bool> {
        self.strip().as_bool()
    }
}
