use serde_json::Value as Json;

use crate::{Value, ValueKey, ValueKeyKind, ValueKind};

/// A ready-to-use [`Value`] implementation backed by `serde_json::Value`,
/// for callers who don't have their own domain types and just want to
/// build an environment from `serde_json::json!{...}`.
///
/// JSON has no record/associative distinction: an object satisfies both
/// field-by-name access and typed-key (string-only) associative lookup.
pub type DynValue = Json;

impl Value for Json {
    fn kind(&self) -> ValueKind {
        match self {
            Json::Null => ValueKind::Other,
            Json::Bool(_) => ValueKind::Bool,
            Json::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    ValueKind::Integer
                } else {
                    ValueKind::Float
                }
            }
            Json::String(_) => ValueKind::String,
            Json::Array(_) => ValueKind::Sequence,
            Json::Object(_) => ValueKind::Record,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        self.as_bool()
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Json::Number(n) => n.as_i64().or_else(|| n.as_u64().map(|u| u as i64)),
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Json::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Json::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            Json::Array(a) => Some(a.len()),
            Json::Object(m) => Some(m.len()),
            _ => None,
        }
    }

    fn seq_get(&self, index: usize) -> Option<&dyn Value> {
        match self {
            Json::Array(a) => a.get(index).map(|v| v as &dyn Value),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<&dyn Value> {
        match self {
            Json::Object(m) => m.get(name).map(|v| v as &dyn Value),
            _ => None,
        }
    }

    fn field_at(&self, ordinal: usize) -> Option<&dyn Value> {
        match self {
            Json::Object(m) => m.values().nth(ordinal).map(|v| v as &dyn Value),
            Json::Array(a) => a.get(ordinal).map(|v| v as &dyn Value),
            _ => None,
        }
    }

    fn key_kind(&self) -> Option<ValueKeyKind> {
        match self {
            Json::Object(_) => Some(ValueKeyKind::String),
            _ => None,
        }
    }

    fn map_get(&self, key: &ValueKey) -> Option<&dyn Value> {
        match (self, key) {
            (Json::Object(m), ValueKey::Str(s)) => m.get(s).map(|v| v as &dyn Value),
            _ => None,
        }
    }

    fn keys(&self) -> Option<Vec<ValueKey>> {
        match self {
            Json::Object(m) => Some(m.keys().cloned().map(ValueKey::Str).collect()),
            _ => None,
        }
    }

    fn to_output_string(&self) -> Option<String> {
        match self {
            Json::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_json(&self) -> Option<serde_json::Value> {
        Some(self.clone())
    }
}
