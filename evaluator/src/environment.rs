use std::collections::HashMap;

use value::Value;

/// Reserved environment key the evaluator writes the current switch target
/// into, for observable compatibility with the reference implementation.
/// The evaluator does not read this key back to decide case matches — the
/// target is threaded explicitly through the call stack instead.
pub const SWITCH_TARGET_KEY: &str = "_targetVal";

enum Slot<'a> {
    Ref(&'a dyn Value),
    Owned(serde_json::Value),
}

impl<'a> Slot<'a> {
    fn as_value(&self) -> &dyn Value {
        match self {
            Slot::Ref(v) => *v,
            Slot::Owned(json) => json as &dyn Value,
        }
    }
}

/// The runtime environment a template is evaluated against: a flat mapping
/// from name to dynamic value. `for` loops and switch evaluation mutate it
/// in place as specified; callers should not assume it is unchanged after
/// a call to [`crate::evaluate`].
pub struct Environment<'a> {
    slots: HashMap<String, Slot<'a>>,
}

impl<'a> Default for Environment<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Environment<'a> {
    pub fn new() -> Self {
        Self { slots: HashMap::new() }
    }

    /// Binds `name` to a borrowed host value.
    pub fn insert(&mut self, name: impl Into<String>, value: &'a dyn Value) -> &mut Self {
        self.slots.insert(name.into(), Slot::Ref(value));
        self
    }

    /// Binds `name` to an owned JSON value — the common case when building
    /// an environment directly from `serde_json::json!{...}`.
    pub fn insert_json(&mut self, name: impl Into<String>, value: serde_json::Value) -> &mut Self {
        self.slots.insert(name.into(), Slot::Owned(value));
        self
    }

    /// Builds an environment from the top-level fields of a JSON object.
    pub fn from_json_object(value: serde_json::Value) -> Self {
        let mut env = Self::new();
        if let serde_json::Value::Object(map) = value {
            for (k, v) in map {
                env.insert_json(k, v);
            }
        }
        env
    }

    pub fn get(&self, name: &str) -> Option<&dyn Value> {
        self.slots.get(name).map(Slot::as_value)
    }

    pub(crate) fn set_owned(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.slots.insert(name.into(), Slot::Owned(value));
    }

    pub(crate) fn set_switch_target(&mut self, value: serde_json::Value) {
        self.set_owned(SWITCH_TARGET_KEY, value);
    }
}
