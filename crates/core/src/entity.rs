//! Building blocks shared by every resource kind.

use serde::{Deserialize, Serialize};

/// A single `key`/`value` pair, used for both parameters and annotations.
///
/// The value is arbitrary JSON so that bound parameters keep their type
/// across a create/get round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: serde_json::Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Look up `key` in a parameter or annotation list.
pub fn find_value<'a>(pairs: &'a [KeyValue], key: &str) -> Option<&'a serde_json::Value> {
    pairs.iter().find(|kv| kv.key == key).map(|kv| &kv.value)
}

/// Resource limits enforced by the platform for actions and triggers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Execution timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Memory ceiling in megabytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    /// Log size ceiling in megabytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<u64>,
}

impl Limits {
    pub fn is_empty(&self) -> bool {
        self.timeout.is_none() && self.memory.is_none() && self.logs.is_none()
    }
}

/// Fully qualified reference to another entity, e.g. the target of a
/// package binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl EntityRef {
    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.name.is_empty()
    }
}

/// Implemented by every named resource so routes can be derived from it.
pub trait Named {
    /// The resource's name; may be qualified as `package/entity`.
    fn name(&self) -> &str;
}

macro_rules! impl_named {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::entity::Named for $ty {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

pub(crate) use impl_named;
