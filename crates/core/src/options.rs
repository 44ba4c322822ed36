//! Query option bags for list operations.
//!
//! Every field is omitted from the query string when it holds its default
//! value, so `ListOptions::default()` contributes nothing.

use serde::{Deserialize, Serialize};

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Paging and filtering options shared by the list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Maximum number of entries to return.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: u64,
    /// Number of entries to skip.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skip: u64,
    /// Only entries modified at or after this epoch-millisecond timestamp.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub since: u64,
    /// Only entries modified before this epoch-millisecond timestamp.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub upto: u64,
    /// Return full documents rather than summaries.
    #[serde(default, skip_serializing_if = "is_false")]
    pub docs: bool,
    /// Include public entities from other namespaces.
    #[serde(default, skip_serializing_if = "is_false")]
    pub public: bool,
}

impl ListOptions {
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    #[must_use]
    pub fn with_docs(mut self, docs: bool) -> Self {
        self.docs = docs;
        self
    }
}

/// List options for activations, which may additionally be filtered by the
/// name of the entity that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationListOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(flatten)]
    pub list: ListOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_serialize_to_empty_object() {
        assert_eq!(serde_json::to_string(&ListOptions::default()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&ActivationListOptions::default()).unwrap(),
            "{}"
        );
    }

    #[test]
    fn non_default_fields_are_emitted() {
        let opts = ListOptions::default().with_limit(5).with_docs(true);
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json, serde_json::json!({"limit": 5, "docs": true}));
    }

    #[test]
    fn activation_options_flatten_paging() {
        let opts = ActivationListOptions {
            name: "hello".into(),
            list: ListOptions::default().with_skip(10),
        };
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json, serde_json::json!({"name": "hello", "skip": 10}));
    }
}
