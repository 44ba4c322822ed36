use serde::{Deserialize, Serialize};

use crate::entity::{KeyValue, Limits, impl_named};

/// The code and runtime of an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exec {
    /// Runtime kind, e.g. `nodejs:20`, `python:3`, or `blackbox`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Source code, or base64 when [`Exec::binary`] is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Container image for `blackbox` actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional initializer payload for the runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,
    /// Entry point function name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Whether `code` holds a base64-encoded archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<bool>,
}

/// A deployable function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    /// Action name, optionally qualified by its package (`pkg/name`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Semantic version assigned by the platform on every update.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<Exec>,

    /// Default parameters bound to the action.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<KeyValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KeyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
}

impl Action {
    /// Create an action with only a name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach code for the given runtime kind.
    #[must_use]
    pub fn with_exec(mut self, kind: impl Into<String>, code: impl Into<String>) -> Self {
        self.exec = Some(Exec {
            kind: kind.into(),
            code: Some(code.into()),
            ..Exec::default()
        });
        self
    }

    /// Add a default parameter.
    #[must_use]
    pub fn with_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.parameters.push(KeyValue::new(key, value));
        self
    }

    /// Add an annotation.
    #[must_use]
    pub fn with_annotation(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.annotations.push(KeyValue::new(key, value));
        self
    }
}

impl_named!(Action);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only_action_serializes_to_name() {
        let json = serde_json::to_string(&Action::new("foo")).unwrap();
        assert_eq!(json, r#"{"name":"foo"}"#);
    }

    #[test]
    fn action_deserializes_platform_document() {
        let json = r#"{
            "namespace": "guest",
            "name": "hello",
            "version": "0.0.2",
            "publish": false,
            "exec": {"kind": "nodejs:20", "code": "function main() {}", "binary": false},
            "parameters": [{"key": "greeting", "value": "hi"}],
            "annotations": [{"key": "exec", "value": "nodejs:20"}],
            "limits": {"timeout": 60000, "memory": 256, "logs": 10}
        }"#;

        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action.namespace, "guest");
        assert_eq!(action.version, "0.0.2");
        let exec = action.exec.unwrap();
        assert_eq!(exec.kind, "nodejs:20");
        assert_eq!(exec.binary, Some(false));
        assert_eq!(action.parameters[0].value, serde_json::json!("hi"));
        assert_eq!(action.limits.unwrap().memory, Some(256));
    }

    #[test]
    fn builder_helpers_populate_fields() {
        let action = Action::new("hello")
            .with_exec("python:3", "def main(args): return args")
            .with_parameter("n", 3)
            .with_annotation("web-export", true);

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["exec"]["kind"], "python:3");
        assert_eq!(value["parameters"][0], serde_json::json!({"key": "n", "value": 3}));
        assert_eq!(value["annotations"][0]["value"], true);
    }
}
