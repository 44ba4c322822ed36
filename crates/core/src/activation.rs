use serde::{Deserialize, Serialize};

use crate::entity::KeyValue;

/// The outcome part of an activation record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivationResponse {
    /// `success`, `application error`, `action developer error` or
    /// `whisk internal error`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(
        rename = "statusCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

/// The record of one invocation of an action or one firing of a trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Name of the entity that was activated.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,
    /// Identity that caused the activation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(rename = "activationId", default, skip_serializing_if = "String::is_empty")]
    pub activation_id: String,
    /// Activation id of the parent, for activations caused by a sequence or
    /// trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// Start time, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// End time, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ActivationResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KeyValue>,
}

impl Activation {
    /// The JSON result produced by the activation, if any.
    pub fn result(&self) -> Option<&serde_json::Value> {
        self.response.as_ref().and_then(|r| r.result.as_ref())
    }

    /// Whether the activation completed successfully.
    pub fn succeeded(&self) -> bool {
        self.response.as_ref().is_some_and(|r| r.success)
    }
}

/// Log lines of an activation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivationLogs {
    #[serde(default)]
    pub logs: Vec<String>,
}
