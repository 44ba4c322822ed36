use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::impl_named;

/// Binds a trigger to an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,
    /// `active` or `inactive`, as reported by the platform.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// The trigger this rule listens to.
    #[serde(default, skip_serializing_if = "RuleTarget::is_empty")]
    pub trigger: RuleTarget,
    /// The action this rule invokes.
    #[serde(default, skip_serializing_if = "RuleTarget::is_empty")]
    pub action: RuleTarget,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<crate::KeyValue>,
}

impl Rule {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        trigger: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            trigger: RuleTarget::Name(trigger.into()),
            action: RuleTarget::Name(action.into()),
            ..Self::default()
        }
    }
}

impl_named!(Rule);

/// The trigger or action end of a rule.
///
/// Rules are created with plain names; the platform reports them back as
/// `{"path": "<namespace>", "name": "<name>"}` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleTarget {
    Name(String),
    Path {
        #[serde(default)]
        path: String,
        name: String,
    },
}

impl RuleTarget {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Name(name) => name.is_empty(),
            Self::Path { path, name } => path.is_empty() && name.is_empty(),
        }
    }

    /// The entity name without its namespace path.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Path { name, .. } => name,
        }
    }
}

impl Default for RuleTarget {
    fn default() -> Self {
        Self::Name(String::new())
    }
}

impl From<String> for RuleTarget {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&str> for RuleTarget {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Path { path, name } if path.is_empty() => f.write_str(name),
            Self::Path { path, name } => write!(f, "/{path}/{name}"),
        }
    }
}

/// Requested state for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleState {
    Enable,
    Disable,
}

impl RuleState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

impl fmt::Display for RuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a rule state is neither `enable` nor `disable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRuleState(pub String);

impl fmt::Display for InvalidRuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid rule state '{}', expected 'enable' or 'disable'",
            self.0
        )
    }
}

impl std::error::Error for InvalidRuleState {}

impl FromStr for RuleState {
    type Err = InvalidRuleState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("enable") {
            Ok(Self::Enable)
        } else if s.eq_ignore_ascii_case("disable") {
            Ok(Self::Disable)
        } else {
            Err(InvalidRuleState(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_state_parses_case_insensitively() {
        assert_eq!("enable".parse::<RuleState>(), Ok(RuleState::Enable));
        assert_eq!("ENABLE".parse::<RuleState>(), Ok(RuleState::Enable));
        assert_eq!("Disable".parse::<RuleState>(), Ok(RuleState::Disable));
    }

    #[test]
    fn rule_state_rejects_other_values() {
        let err = "maybe".parse::<RuleState>().unwrap_err();
        assert_eq!(err, InvalidRuleState("maybe".into()));
        assert!(" enable".parse::<RuleState>().is_err());
        assert!("enabled".parse::<RuleState>().is_err());
    }

    #[test]
    fn rule_serializes_bindings() {
        let rule = Rule::new("r", "t", "a");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "r", "trigger": "t", "action": "a"})
        );
    }

    #[test]
    fn rule_decodes_qualified_bindings() {
        let rule: Rule = serde_json::from_value(serde_json::json!({
            "name": "r",
            "status": "active",
            "trigger": {"path": "guest", "name": "t"},
            "action": {"path": "guest/utils", "name": "hello"}
        }))
        .unwrap();
        assert_eq!(rule.trigger.name(), "t");
        assert_eq!(rule.trigger.to_string(), "/guest/t");
        assert_eq!(rule.action.to_string(), "/guest/utils/hello");

        let plain: Rule =
            serde_json::from_value(serde_json::json!({"name": "r", "trigger": "t"})).unwrap();
        assert_eq!(plain.trigger, RuleTarget::from("t"));
        assert!(plain.action.is_empty());
    }
}
