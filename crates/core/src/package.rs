use serde::{Deserialize, Serialize};

use crate::entity::{EntityRef, KeyValue, impl_named};

/// Summary of an action or feed contained in a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KeyValue>,
}

/// A named grouping of actions sharing default parameters.
///
/// A package whose [`binding`](Package::binding) points at another package is
/// a binding: it inherits the target's actions and layers its own parameters
/// on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<KeyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KeyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<PackageEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feeds: Vec<PackageEntry>,
}

impl Package {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a binding named `name` to `namespace/package`.
    #[must_use]
    pub fn binding(
        name: impl Into<String>,
        namespace: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            binding: Some(EntityRef {
                namespace: namespace.into(),
                name: package.into(),
            }),
            ..Self::default()
        }
    }

    /// Whether this package is a binding to another package.
    ///
    /// The platform reports `"binding": {}` for ordinary packages.
    pub fn is_binding(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| !b.is_empty())
    }
}

impl_named!(Package);

/// Outcome of refreshing the published package bindings of a namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingUpdates {
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub updated: Vec<String>,
    #[serde(default)]
    pub deleted: Vec<String>,
}
