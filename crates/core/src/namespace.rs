use serde::{Deserialize, Serialize};

use crate::{Action, Package, Rule, Trigger};

/// The resources held by a namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceContents {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A tenant-scoped container for all other resource kinds.
///
/// Unlike the other resources, a namespace nests its children: the listing
/// only carries names, while a get fills in [`contents`](Namespace::contents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<NamespaceContents>,
}

impl Namespace {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: None,
        }
    }
}

crate::entity::impl_named!(Namespace);
