//! Resource types for the whisk serverless platform.
//!
//! Every type mirrors the platform's JSON wire format. All fields are
//! optional on the wire and are omitted when they hold their default value,
//! so a value built from [`Default`] serializes to `{}`.

pub mod action;
pub mod activation;
pub mod entity;
pub mod info;
pub mod namespace;
pub mod options;
pub mod package;
pub mod rule;
pub mod trigger;

pub use action::{Action, Exec};
pub use activation::{Activation, ActivationLogs, ActivationResponse};
pub use entity::{EntityRef, KeyValue, Limits, Named, find_value};
pub use info::Info;
pub use namespace::{Namespace, NamespaceContents};
pub use options::{ActivationListOptions, ListOptions};
pub use package::{BindingUpdates, Package, PackageEntry};
pub use rule::{InvalidRuleState, Rule, RuleState, RuleTarget};
pub use trigger::Trigger;
