use clap::{Args, Subcommand};
use whisk_ops::OpsClient;
use whisk_ops::whisk_core::{Rule, RuleState};

use super::{Paging, print_document, print_list, qualified};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct RuleArgs {
    #[command(subcommand)]
    pub command: RuleCommand,
}

#[derive(Subcommand, Debug)]
pub enum RuleCommand {
    /// Create a rule connecting a trigger to an action.
    Create(RuleSource),
    /// Update an existing rule, creating it if needed.
    Update(RuleSource),
    /// Enable a rule.
    Enable {
        /// Rule name.
        name: String,
    },
    /// Disable a rule.
    Disable {
        /// Rule name.
        name: String,
    },
    /// Get a rule.
    Get {
        /// Rule name.
        name: String,
    },
    /// Delete a rule.
    Delete {
        /// Rule name.
        name: String,
        /// Disable the rule first.
        #[arg(long)]
        disable: bool,
    },
    /// List rules.
    List {
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Args, Debug)]
pub struct RuleSource {
    /// Rule name.
    pub name: String,
    /// Trigger that activates the rule.
    pub trigger: String,
    /// Action the rule invokes.
    pub action: String,
}

pub async fn run(ops: &OpsClient, args: &RuleArgs, format: OutputFormat) -> anyhow::Result<()> {
    let rules = ops.client().rules();
    match &args.command {
        RuleCommand::Create(source) | RuleCommand::Update(source) => {
            let overwrite = matches!(args.command, RuleCommand::Update(_));
            let rule = Rule::new(&source.name, &source.trigger, &source.action);
            let resp = rules.insert(&rule, overwrite).await?;
            let verb = if overwrite { "updated" } else { "created" };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: {verb} rule {}", source.name),
            }
        }
        RuleCommand::Enable { name } | RuleCommand::Disable { name } => {
            let state = if matches!(args.command, RuleCommand::Enable { .. }) {
                RuleState::Enable
            } else {
                RuleState::Disable
            };
            let resp = rules.set_state(name, state.as_str()).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: {state}d rule {name}"),
            }
        }
        RuleCommand::Get { name } => {
            let resp = rules.get(name).await?;
            print_document(format, &format!("ok: got rule {name}"), &resp.value)?;
        }
        RuleCommand::Delete { name, disable } => {
            if *disable {
                rules.set_state(name, RuleState::Disable.as_str()).await?;
            }
            let resp = rules.delete(name).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: deleted rule {name}"),
            }
        }
        RuleCommand::List { paging } => {
            let resp = rules.list(Some(&paging.options())).await?;
            print_list(format, "rules", &resp.value, |rule| {
                format!("{:<60} {}", qualified(&rule.namespace, &rule.name), rule.status)
            })?;
        }
    }
    Ok(())
}
