use clap::{Args, Subcommand};
use whisk_ops::OpsClient;
use whisk_ops::whisk_core::NamespaceContents;

use super::qualified;
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct NamespaceArgs {
    #[command(subcommand)]
    pub command: NamespaceCommand,
}

#[derive(Subcommand, Debug)]
pub enum NamespaceCommand {
    /// List the namespaces the credentials can access.
    List,
    /// List the entities of a namespace.
    Get {
        /// Namespace; defaults to the configured one.
        name: Option<String>,
    },
}

/// Section heading followed by one qualified name per entity.
fn render_contents(namespace: &str, contents: &NamespaceContents) -> String {
    let sections: [(&str, Vec<&str>); 4] = [
        ("packages", contents.packages.iter().map(|p| p.name.as_str()).collect()),
        ("actions", contents.actions.iter().map(|a| a.name.as_str()).collect()),
        ("triggers", contents.triggers.iter().map(|t| t.name.as_str()).collect()),
        ("rules", contents.rules.iter().map(|r| r.name.as_str()).collect()),
    ];

    let mut out = format!("entities in namespace: {namespace}\n");
    for (heading, names) in sections {
        out.push_str(heading);
        out.push('\n');
        for name in names {
            out.push_str(&qualified(namespace, name));
            out.push('\n');
        }
    }
    out
}

pub async fn run(
    ops: &OpsClient,
    args: &NamespaceArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let namespaces = ops.client().namespaces();
    match &args.command {
        NamespaceCommand::List => {
            let resp = namespaces.list().await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => {
                    println!("namespaces");
                    for namespace in &resp.value {
                        println!("{}", namespace.name);
                    }
                }
            }
        }
        NamespaceCommand::Get { name } => {
            let name = name.as_deref().unwrap_or_else(|| ops.namespace());
            let namespace = namespaces.get(name).await?.into_value();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&namespace)?),
                OutputFormat::Text => {
                    let contents = namespace.contents.unwrap_or_default();
                    print!("{}", render_contents(&namespace.name, &contents));
                }
            }
        }
    }
    Ok(())
}
