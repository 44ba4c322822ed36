use clap::{Args, Subcommand};
use whisk_ops::OpsClient;
use whisk_ops::whisk_core::{Activation, ActivationListOptions};

use super::{Paging, print_document, print_list};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ActivationArgs {
    #[command(subcommand)]
    pub command: ActivationCommand,
}

#[derive(Subcommand, Debug)]
pub enum ActivationCommand {
    /// List activations.
    List {
        /// Only activations of this action or trigger.
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        paging: Paging,
        /// Only activations started after this epoch millisecond.
        #[arg(long)]
        since: Option<u64>,
        /// Only activations started before this epoch millisecond.
        #[arg(long)]
        upto: Option<u64>,
        /// Return full activation records.
        #[arg(short, long)]
        full: bool,
    },
    /// Get an activation.
    Get {
        /// Activation id.
        id: String,
    },
    /// Get the logs of an activation.
    Logs {
        /// Activation id.
        id: String,
    },
    /// Get the result of an activation.
    Result {
        /// Activation id.
        id: String,
    },
}

fn row(activation: &Activation) -> String {
    let outcome = match &activation.response {
        Some(response) if !response.status.is_empty() => response.status.as_str(),
        _ => "",
    };
    format!("{:<34} {:<40} {outcome}", activation.activation_id, activation.name)
}

pub async fn run(
    ops: &OpsClient,
    args: &ActivationArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let activations = ops.client().activations();
    match &args.command {
        ActivationCommand::List {
            name,
            paging,
            since,
            upto,
            full,
        } => {
            let mut list = paging.options().with_docs(*full);
            list.since = since.unwrap_or_default();
            list.upto = upto.unwrap_or_default();
            let options = ActivationListOptions {
                name: name.clone().unwrap_or_default(),
                list,
            };
            let resp = activations.list(Some(&options)).await?;
            print_list(format, "activations", &resp.value, row)?;
        }
        ActivationCommand::Get { id } => {
            let resp = activations.get(id).await?;
            print_document(format, &format!("ok: got activation {id}"), &resp.value)?;
        }
        ActivationCommand::Logs { id } => {
            let logs = activations.logs(id).await?.into_value();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&logs)?),
                OutputFormat::Text => {
                    for line in &logs.logs {
                        println!("{line}");
                    }
                }
            }
        }
        ActivationCommand::Result { id } => {
            let resp = activations.result(id).await?;
            let result = resp.value.result.unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_show_id_name_and_status() {
        let activation: Activation = serde_json::from_value(json!({
            "name": "hello",
            "activationId": "abc123",
            "response": {"status": "success", "success": true}
        }))
        .unwrap();
        let line = row(&activation);
        assert!(line.starts_with("abc123 "));
        assert!(line.contains("hello"));
        assert!(line.ends_with("success"));
    }

    #[test]
    fn rows_without_response_have_no_status() {
        let activation: Activation =
            serde_json::from_value(json!({"name": "hello", "activationId": "abc123"})).unwrap();
        assert_eq!(row(&activation).trim_end(), format!("{:<34} hello", "abc123"));
    }
}
