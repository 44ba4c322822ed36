use std::path::PathBuf;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Args, Subcommand};
use whisk_ops::OpsClient;
use whisk_ops::whisk_client::Error;
use whisk_ops::whisk_core::{Action, Exec, Limits};

use super::{KeyValueArgs, Paging, payload, print_document, print_list, qualified};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ActionArgs {
    #[command(subcommand)]
    pub command: ActionCommand,
}

#[derive(Subcommand, Debug)]
pub enum ActionCommand {
    /// Create a new action.
    Create(ActionSource),
    /// Update an existing action, creating it if needed.
    Update(ActionSource),
    /// Invoke an action.
    Invoke {
        /// Action name, optionally `package/action`.
        name: String,
        /// Invocation parameter; VALUE is parsed as JSON when it can be.
        #[arg(short = 'p', long = "param", num_args = 2, value_names = ["KEY", "VALUE"])]
        params: Vec<String>,
        /// Wait for the activation to complete.
        #[arg(short, long)]
        blocking: bool,
        /// Print only the result; implies --blocking.
        #[arg(short, long)]
        result: bool,
    },
    /// Get an action.
    Get {
        /// Action name.
        name: String,
    },
    /// Delete an action.
    Delete {
        /// Action name.
        name: String,
    },
    /// List actions.
    List {
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Args, Debug)]
pub struct ActionSource {
    /// Action name, optionally `package/action`.
    pub name: String,
    /// Source file or archive; may be omitted with --image.
    pub file: Option<PathBuf>,
    /// Runtime kind; inferred from the file extension when omitted.
    #[arg(long)]
    pub kind: Option<String>,
    /// Entry point function.
    #[arg(long)]
    pub main: Option<String>,
    /// Container image for a blackbox action.
    #[arg(long)]
    pub image: Option<String>,
    #[command(flatten)]
    pub pairs: KeyValueArgs,
    /// Timeout in milliseconds.
    #[arg(short, long)]
    pub timeout: Option<u64>,
    /// Memory in megabytes.
    #[arg(short, long)]
    pub memory: Option<u64>,
}

impl ActionSource {
    fn to_action(&self) -> anyhow::Result<Action> {
        let limits = Limits {
            timeout: self.timeout,
            memory: self.memory,
            logs: None,
        };
        Ok(Action {
            name: self.name.clone(),
            exec: Some(self.exec()?),
            parameters: self.pairs.parameters(),
            annotations: self.pairs.annotations(),
            limits: (!limits.is_empty()).then_some(limits),
            ..Action::default()
        })
    }

    fn exec(&self) -> anyhow::Result<Exec> {
        let mut exec = Exec {
            main: self.main.clone(),
            ..Exec::default()
        };

        if let Some(image) = &self.image {
            exec.kind = "blackbox".to_string();
            exec.image = Some(image.clone());
        }

        let Some(file) = &self.file else {
            if exec.image.is_none() {
                return Err(
                    Error::validation("an action file is required unless --image is given").into(),
                );
            }
            return Ok(exec);
        };

        let extension = file
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if exec.kind.is_empty() {
            exec.kind = match &self.kind {
                Some(kind) => kind.clone(),
                None => kind_for_extension(&extension)
                    .ok_or_else(|| {
                        Error::validation(format!(
                            "cannot infer the runtime of '{}'; pass --kind",
                            file.display()
                        ))
                    })?
                    .to_string(),
            };
        }

        let context = || format!("cannot read '{}'", file.display());
        if is_archive(&extension) {
            let bytes = std::fs::read(file).with_context(context)?;
            exec.code = Some(STANDARD.encode(bytes));
            exec.binary = Some(true);
        } else {
            exec.code = Some(std::fs::read_to_string(file).with_context(context)?);
        }
        Ok(exec)
    }
}

fn kind_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "js" => Some("nodejs:default"),
        "py" => Some("python:default"),
        "swift" => Some("swift:default"),
        "php" => Some("php:default"),
        "go" => Some("go:default"),
        "java" | "jar" => Some("java:default"),
        _ => None,
    }
}

fn is_archive(extension: &str) -> bool {
    matches!(extension, "zip" | "jar")
}

pub async fn run(ops: &OpsClient, args: &ActionArgs, format: OutputFormat) -> anyhow::Result<()> {
    let actions = ops.client().actions();
    match &args.command {
        ActionCommand::Create(source) | ActionCommand::Update(source) => {
            let overwrite = matches!(args.command, ActionCommand::Update(_));
            let resp = actions.insert(&source.to_action()?, overwrite).await?;
            let verb = if overwrite { "updated" } else { "created" };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: {verb} action {}", source.name),
            }
        }
        ActionCommand::Invoke {
            name,
            params,
            blocking,
            result,
        } => {
            let body = payload(params);
            if *result {
                let resp = actions.invoke_result(name, &body).await?;
                println!("{}", serde_json::to_string_pretty(&resp.value)?);
                return Ok(());
            }

            let activation = actions.invoke(name, &body, *blocking).await?.into_value();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&activation)?),
                OutputFormat::Text => {
                    println!("ok: invoked {name} with id {}", activation.activation_id);
                    if let Some(response) = &activation.response {
                        println!("{}", serde_json::to_string_pretty(response)?);
                    }
                }
            }
        }
        ActionCommand::Get { name } => {
            let resp = actions.get(name).await?;
            print_document(format, &format!("ok: got action {name}"), &resp.value)?;
        }
        ActionCommand::Delete { name } => {
            let resp = actions.delete(name).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: deleted action {name}"),
            }
        }
        ActionCommand::List { paging } => {
            let resp = actions.list(Some(&paging.options())).await?;
            print_list(format, "actions", &resp.value, |action| {
                let kind = action.exec.as_ref().map_or("", |e| e.kind.as_str());
                format!(
                    "{:<60} {}",
                    qualified(&action.namespace, &action.name),
                    kind
                )
            })?;
        }
    }
    Ok(())
}
