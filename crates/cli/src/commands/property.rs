use std::path::Path;

use clap::{Args, Subcommand};
use whisk_ops::Properties;
use whisk_ops::properties::{APIHOST, APIVERSION, AUTH, NAMESPACE};
use whisk_ops::whisk_client::Error;

use crate::OutputFormat;

const KEYS: [&str; 4] = [APIHOST, AUTH, NAMESPACE, APIVERSION];

#[derive(Args, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// Show one property, or all of them.
    Get {
        /// apihost, auth, namespace or apiversion.
        key: Option<String>,
    },
    /// Set a property.
    Set {
        /// apihost, auth, namespace or apiversion.
        key: String,
        value: String,
    },
    /// Remove a property.
    Unset {
        /// apihost, auth, namespace or apiversion.
        key: String,
    },
}

/// Map a user-supplied key onto its canonical file key.
fn canonical(key: &str) -> Result<&'static str, Error> {
    KEYS.into_iter()
        .find(|k| k.eq_ignore_ascii_case(key))
        .ok_or_else(|| {
            Error::validation(format!(
                "unknown property '{key}', expected one of apihost, auth, namespace, apiversion"
            ))
        })
}

pub fn run(
    path: &Path,
    mut props: Properties,
    args: &PropertyArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match &args.command {
        PropertyCommand::Get { key } => {
            let keys = match key {
                Some(key) => vec![canonical(key)?],
                None => KEYS.to_vec(),
            };
            let entries: serde_json::Map<String, serde_json::Value> = keys
                .into_iter()
                .map(|k| (k.to_string(), serde_json::Value::from(props.get(k).unwrap_or_default())))
                .collect();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Text => {
                    for (key, value) in &entries {
                        println!("{key:<12} {}", value.as_str().unwrap_or_default());
                    }
                }
            }
        }
        PropertyCommand::Set { key, value } => {
            let key = canonical(key)?;
            props.set(key, value);
            props.save(path)?;
            if format == OutputFormat::Text {
                println!("ok: {key} set to {value}");
            }
        }
        PropertyCommand::Unset { key } => {
            let key = canonical(key)?;
            if props.unset(key) {
                props.save(path)?;
            }
            if format == OutputFormat::Text {
                println!("ok: {key} unset");
            }
        }
    }
    Ok(())
}
