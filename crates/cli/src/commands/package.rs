use clap::{Args, Subcommand};
use whisk_ops::OpsClient;
use whisk_ops::whisk_client::Error;
use whisk_ops::whisk_core::{ListOptions, Package};

use super::{KeyValueArgs, Paging, print_document, print_list, qualified};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct PackageArgs {
    #[command(subcommand)]
    pub command: PackageCommand,
}

#[derive(Subcommand, Debug)]
pub enum PackageCommand {
    /// Create a new package.
    Create(PackageSource),
    /// Update an existing package, creating it if needed.
    Update(PackageSource),
    /// Bind parameters to a package, creating a new package.
    Bind {
        /// Package to bind to: `/namespace/package`, or `package` in the
        /// current namespace.
        package: String,
        /// Name of the binding.
        name: String,
        #[command(flatten)]
        pairs: KeyValueArgs,
    },
    /// Get a package.
    Get {
        /// Package name.
        name: String,
    },
    /// Delete a package.
    Delete {
        /// Package name.
        name: String,
    },
    /// List packages.
    List {
        #[command(flatten)]
        paging: Paging,
        /// Include packages shared by other namespaces.
        #[arg(long)]
        public: bool,
    },
    /// Refresh the bindings of published packages in the namespace.
    Refresh,
}

#[derive(Args, Debug)]
pub struct PackageSource {
    /// Package name.
    pub name: String,
    /// Share the package with other namespaces.
    #[arg(long)]
    pub shared: Option<bool>,
    #[command(flatten)]
    pub pairs: KeyValueArgs,
}

impl PackageSource {
    fn to_package(&self) -> Package {
        Package {
            name: self.name.clone(),
            publish: self.shared,
            parameters: self.pairs.parameters(),
            annotations: self.pairs.annotations(),
            ..Package::default()
        }
    }
}

/// Split `/namespace/package` (or a bare `package`) into its parts.
fn binding_target<'a>(target: &'a str, current: &'a str) -> Result<(&'a str, &'a str), Error> {
    let invalid = || Error::validation(format!("invalid package to bind: '{target}'"));
    match target.strip_prefix('/') {
        Some(qualified) => match qualified.split_once('/') {
            Some((namespace, package))
                if !namespace.is_empty() && !package.is_empty() && !package.contains('/') =>
            {
                Ok((namespace, package))
            }
            _ => Err(invalid()),
        },
        None if !target.is_empty() && !target.contains('/') => Ok((current, target)),
        None => Err(invalid()),
    }
}

pub async fn run(ops: &OpsClient, args: &PackageArgs, format: OutputFormat) -> anyhow::Result<()> {
    let packages = ops.client().packages();
    match &args.command {
        PackageCommand::Create(source) | PackageCommand::Update(source) => {
            let overwrite = matches!(args.command, PackageCommand::Update(_));
            let resp = packages.insert(&source.to_package(), overwrite).await?;
            let verb = if overwrite { "updated" } else { "created" };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: {verb} package {}", source.name),
            }
        }
        PackageCommand::Bind {
            package,
            name,
            pairs,
        } => {
            let (namespace, target) = binding_target(package, ops.namespace())?;
            let binding = Package {
                parameters: pairs.parameters(),
                annotations: pairs.annotations(),
                ..Package::binding(name, namespace, target)
            };
            let resp = packages.insert(&binding, false).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: created binding {name}"),
            }
        }
        PackageCommand::Get { name } => {
            let resp = packages.get(name).await?;
            print_document(format, &format!("ok: got package {name}"), &resp.value)?;
        }
        PackageCommand::Delete { name } => {
            let resp = packages.delete(name).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: deleted package {name}"),
            }
        }
        PackageCommand::List { paging, public } => {
            let options = ListOptions {
                public: *public,
                ..paging.options()
            };
            let resp = packages.list(Some(&options)).await?;
            print_list(format, "packages", &resp.value, |package| {
                let visibility = if package.publish == Some(true) { "shared" } else { "private" };
                format!("{:<60} {visibility}", qualified(&package.namespace, &package.name))
            })?;
        }
        PackageCommand::Refresh => {
            let updates = packages.refresh().await?.into_value();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updates)?),
                OutputFormat::Text => {
                    println!("{} refreshed successfully", ops.namespace());
                    for (label, names) in [
                        ("created bindings", &updates.added),
                        ("updated bindings", &updates.updated),
                        ("deleted bindings", &updates.deleted),
                    ] {
                        println!("{label}:");
                        for name in names {
                            println!("  {name}");
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_package_binds_in_current_namespace() {
        assert_eq!(binding_target("utils", "guest").unwrap(), ("guest", "utils"));
    }

    #[test]
    fn qualified_package_keeps_its_namespace() {
        assert_eq!(
            binding_target("/whisk.system/alarms", "guest").unwrap(),
            ("whisk.system", "alarms")
        );
    }

    #[test]
    fn malformed_targets_are_rejected() {
        for target in ["", "/", "/ns", "/ns/", "//pkg", "/ns/pkg/extra", "a/b"] {
            let err = binding_target(target, "guest").unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{target}");
        }
    }

    #[test]
    fn shared_flag_sets_publish() {
        let source = PackageSource {
            name: "utils".into(),
            shared: Some(true),
            pairs: KeyValueArgs::default(),
        };
        assert_eq!(
            serde_json::to_value(source.to_package()).unwrap(),
            serde_json::json!({"name": "utils", "publish": true})
        );
    }
}
