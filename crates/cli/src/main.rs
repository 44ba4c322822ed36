//! whisk CLI
//!
//! A command-line interface for managing actions, triggers, rules and
//! packages on a whisk serverless platform.

mod commands;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt};
use whisk_ops::whisk_client::{self, WIRE_TARGET};
use whisk_ops::{OpsClient, OpsConfig, OpsError, Properties};

/// wsk: manage a whisk serverless platform.
#[derive(Parser, Debug)]
#[command(name = "wsk", version, about)]
struct Cli {
    /// API host: a host name or a full URL.
    #[arg(long, env = "WSK_APIHOST", global = true)]
    apihost: Option<String>,

    /// Authorization key, usually `uuid:key`.
    #[arg(short = 'u', long, env = "WSK_AUTH", global = true)]
    auth: Option<String>,

    /// Namespace requests are scoped to.
    #[arg(long, env = "WSK_NAMESPACE", global = true)]
    namespace: Option<String>,

    /// API version.
    #[arg(long, env = "WSK_APIVERSION", global = true)]
    apiversion: Option<String>,

    /// Log HTTP requests and responses.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP timeout in seconds.
    #[arg(long, global = true)]
    request_timeout: Option<u64>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work with actions.
    Action(commands::action::ActionArgs),
    /// Work with triggers.
    Trigger(commands::trigger::TriggerArgs),
    /// Work with rules.
    Rule(commands::rule::RuleArgs),
    /// Work with packages.
    Package(commands::package::PackageArgs),
    /// Work with activations.
    Activation(commands::activation::ActivationArgs),
    /// Work with namespaces.
    Namespace(commands::namespace::NamespaceArgs),
    /// Work with the properties file.
    Property(commands::property::PropertyArgs),
    /// Show the API description.
    Info,
}

impl Cli {
    /// Settings given on the command line or through the environment.
    fn overrides(&self) -> OpsConfig {
        OpsConfig {
            apihost: self.apihost.clone(),
            auth: self.auth.clone(),
            namespace: self.namespace.clone(),
            api_version: self.apiversion.clone(),
            verbose: self.verbose,
            timeout: self.request_timeout.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut filter = EnvFilter::from_default_env();
    if cli.verbose
        && let Ok(directive) = format!("{WIRE_TARGET}=info").parse::<Directive>()
    {
        filter = filter.add_directive(directive);
    }
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let path = Properties::default_path();
    let props = match &path {
        Some(path) => Properties::load(path)?,
        None => Properties::default(),
    };

    if let Command::Property(args) = &cli.command {
        let path = path.ok_or_else(|| {
            OpsError::Configuration(
                "cannot locate the properties file; set WSK_CONFIG_FILE".to_string(),
            )
        })?;
        return commands::property::run(&path, props, args, cli.format);
    }

    let config = OpsConfig::from_properties(&props).merge(cli.overrides());
    let ops = OpsClient::from_config(&config)?;

    match &cli.command {
        Command::Action(args) => commands::action::run(&ops, args, cli.format).await,
        Command::Trigger(args) => commands::trigger::run(&ops, args, cli.format).await,
        Command::Rule(args) => commands::rule::run(&ops, args, cli.format).await,
        Command::Package(args) => commands::package::run(&ops, args, cli.format).await,
        Command::Activation(args) => commands::activation::run(&ops, args, cli.format).await,
        Command::Namespace(args) => commands::namespace::run(&ops, args, cli.format).await,
        Command::Info => commands::info::run(&ops, cli.format).await,
        Command::Property(_) => Ok(()),
    }
}

/// Exit status: 2 for invalid input, 3 for a platform error, 4 when the
/// platform could not be reached, 1 for anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    let client = err
        .downcast_ref::<whisk_client::Error>()
        .or_else(|| match err.downcast_ref::<OpsError>() {
            Some(OpsError::Client(e)) => Some(e),
            _ => None,
        });
    match client {
        Some(whisk_client::Error::Validation(_)) => 2,
        Some(whisk_client::Error::Api(_)) => 3,
        Some(whisk_client::Error::Transport(_)) => 4,
        _ => 1,
    }
}
