use clap::{Args, Subcommand};
use serde_json::json;
use whisk_ops::OpsClient;
use whisk_ops::whisk_core::{KeyValue, Trigger};

use super::{KeyValueArgs, Paging, payload, print_document, print_list, qualified};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct TriggerArgs {
    #[command(subcommand)]
    pub command: TriggerCommand,
}

#[derive(Subcommand, Debug)]
pub enum TriggerCommand {
    /// Create a new trigger.
    Create(TriggerSource),
    /// Update an existing trigger, creating it if needed.
    Update(TriggerSource),
    /// Fire a trigger.
    Fire {
        /// Trigger name.
        name: String,
        /// Event parameter; VALUE is parsed as JSON when it can be.
        #[arg(short = 'p', long = "param", num_args = 2, value_names = ["KEY", "VALUE"])]
        params: Vec<String>,
    },
    /// Get a trigger.
    Get {
        /// Trigger name.
        name: String,
    },
    /// Delete a trigger, tearing down its feed if it has one.
    Delete {
        /// Trigger name.
        name: String,
    },
    /// List triggers.
    List {
        #[command(flatten)]
        paging: Paging,
    },
}

#[derive(Args, Debug)]
pub struct TriggerSource {
    /// Trigger name.
    pub name: String,
    /// Feed action that produces events for this trigger.
    #[arg(short, long)]
    pub feed: Option<String>,
    #[command(flatten)]
    pub pairs: KeyValueArgs,
}

impl TriggerSource {
    fn to_trigger(&self) -> Trigger {
        let mut annotations = self.pairs.annotations();
        if let Some(feed) = &self.feed {
            annotations.push(KeyValue::new("feed", feed.as_str()));
        }
        Trigger {
            name: self.name.clone(),
            parameters: self.pairs.parameters(),
            annotations,
            ..Trigger::default()
        }
    }
}

/// Run the feed action's lifecycle hook for `trigger`.
async fn notify_feed(
    ops: &OpsClient,
    feed: &str,
    trigger: &str,
    event: &str,
    params: &[KeyValue],
) -> anyhow::Result<()> {
    let mut body = json!({
        "lifecycleEvent": event,
        "triggerName": qualified(ops.namespace(), trigger),
        "authKey": ops.client().config().auth_token,
    });
    if let Some(fields) = body.as_object_mut() {
        for kv in params {
            fields.insert(kv.key.clone(), kv.value.clone());
        }
    }
    tracing::debug!(feed, trigger, event, "invoking feed");
    ops.client().actions().invoke(feed, &body, true).await?;
    Ok(())
}

pub async fn run(ops: &OpsClient, args: &TriggerArgs, format: OutputFormat) -> anyhow::Result<()> {
    let triggers = ops.client().triggers();
    match &args.command {
        TriggerCommand::Create(source) | TriggerCommand::Update(source) => {
            let overwrite = matches!(args.command, TriggerCommand::Update(_));
            let trigger = source.to_trigger();
            let resp = triggers.insert(&trigger, overwrite).await?;

            if let Some(feed) = &source.feed
                && !overwrite
                && let Err(e) = notify_feed(ops, feed, &source.name, "CREATE", &trigger.parameters).await
            {
                // Roll back the trigger when its feed cannot be set up.
                tracing::warn!(trigger = %source.name, error = %e, "feed setup failed");
                triggers.delete(&source.name).await?;
                return Err(e);
            }

            let verb = if overwrite { "updated" } else { "created" };
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: {verb} trigger {}", source.name),
            }
        }
        TriggerCommand::Fire { name, params } => {
            let activation = triggers.fire(name, &payload(params)).await?.into_value();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&activation)?),
                OutputFormat::Text => {
                    println!("ok: fired trigger {name} with id {}", activation.activation_id);
                }
            }
        }
        TriggerCommand::Get { name } => {
            let resp = triggers.get(name).await?;
            print_document(format, &format!("ok: got trigger {name}"), &resp.value)?;
        }
        TriggerCommand::Delete { name } => {
            let resp = triggers.delete(name).await?;
            if let Some(feed) = resp.value.feed() {
                notify_feed(ops, feed, name, "DELETE", &[]).await?;
            }
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resp.value)?),
                OutputFormat::Text => println!("ok: deleted trigger {name}"),
            }
        }
        TriggerCommand::List { paging } => {
            let resp = triggers.list(Some(&paging.options())).await?;
            print_list(format, "triggers", &resp.value, |trigger| {
                qualified(&trigger.namespace, &trigger.name)
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use whisk_ops::OpsConfig;

    const FEED: &str = "/whisk.system/alarms/alarm";
    const FEED_PATH: &str = "/api/v1/namespaces/whisk.system/actions/alarms/alarm";
    const TRIGGER_PATH: &str = "/api/v1/namespaces/guest/triggers/every-minute";

    fn ops(server: &MockServer) -> OpsClient {
        let config = OpsConfig::new()
            .with_apihost(server.base_url())
            .with_auth("user:pass")
            .with_namespace("guest");
        OpsClient::from_config(&config).unwrap()
    }

    fn create_with_feed() -> TriggerArgs {
        TriggerArgs {
            command: TriggerCommand::Create(TriggerSource {
                name: "every-minute".into(),
                feed: Some(FEED.into()),
                pairs: KeyValueArgs {
                    params: vec!["cron".into(), "* * * * *".into()],
                    annotations: Vec::new(),
                },
            }),
        }
    }

    #[tokio::test]
    async fn create_with_feed_runs_create_lifecycle() {
        let server = MockServer::start_async().await;
        let insert = server
            .mock_async(|when, then| {
                when.method(PUT).path(TRIGGER_PATH).query_param("overwrite", "false");
                then.status(200).json_body(json!({"name": "every-minute"}));
            })
            .await;
        let feed = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(FEED_PATH)
                    .query_param("blocking", "true")
                    .json_body_includes(
                        json!({
                            "lifecycleEvent": "CREATE",
                            "triggerName": "/guest/every-minute",
                            "authKey": "user:pass",
                            "cron": "* * * * *"
                        })
                        .to_string(),
                    );
                then.status(200).json_body(json!({"activationId": "feed1"}));
            })
            .await;

        run(&ops(&server), &create_with_feed(), OutputFormat::Text)
            .await
            .unwrap();
        insert.assert_async().await;
        feed.assert_async().await;
    }

    #[tokio::test]
    async fn failed_feed_rolls_back_trigger() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT).path(TRIGGER_PATH);
                then.status(200).json_body(json!({"name": "every-minute"}));
            })
            .await;
        let feed = server
            .mock_async(|when, then| {
                when.method(POST).path(FEED_PATH);
                then.status(500).json_body(json!({"error": "feed unavailable"}));
            })
            .await;
        let rollback = server
            .mock_async(|when, then| {
                when.method(DELETE).path(TRIGGER_PATH);
                then.status(200).json_body(json!({"name": "every-minute"}));
            })
            .await;

        let err = run(&ops(&server), &create_with_feed(), OutputFormat::Text)
            .await
            .unwrap_err();
        feed.assert_async().await;
        rollback.assert_async().await;
        assert!(err.to_string().contains("feed unavailable"), "{err}");
    }

    #[tokio::test]
    async fn delete_with_feed_runs_delete_lifecycle() {
        let server = MockServer::start_async().await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path(TRIGGER_PATH);
                then.status(200).json_body(json!({
                    "name": "every-minute",
                    "annotations": [{"key": "feed", "value": FEED}]
                }));
            })
            .await;
        let feed = server
            .mock_async(|when, then| {
                when.method(POST).path(FEED_PATH).json_body_includes(
                    json!({"lifecycleEvent": "DELETE", "triggerName": "/guest/every-minute"})
                        .to_string(),
                );
                then.status(200).json_body(json!({"activationId": "feed2"}));
            })
            .await;

        let args = TriggerArgs {
            command: TriggerCommand::Delete {
                name: "every-minute".into(),
            },
        };
        run(&ops(&server), &args, OutputFormat::Text).await.unwrap();
        delete.assert_async().await;
        feed.assert_async().await;
    }

    #[tokio::test]
    async fn delete_without_feed_skips_lifecycle() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path(TRIGGER_PATH);
                then.status(200).json_body(json!({"name": "every-minute"}));
            })
            .await;
        let feed = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let args = TriggerArgs {
            command: TriggerCommand::Delete {
                name: "every-minute".into(),
            },
        };
        run(&ops(&server), &args, OutputFormat::Text).await.unwrap();
        assert_eq!(feed.calls_async().await, 0);
    }

    #[test]
    fn feed_becomes_annotation() {
        let source = TriggerSource {
            name: "every-minute".into(),
            feed: Some("/whisk.system/alarms/alarm".into()),
            pairs: KeyValueArgs {
                params: vec!["cron".into(), "* * * * *".into()],
                annotations: Vec::new(),
            },
        };
        let trigger = source.to_trigger();
        assert_eq!(trigger.feed(), Some("/whisk.system/alarms/alarm"));
        assert_eq!(
            serde_json::to_value(&trigger).unwrap(),
            json!({
                "name": "every-minute",
                "parameters": [{"key": "cron", "value": "* * * * *"}],
                "annotations": [{"key": "feed", "value": "/whisk.system/alarms/alarm"}]
            })
        );
    }

    #[test]
    fn plain_trigger_has_no_annotations() {
        let source = TriggerSource {
            name: "t".into(),
            feed: None,
            pairs: KeyValueArgs::default(),
        };
        assert_eq!(serde_json::to_value(source.to_trigger()).unwrap(), json!({"name": "t"}));
    }
}
