pub mod action;
pub mod activation;
pub mod info;
pub mod namespace;
pub mod package;
pub mod property;
pub mod rule;
pub mod trigger;

use clap::Args;
use serde::Serialize;
use whisk_ops::whisk_core::{KeyValue, ListOptions};

use crate::OutputFormat;

/// Repeatable `-p KEY VALUE` and `-a KEY VALUE` flags.
#[derive(Args, Debug, Default)]
pub struct KeyValueArgs {
    /// Default parameter; VALUE is parsed as JSON when it can be.
    #[arg(short = 'p', long = "param", num_args = 2, value_names = ["KEY", "VALUE"])]
    pub params: Vec<String>,
    /// Annotation; VALUE is parsed as JSON when it can be.
    #[arg(short = 'a', long = "annotation", num_args = 2, value_names = ["KEY", "VALUE"])]
    pub annotations: Vec<String>,
}

impl KeyValueArgs {
    pub fn parameters(&self) -> Vec<KeyValue> {
        key_values(&self.params)
    }

    pub fn annotations(&self) -> Vec<KeyValue> {
        key_values(&self.annotations)
    }
}

/// Paging flags shared by the list commands.
#[derive(Args, Debug, Default)]
pub struct Paging {
    /// Maximum number of entries to return.
    #[arg(short, long)]
    pub limit: Option<u64>,
    /// Number of entries to skip.
    #[arg(short, long)]
    pub skip: Option<u64>,
}

impl Paging {
    pub fn options(&self) -> ListOptions {
        ListOptions::default()
            .with_limit(self.limit.unwrap_or_default())
            .with_skip(self.skip.unwrap_or_default())
    }
}

/// JSON when `raw` parses as JSON, else the string itself.
pub fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

/// Pair up the flat `KEY VALUE KEY VALUE ...` list clap collects.
pub fn key_values(flat: &[String]) -> Vec<KeyValue> {
    flat.chunks_exact(2)
        .map(|pair| KeyValue::new(pair[0].clone(), parse_value(&pair[1])))
        .collect()
}

/// Key/value flags as the JSON object sent when invoking or firing.
pub fn payload(flat: &[String]) -> serde_json::Value {
    serde_json::Value::Object(
        flat.chunks_exact(2)
            .map(|pair| (pair[0].clone(), parse_value(&pair[1])))
            .collect(),
    )
}

/// `/namespace/name`, or the bare name when the namespace is unknown.
pub fn qualified(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("/{namespace}/{name}")
    }
}

/// Print `value` as pretty JSON, preceded in text mode by `headline`.
pub fn print_document<T: Serialize + ?Sized>(
    format: OutputFormat,
    headline: &str,
    value: &T,
) -> anyhow::Result<()> {
    if format == OutputFormat::Text {
        println!("{headline}");
    }
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a list: JSON as-is, text as a heading and one row per entry.
pub fn print_list<T: Serialize>(
    format: OutputFormat,
    heading: &str,
    items: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            println!("{heading}");
            for item in items {
                println!("{}", row(item));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_parse_as_json_or_fall_back_to_strings() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value(r#"{"a":[1,2]}"#), json!({"a": [1, 2]}));
        assert_eq!(parse_value("hello world"), json!("hello world"));
        assert_eq!(parse_value(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn flat_pairs_become_key_values() {
        let flat = vec!["name".to_string(), "Dorothy".to_string(), "n".to_string(), "3".to_string()];
        let pairs = key_values(&flat);
        assert_eq!(pairs, vec![KeyValue::new("name", "Dorothy"), KeyValue::new("n", 3)]);
        assert_eq!(payload(&flat), json!({"name": "Dorothy", "n": 3}));
    }

    #[test]
    fn qualified_names() {
        assert_eq!(qualified("guest", "hello"), "/guest/hello");
        assert_eq!(qualified("", "hello"), "hello");
    }

    #[test]
    fn paging_defaults_add_nothing() {
        assert_eq!(Paging::default().options(), ListOptions::default());
        let paging = Paging {
            limit: Some(5),
            skip: None,
        };
        assert_eq!(paging.options().limit, 5);
    }
}
