//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ConnectorConfig;
use crate::engine::Engine;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::operations::{describe, parse_selection, Params, Resource};
use crate::types::JsonObject;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Run {
                resource,
                operation,
                params,
                params_file,
                items,
                continue_on_fail,
                concurrency,
            } => {
                self.run_operation(
                    resource,
                    operation,
                    params.as_deref(),
                    params_file.as_deref(),
                    items.as_deref(),
                    *continue_on_fail,
                    *concurrency,
                )
                .await
            }
            Commands::Operations => self.operations(),
        }
    }

    /// Load configuration: file, then environment, then command-line flags
    fn load_config(&self) -> Result<ConnectorConfig> {
        let config = match &self.cli.config {
            Some(path) => ConnectorConfig::from_file(path)?,
            None => ConnectorConfig::default(),
        };
        let mut config = config.with_env_overrides();

        if let Some(api_key) = &self.cli.api_key {
            config.api_key.clone_from(api_key);
        }
        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        Ok(config)
    }

    /// Build an engine over an authenticated HTTP client
    fn build_engine(config: &ConnectorConfig) -> Result<Engine<HttpClient>> {
        config.validate()?;
        let client = HttpClient::with_auth(config.http_config(), config.auth_config())?;
        Ok(Engine::new(client).with_options(config.execution_options()))
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let engine = Self::build_engine(&config)?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!("Checking connection to {}", config.base_url)
            }
        }));

        match engine.check_connection().await {
            Ok(()) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "SUCCEEDED",
                        "message": "Connection successful"
                    }
                }));
            }
            Err(e) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "FAILED",
                        "message": format!("Connection failed: {e}")
                    }
                }));
            }
        }

        Ok(())
    }

    /// Run an operation over the input records
    #[allow(clippy::too_many_arguments)]
    async fn run_operation(
        &self,
        resource: &str,
        operation: &str,
        params: Option<&str>,
        params_file: Option<&Path>,
        items: Option<&Path>,
        continue_on_fail: bool,
        concurrency: Option<usize>,
    ) -> Result<()> {
        let (resource, operation) = parse_selection(resource, operation)?;

        let base = match (params, params_file) {
            (Some(inline), _) => parse_params(inline)?,
            (None, Some(path)) => parse_params(&read_file(path)?)
                .with_context(|| format!("Invalid params file '{}'", path.display()))?,
            (None, None) => JsonObject::new(),
        };
        let records: Vec<Params> = match items {
            Some(path) => parse_items(&read_file(path)?)?
                .into_iter()
                .map(|item| Params::new(merge_params(&base, item)))
                .collect(),
            None => vec![Params::new(base)],
        };

        let mut config = self.load_config()?;
        config.continue_on_fail |= continue_on_fail;
        if let Some(concurrency) = concurrency {
            config.concurrency = concurrency;
        }
        let engine = Self::build_engine(&config)?;

        let output = engine.run(resource, operation, records).await?;

        for item in &output.items {
            self.output_message(&json!({
                "type": "RECORD",
                "record": {
                    "resource": resource,
                    "operation": operation,
                    "pairedItem": item.paired_item,
                    "data": item.json
                }
            }));
        }

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "{} records, {} items, {} errors in {}ms",
                    output.stats.records,
                    output.stats.items,
                    output.stats.errors,
                    output.stats.duration_ms
                )
            }
        }));

        Ok(())
    }

    /// List resources and operations
    fn operations(&self) -> Result<()> {
        let resources: Vec<Value> = Resource::ALL
            .into_iter()
            .map(|resource| {
                let operations: Vec<Value> = resource
                    .operations()
                    .iter()
                    .map(|op| {
                        json!({
                            "name": op.as_str(),
                            "description": describe(resource, *op)
                        })
                    })
                    .collect();

                json!({
                    "name": resource.as_str(),
                    "operations": operations
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "OPERATIONS",
            "resources": resources
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })
}

/// Parse a JSON object of parameters
pub fn parse_params(content: &str) -> Result<JsonObject> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::invalid_param("params", "expected a JSON object")),
    }
}

/// Parse input records from a JSON array or JSON Lines
pub fn parse_items(content: &str) -> Result<Vec<JsonObject>> {
    let trimmed = content.trim_start();
    let values: Vec<Value> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(serde_json::from_str)
            .collect::<std::result::Result<_, _>>()?
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(map) => Ok(map),
            _ => Err(Error::invalid_param(
                "items",
                format!("record {index} is not a JSON object"),
            )),
        })
        .collect()
}

/// Lay a record's fields over the shared parameters
pub fn merge_params(base: &JsonObject, item: JsonObject) -> JsonObject {
    let mut merged = base.clone();
    merged.extend(item);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::Builder;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_parse_items_json_array() {
        let items = parse_items(r#"[{"userId": "a"}, {"userId": "b"}]"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["userId"], "b");
    }

    #[test]
    fn test_parse_items_json_lines() {
        let items = parse_items("{\"userId\": \"a\"}\n\n{\"userId\": \"b\"}\n").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["userId"], "a");
    }

    #[test]
    fn test_parse_items_rejects_scalars() {
        let err = parse_items("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_parse_items_invalid_json() {
        let err = parse_items("{oops").unwrap_err();
        assert!(matches!(err, Error::JsonParse(_)));
    }

    #[test]
    fn test_parse_params_requires_object() {
        assert!(parse_params(r#"{"tagName": "vip"}"#).is_ok());
        assert!(parse_params("[]").is_err());
    }

    #[test]
    fn test_merge_params_item_wins() {
        let base = object(json!({"appClientId": "shop", "userUid": "base"}));
        let merged = merge_params(&base, object(json!({"userUid": "u-1", "orderId": "9"})));

        assert_eq!(
            Value::Object(merged),
            json!({"appClientId": "shop", "userUid": "u-1", "orderId": "9"})
        );
    }

    #[test]
    fn test_load_config_flags_override_file() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "api_key: file_key\nbase_url: http://file.example.com/v1\nconcurrency: 3"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "richpanel",
            "--config",
            path,
            "--api-key",
            "flag_key",
            "--base-url",
            "http://flag.example.com/v1",
            "check",
        ])
        .unwrap();
        let config = Runner::new(cli).load_config().unwrap();

        assert_eq!(config.api_key, "flag_key");
        assert_eq!(config.base_url, "http://flag.example.com/v1");
        assert_eq!(config.concurrency, 3);
    }

    #[test]
    fn test_load_config_missing_file() {
        let cli = Cli::try_parse_from([
            "richpanel",
            "--config",
            "/nonexistent/richpanel.yaml",
            "check",
        ])
        .unwrap();
        let err = Runner::new(cli).load_config().unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
