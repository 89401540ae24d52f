// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConfigError;
use crate::network::{BatchClassifier, Calculation, NodeKind, Operation};
use crate::observability::messages::validation::ValidationFailed;
use crate::observability::messages::StructuredLog;
use crate::paraconsistent::BlockParams;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Declarative description of a network.
///
/// # Fields
/// * `params` - thresholds shared by every params-carrying operation (optional)
/// * `blocks` - pre-wired paraconsistent blocks; block `b` contributes nodes
///   `b.in`, `b.last`, `b.complete` and `b.classified` (optional)
/// * `nodes` - individual nodes and their dependencies
/// * `signals` - seed signals injected into input nodes before the pass (optional)
///
/// # Example
/// ```yaml
/// params:
///   ftc: 0.5
/// nodes:
///   - id: sensor
///     kind: input
///   - id: parser
///     kind: logic
///     operation: { type: parse }
///     depends_on: [sensor]
/// signals:
///   - { node: sensor, mu: 0.9, lambda: 0.1, source: sensorX }
/// ```
#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub params: BlockParams,
    #[serde(default)]
    pub blocks: Vec<BlockConfig>,
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
    #[serde(default)]
    pub signals: Vec<SignalConfig>,
}

/// A paraconsistent block, optionally overriding the shared thresholds.
#[derive(Debug, Deserialize)]
pub struct BlockConfig {
    pub id: String,
    pub params: Option<BlockParams>,
}

/// Configuration for a single node.
///
/// # Example
/// ```yaml
/// id: "classifier"
/// kind: output
/// operation:
///   type: region_classifier
///   params: { ftc: 0.6 }
/// depends_on: ["parser"]
/// ```
#[derive(Debug, Deserialize)]
pub struct NodeConfig {
    pub id: String,
    pub kind: NodeKindConfig,
    pub operation: Option<OperationConfig>,
    #[serde(default)]
    pub depends_on: Vec<String>, // defaults empty
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindConfig {
    Input,
    Logic,
    Output,
}

impl From<NodeKindConfig> for NodeKind {
    fn from(kind: NodeKindConfig) -> Self {
        match kind {
            NodeKindConfig::Input => NodeKind::Input,
            NodeKindConfig::Logic => NodeKind::Logic,
            NodeKindConfig::Output => NodeKind::Output,
        }
    }
}

/// Operation carried by a logic or output node.
///
/// Params-carrying operations fall back to the network-wide `params`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationConfig {
    Identity,
    LastOfBatch,
    Parse {
        params: Option<BlockParams>,
    },
    Average,
    RegionClassifier {
        params: Option<BlockParams>,
    },
    Classify {
        params: Option<BlockParams>,
    },
}

impl OperationConfig {
    pub fn build(&self, shared: &BlockParams) -> Operation {
        let pick = |own: &Option<BlockParams>| own.unwrap_or(*shared).clamped();
        match self {
            OperationConfig::Identity => Operation::Identity,
            OperationConfig::LastOfBatch => Operation::LastOfBatch,
            OperationConfig::Parse { params } => {
                Operation::EachSignal(Calculation::parse(pick(params)))
            }
            OperationConfig::Average => Operation::ReduceBatch(Calculation::average()),
            OperationConfig::RegionClassifier { params } => {
                Operation::EachSignal(Calculation::region_classifier(pick(params)))
            }
            OperationConfig::Classify { params } => {
                Operation::Classify(BatchClassifier::new(pick(params)))
            }
        }
    }
}

/// Seed signal for an input node.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct SignalConfig {
    pub node: String,
    pub mu: f64,
    #[serde(alias = "lam")]
    pub lambda: f64,
    #[serde(default)]
    pub source: String,
}

/// Parse a YAML network description.
pub fn parse_yaml(content: &str) -> Result<NetworkConfig, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Parse a TOML network description.
pub fn parse_toml(content: &str) -> Result<NetworkConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a config from a `.yaml`, `.yml` or `.toml` file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<NetworkConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let content = fs::read_to_string(path)?;
    match extension.as_str() {
        "yaml" | "yml" => parse_yaml(&content),
        "toml" => parse_toml(&content),
        _ => Err(ConfigError::UnsupportedFormat { extension }),
    }
}

/// Load and validate a config
///
/// This function loads the configuration and validates the node graph
/// to ensure it's acyclic and all references are resolved.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<NetworkConfig, ConfigError> {
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_network_config(&cfg) {
        ValidationFailed {
            error_count: validation_errors.len(),
        }
        .log();
        return Err(ConfigError::Validation(validation_errors));
    }

    Ok(cfg)
}
