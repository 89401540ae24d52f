// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{NetworkError, WiringError};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating a network description
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A circular dependency was detected between nodes
    CyclicDependency {
        /// The cycle path, first node repeated at the end
        cycle: Vec<String>,
    },
    /// A node lists a dependency that doesn't exist
    UnresolvedDependency {
        node_id: String,
        missing_dependency: String,
    },
    /// Two nodes share an id
    DuplicateNodeId { node_id: String },
    /// A seed signal targets a node that is missing or not an input node
    UnknownSignalTarget { node_id: String },
    /// An input node declares an operation
    OperationOnInputNode { node_id: String },
    /// A logic or output node has no operation
    MissingOperation { node_id: String },
    /// An input node declares dependencies
    InputWithDependencies { node_id: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicDependency { cycle } => {
                write!(f, "Cyclic dependency detected: {}", cycle.join(" -> "))
            }
            ValidationError::UnresolvedDependency {
                node_id,
                missing_dependency,
            } => {
                write!(
                    f,
                    "Node '{}' depends on '{}' which does not exist",
                    node_id, missing_dependency
                )
            }
            ValidationError::DuplicateNodeId { node_id } => {
                write!(f, "Duplicate node ID: '{}'", node_id)
            }
            ValidationError::UnknownSignalTarget { node_id } => {
                write!(f, "Signal targets '{}' which is not an input node", node_id)
            }
            ValidationError::OperationOnInputNode { node_id } => {
                write!(f, "Input node '{}' must not declare an operation", node_id)
            }
            ValidationError::MissingOperation { node_id } => {
                write!(f, "Node '{}' requires an operation", node_id)
            }
            ValidationError::InputWithDependencies { node_id } => {
                write!(f, "Input node '{}' must not declare dependencies", node_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a network description from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config extension '{extension}' (expected yaml, yml or toml)")]
    UnsupportedFormat { extension: String },

    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Wiring(#[from] WiringError),
}
