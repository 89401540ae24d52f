// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Numeric failures while evaluating a wiring expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("expression produced a non-finite value: {value}")]
    NonFinite { value: f64 },
}

/// Failures raised by an operation while it transforms a batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperationError {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("expected {expected} input signals, received {received}")]
    ArityMismatch { expected: usize, received: usize },
}

/// Structural and execution errors of a [`crate::network::Network`].
///
/// Structural variants are raised before the graph is touched, so a failed
/// call leaves the network exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("node id '{node_id}' is already registered")]
    DuplicateNodeId { node_id: String },

    #[error("node '{node_id}' is not registered in the network")]
    UnknownNode { node_id: String },

    #[error("cycle detected; unresolved nodes: {}", unresolved.join(", "))]
    CycleDetected { unresolved: Vec<String> },

    #[error("{kind} node requires an operation")]
    MissingOperation { kind: String },

    #[error("input nodes do not carry an operation")]
    OperationOnInputNode,

    #[error("node '{node_id}' failed in operation '{operation}': {source}")]
    OperationFailed {
        node_id: String,
        operation: String,
        #[source]
        source: OperationError,
    },
}
