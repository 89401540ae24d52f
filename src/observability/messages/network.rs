// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for network construction and propagation events.
//!
//! This module contains message types for logging events related to:
//! * Node registration and edge wiring
//! * Propagation pass lifecycle (start, completion)
//! * Per-node propagation results
//! * Cycles and operation failures that abort a pass

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Node registered in a network.
///
/// # Log Level
/// `debug!` - Construction detail
pub struct NodeRegistered<'a> {
    pub node_id: &'a str,
    pub kind: &'a str,
}

impl Display for NodeRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Registered {} '{}'", self.kind, self.node_id)
    }
}

impl StructuredLog for NodeRegistered<'_> {
    fn log(&self) {
        tracing::debug!(node_id = self.node_id, kind = self.kind, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node_registered",
            span_name = name,
            node_id = self.node_id,
            kind = self.kind,
        )
    }
}

/// Directed edge added between two registered nodes.
///
/// # Log Level
/// `debug!` - Construction detail
pub struct EdgeAdded<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

impl Display for EdgeAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Connected '{}' -> '{}'", self.from, self.to)
    }
}

impl StructuredLog for EdgeAdded<'_> {
    fn log(&self) {
        tracing::debug!(from = self.from, to = self.to, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("edge_added", span_name = name, from = self.from, to = self.to)
    }
}

/// Propagation pass started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use paranet::observability::messages::network::PropagationStarted;
///
/// let msg = PropagationStarted {
///     node_count: 4,
///     edge_count: 3,
/// };
///
/// assert_eq!(msg.to_string(), "Starting propagation over 4 nodes and 3 edges");
/// ```
pub struct PropagationStarted {
    pub node_count: usize,
    pub edge_count: usize,
}

impl Display for PropagationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting propagation over {} nodes and {} edges",
            self.node_count, self.edge_count
        )
    }
}

impl StructuredLog for PropagationStarted {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            edge_count = self.edge_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "propagation",
            span_name = name,
            node_count = self.node_count,
            edge_count = self.edge_count,
        )
    }
}

/// Propagation pass completed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PropagationCompleted {
    pub node_count: usize,
    pub signal_count: usize,
    pub duration: std::time::Duration,
}

impl Display for PropagationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Propagation completed: {} nodes produced {} signals in {:?}",
            self.node_count, self.signal_count, self.duration
        )
    }
}

impl StructuredLog for PropagationCompleted {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            signal_count = self.signal_count,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "propagation_completed",
            span_name = name,
            node_count = self.node_count,
            signal_count = self.signal_count,
            duration = ?self.duration,
        )
    }
}

/// One node finished its step of a pass.
///
/// # Log Level
/// `debug!` - Per-node detail
pub struct NodePropagated<'a> {
    pub node_id: &'a str,
    pub operation: &'a str,
    pub inputs: usize,
    pub outputs: usize,
}

impl Display for NodePropagated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' ({}) propagated {} -> {} signals",
            self.node_id, self.operation, self.inputs, self.outputs
        )
    }
}

impl StructuredLog for NodePropagated<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            operation = self.operation,
            inputs = self.inputs,
            outputs = self.outputs,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node_propagated",
            span_name = name,
            node_id = self.node_id,
            operation = self.operation,
        )
    }
}

/// Cycle found while ordering the graph; nothing was executed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct CycleDetected<'a> {
    pub unresolved: &'a [String],
}

impl Display for CycleDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cycle detected, propagation aborted; unresolved nodes: {}",
            self.unresolved.join(", ")
        )
    }
}

impl StructuredLog for CycleDetected<'_> {
    fn log(&self) {
        tracing::error!(
            unresolved = %self.unresolved.join(", "),
            unresolved_count = self.unresolved.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "cycle_detected",
            span_name = name,
            unresolved_count = self.unresolved.len(),
        )
    }
}

/// An operation failed while a node propagated.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct OperationFailed<'a> {
    pub node_id: &'a str,
    pub operation: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for OperationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Operation '{}' failed on node '{}': {}",
            self.operation, self.node_id, self.error
        )
    }
}

impl StructuredLog for OperationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            operation = self.operation,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "operation_failed",
            span_name = name,
            node_id = self.node_id,
            operation = self.operation,
        )
    }
}
