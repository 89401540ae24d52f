// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Compiling a bound expression into graph structure.
//!
//! Binding `expr` to a destination input field synthesizes one Logic node
//! carrying a [`BridgeOperation`], connects every source node to it in
//! source order, and connects it to the destination's input node. At
//! propagation time the bridge is handed one batch per source edge and reads
//! them positionally: each source takes the latest signal of its batch, a
//! source that emitted nothing reads `0.0`.

use crate::errors::{OperationError, WiringError};
use crate::network::{Network, Node, Operation};
use crate::observability::messages::wiring::BridgeSynthesized;
use crate::observability::messages::StructuredLog;
use crate::signal::Signal;
use crate::wiring::expression::Expression;
use crate::wiring::schema::FieldRef;

/// Which evidence degree a bridge writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAttr {
    Mu,
    Lambda,
}

impl InputAttr {
    /// Map an input-port field name to the attribute it writes.
    pub fn from_field(field: &str) -> Option<InputAttr> {
        match field {
            "mu" => Some(InputAttr::Mu),
            "lam" | "lambda" => Some(InputAttr::Lambda),
            _ => None,
        }
    }
}

/// Evaluates an expression over its inputs and emits one simple signal.
#[derive(Debug, Clone)]
pub struct BridgeOperation {
    pub expression: Expression,
    pub target: InputAttr,
}

impl BridgeOperation {
    pub fn new(expression: Expression, target: InputAttr) -> Self {
        Self { expression, target }
    }

    /// Treat every signal as the batch of its own edge.
    pub fn execute(&self, inputs: &[Signal]) -> Result<Vec<Signal>, OperationError> {
        let edges: Vec<Vec<Signal>> = inputs.iter().map(|s| vec![s.clone()]).collect();
        self.execute_edges(&edges)
    }

    /// Evaluate over one batch per source edge, in source order.
    ///
    /// The written attribute gets the value; the other one is `0`. Nothing is
    /// emitted when every source is silent.
    pub fn execute_edges(&self, edges: &[Vec<Signal>]) -> Result<Vec<Signal>, OperationError> {
        let latest: Vec<Option<&Signal>> = edges.iter().map(|batch| batch.last()).collect();
        let Some(first) = latest.iter().flatten().next() else {
            return Ok(Vec::new());
        };
        let source_id = first.source_id().to_string();

        let value = self.expression.read(&latest)?;
        let (mu, lambda) = match self.target {
            InputAttr::Mu => (value, 0.0),
            InputAttr::Lambda => (0.0, value),
        };
        Ok(vec![Signal::simple(mu, lambda, source_id)])
    }
}

/// Bind `expr` to the destination input field, returning the bridge node id.
///
/// Fails without touching the network when the expression has no sources,
/// the destination is not a writable input field, or any source lives in
/// the destination block.
pub fn bind(network: &mut Network, expr: Expression, dest: &FieldRef) -> Result<String, WiringError> {
    if expr.sources().is_empty() {
        return Err(WiringError::NoSources);
    }

    let target = InputAttr::from_field(&dest.field)
        .filter(|_| dest.is_input)
        .ok_or_else(|| WiringError::NotAnInputPort {
            block_id: dest.block_id.clone(),
            port: dest.port.clone(),
            field: dest.field.clone(),
        })?;

    if expr.sources().iter().any(|s| s.block_id == dest.block_id) {
        return Err(WiringError::DirectCycle {
            block_id: dest.block_id.clone(),
        });
    }

    for source in expr.sources() {
        if !network.contains(&source.node_id) {
            return Err(crate::errors::NetworkError::UnknownNode {
                node_id: source.node_id.clone(),
            }
            .into());
        }
    }
    if !network.contains(&dest.write_node_id) {
        return Err(crate::errors::NetworkError::UnknownNode {
            node_id: dest.write_node_id.clone(),
        }
        .into());
    }

    let source_nodes: Vec<String> = expr.sources().iter().map(|s| s.node_id.clone()).collect();
    let bridge = Node::logic("", Operation::Bridge(BridgeOperation::new(expr, target)));
    let bridge_id = network.add_node(bridge)?;

    for node_id in &source_nodes {
        network.connect(node_id, &bridge_id)?;
    }
    network.connect(&bridge_id, &dest.write_node_id)?;

    BridgeSynthesized {
        bridge_id: &bridge_id,
        target: &dest.path(),
        source_count: source_nodes.len(),
    }
    .log();

    Ok(bridge_id)
}

impl Expression {
    /// Bind this expression to `dest`; see [`bind`].
    pub fn bind_to(self, network: &mut Network, dest: &FieldRef) -> Result<String, WiringError> {
        bind(network, self, dest)
    }
}
