// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{NetworkError, OperationError};
use crate::network::operation::Operation;
use crate::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Buffers injected signals; carries no operation.
    Input,
    /// Transforms its inbox through an operation.
    Logic,
    /// Same as Logic; marks a terminal of the graph.
    Output,
}

impl NodeKind {
    /// Prefix used for generated ids.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Input => "InputNode",
            NodeKind::Logic => "LogicNode",
            NodeKind::Output => "OutputNode",
        }
    }
}

/// Lifecycle: `Idle -> Fed -> Propagated -> Idle` (on reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Idle,
    Fed,
    Propagated,
}

/// A vertex of the dataflow network.
///
/// Signals arrive two ways: injected by the caller through [`Node::receive`],
/// or delivered by the network along incoming edges during a pass. Input
/// nodes keep injected signals across passes until reset, so re-running a
/// pass re-emits the same seeds. Delivered batches only live for the pass
/// that delivered them. Logic and Output nodes consume both when they
/// propagate.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    kind: NodeKind,
    operation: Option<Operation>,
    inbox: Vec<Signal>,
    delivered: Vec<Vec<Signal>>,
    outbox: Vec<Signal>,
    propagated: bool,
}

impl Node {
    /// Input node; a blank id is replaced when the node is registered.
    pub fn input(id: impl Into<String>) -> Self {
        Self::raw(id.into(), NodeKind::Input, None)
    }

    pub fn logic(id: impl Into<String>, operation: Operation) -> Self {
        Self::raw(id.into(), NodeKind::Logic, Some(operation))
    }

    pub fn output(id: impl Into<String>, operation: Operation) -> Self {
        Self::raw(id.into(), NodeKind::Output, Some(operation))
    }

    pub fn builder(kind: NodeKind) -> NodeBuilder {
        NodeBuilder::new(kind)
    }

    fn raw(id: String, kind: NodeKind, operation: Option<Operation>) -> Self {
        Self {
            id,
            kind,
            operation,
            inbox: Vec::new(),
            delivered: Vec::new(),
            outbox: Vec::new(),
            propagated: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    pub fn operation_mut(&mut self) -> Option<&mut Operation> {
        self.operation.as_mut()
    }

    pub fn operation_name(&self) -> String {
        self.operation
            .as_ref()
            .map(Operation::name)
            .unwrap_or_else(|| "input".to_string())
    }

    pub fn state(&self) -> NodeState {
        if self.propagated {
            NodeState::Propagated
        } else if self.pending() == 0 {
            NodeState::Idle
        } else {
            NodeState::Fed
        }
    }

    /// Signals injected by the caller.
    pub fn inbox(&self) -> &[Signal] {
        &self.inbox
    }

    /// Injected plus delivered signals waiting for the next propagate.
    pub fn pending(&self) -> usize {
        self.inbox.len() + self.delivered.iter().map(Vec::len).sum::<usize>()
    }

    pub fn outputs(&self) -> &[Signal] {
        &self.outbox
    }

    pub fn receive(&mut self, signal: Signal) {
        self.inbox.push(signal);
        self.propagated = false;
    }

    /// Hand over the outbox of one upstream edge for the current pass.
    pub(crate) fn deliver(&mut self, batch: Vec<Signal>) {
        self.delivered.push(batch);
        self.propagated = false;
    }

    /// Produce this node's outbox for the current pass.
    pub fn propagate(&mut self) -> Result<&[Signal], OperationError> {
        let delivered = std::mem::take(&mut self.delivered);
        match (&self.kind, self.operation.as_mut()) {
            (NodeKind::Input, _) | (_, None) => {
                let mut outbox = self.inbox.clone();
                outbox.extend(delivered.into_iter().flatten());
                self.outbox = outbox;
            }
            (_, Some(operation)) => {
                let injected = std::mem::take(&mut self.inbox);
                self.outbox = operation.execute_edges(injected, delivered)?;
            }
        }
        self.propagated = true;
        Ok(&self.outbox)
    }

    pub fn reset(&mut self) {
        self.inbox.clear();
        self.delivered.clear();
        self.outbox.clear();
        self.propagated = false;
    }
}

/// Builder that refuses Logic/Output nodes without an operation.
#[derive(Debug)]
pub struct NodeBuilder {
    kind: NodeKind,
    id: String,
    operation: Option<Operation>,
}

impl NodeBuilder {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: String::new(),
            operation: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn build(self) -> Result<Node, NetworkError> {
        match (self.kind, self.operation) {
            (NodeKind::Input, Some(_)) => Err(NetworkError::OperationOnInputNode),
            (NodeKind::Input, None) => Ok(Node::input(self.id)),
            (kind, None) => Err(NetworkError::MissingOperation {
                kind: kind.type_name().to_string(),
            }),
            (kind, Some(operation)) => Ok(Node::raw(self.id, kind, Some(operation))),
        }
    }
}
