// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The dataflow network: node registry, edges, ordering and propagation.
//!
//! # Propagation
//!
//! [`Network::propagate_all`] orders the nodes with **Kahn's algorithm**
//! (in-degree counting over the reverse edges, FIFO queue seeded in
//! registration order). If fewer nodes are ordered than registered, the graph
//! has a cycle and the pass fails before any node runs.
//!
//! Otherwise each node, in order, is handed one cloned batch per incoming
//! edge (the upstream outbox, edges in the order they were connected), then
//! propagates. Delivered batches last for one pass only. Cloning at delivery
//! keeps consumers of the same producer isolated from each other.
//!
//! ```
//! use paranet::network::{Calculation, Network, Node, Operation};
//! use paranet::signal::Signal;
//!
//! let mut network = Network::new();
//! let input = network.add_node(Node::input("")).unwrap();
//! let avg = network
//!     .add_node(Node::output("", Operation::ReduceBatch(Calculation::average())))
//!     .unwrap();
//! network.connect(&input, &avg).unwrap();
//!
//! network.receive(&input, Signal::simple(0.9, 0.1, "a")).unwrap();
//! network.receive(&input, Signal::simple(0.5, 0.3, "b")).unwrap();
//! network.propagate_all().unwrap();
//!
//! let (mu, lambda) = network.get_outputs(&avg)[0].evidence().unwrap();
//! assert!((mu - 0.7).abs() < 1e-12 && (lambda - 0.2).abs() < 1e-12);
//! ```

use crate::errors::NetworkError;
use crate::network::node::{Node, NodeKind};
use crate::observability::messages::network::{
    CycleDetected, EdgeAdded, NodePropagated, NodeRegistered, OperationFailed,
    PropagationCompleted, PropagationStarted,
};
use crate::observability::messages::StructuredLog;
use crate::signal::Signal;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Instant;

#[derive(Debug, Default)]
pub struct Network {
    nodes: HashMap<String, Node>,
    /// Registration order.
    order: Vec<String>,
    edges: HashMap<String, Vec<String>>,
    reverse_edges: HashMap<String, Vec<String>>,
    id_counters: HashMap<NodeKind, usize>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node`, generating `"<TypeName>_<n>"` when its id is blank.
    ///
    /// Returns the effective id.
    pub fn add_node(&mut self, mut node: Node) -> Result<String, NetworkError> {
        if node.id().trim().is_empty() {
            let id = self.next_id(node.kind());
            node.set_id(id);
        } else if self.nodes.contains_key(node.id()) {
            return Err(NetworkError::DuplicateNodeId {
                node_id: node.id().to_string(),
            });
        }

        let id = node.id().to_string();
        NodeRegistered {
            node_id: &id,
            kind: node.kind().type_name(),
        }
        .log();

        self.edges.insert(id.clone(), Vec::new());
        self.reverse_edges.insert(id.clone(), Vec::new());
        self.order.push(id.clone());
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    fn next_id(&mut self, kind: NodeKind) -> String {
        let counter = self.id_counters.entry(kind).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}_{}", kind.type_name(), counter);
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Add a directed edge. Parallel edges are kept and each one delivers.
    pub fn connect(&mut self, from: &str, to: &str) -> Result<(), NetworkError> {
        for id in [from, to] {
            if !self.nodes.contains_key(id) {
                return Err(NetworkError::UnknownNode {
                    node_id: id.to_string(),
                });
            }
        }

        self.edges.entry(from.to_string()).or_default().push(to.to_string());
        self.reverse_edges.entry(to.to_string()).or_default().push(from.to_string());
        EdgeAdded { from, to }.log();
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Node ids in registration order.
    pub fn node_ids(&self) -> &[String] {
        &self.order
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn downstream(&self, id: &str) -> &[String] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn upstream(&self, id: &str) -> &[String] {
        self.reverse_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Inject a signal into a node's inbox.
    pub fn receive(&mut self, id: &str, signal: Signal) -> Result<(), NetworkError> {
        let node = self.nodes.get_mut(id).ok_or_else(|| NetworkError::UnknownNode {
            node_id: id.to_string(),
        })?;
        node.receive(signal);
        Ok(())
    }

    /// Dependency-respecting execution order, or `CycleDetected`.
    pub fn topological_order(&self) -> Result<Vec<String>, NetworkError> {
        let mut in_degree: HashMap<&str, usize> = self
            .order
            .iter()
            .map(|id| (id.as_str(), self.upstream(id).len()))
            .collect();

        let mut queue: VecDeque<&str> = self
            .order
            .iter()
            .map(String::as_str)
            .filter(|id| in_degree.get(id).copied() == Some(0))
            .collect();
        let mut ordered = Vec::with_capacity(self.order.len());

        while let Some(current) = queue.pop_front() {
            ordered.push(current.to_string());
            for neighbor in self.downstream(current) {
                if let Some(degree) = in_degree.get_mut(neighbor.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(neighbor.as_str());
                    }
                }
            }
        }

        if ordered.len() < self.order.len() {
            let unresolved = self
                .order
                .iter()
                .filter(|id| in_degree.get(id.as_str()).copied().unwrap_or(0) > 0)
                .cloned()
                .collect();
            return Err(NetworkError::CycleDetected { unresolved });
        }

        Ok(ordered)
    }

    /// Run one full pass over the graph.
    ///
    /// Structural failures (cycles) are reported before anything executes.
    /// An operation failure stops the pass at the failing node; nodes ordered
    /// before it keep the outboxes they produced.
    pub fn propagate_all(&mut self) -> Result<(), NetworkError> {
        let order = self.topological_order().map_err(|err| {
            if let NetworkError::CycleDetected { unresolved } = &err {
                CycleDetected { unresolved }.log();
            }
            err
        })?;

        let started = PropagationStarted {
            node_count: order.len(),
            edge_count: self.edge_count(),
        };
        started.log();
        let _pass = started.span("propagate_all").entered();
        let start = Instant::now();
        let mut signal_count = 0;

        for id in &order {
            // One batch per incoming edge, in connect order.
            let delivered: Vec<Vec<Signal>> = self
                .upstream(id)
                .iter()
                .map(|up| self.get_outputs(up).to_vec())
                .collect();

            let node = self.nodes.get_mut(id).ok_or_else(|| NetworkError::UnknownNode {
                node_id: id.clone(),
            })?;
            for batch in delivered {
                node.deliver(batch);
            }

            let inputs = node.pending();
            let operation = node.operation_name();
            match node.propagate() {
                Ok(outputs) => {
                    signal_count += outputs.len();
                    NodePropagated {
                        node_id: id,
                        operation: &operation,
                        inputs,
                        outputs: outputs.len(),
                    }
                    .log();
                }
                Err(source) => {
                    OperationFailed {
                        node_id: id,
                        operation: &operation,
                        error: &source,
                    }
                    .log();
                    return Err(NetworkError::OperationFailed {
                        node_id: id.clone(),
                        operation,
                        source,
                    });
                }
            }
        }

        PropagationCompleted {
            node_count: order.len(),
            signal_count,
            duration: start.elapsed(),
        }
        .log();
        Ok(())
    }

    /// Outbox of `id`; empty for unknown ids.
    pub fn get_outputs(&self, id: &str) -> &[Signal] {
        self.nodes.get(id).map(Node::outputs).unwrap_or(&[])
    }

    /// Every node's outbox keyed by id.
    pub fn get_all_outputs(&self) -> BTreeMap<&str, &[Signal]> {
        self.order
            .iter()
            .map(|id| (id.as_str(), self.get_outputs(id)))
            .collect()
    }

    /// Clear every inbox and outbox.
    pub fn reset_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Calculation, NodeState, Operation};

    #[test]
    fn test_generated_ids_per_type() {
        let mut network = Network::new();
        let ids: Vec<String> = vec![
            Node::input(""),
            Node::input(""),
            Node::logic("", Operation::Identity),
            Node::output("", Operation::Identity),
            Node::logic("", Operation::Identity),
        ]
        .into_iter()
        .map(|n| network.add_node(n).unwrap())
        .collect();

        assert_eq!(
            ids,
            vec!["InputNode_1", "InputNode_2", "LogicNode_1", "OutputNode_1", "LogicNode_2"]
        );
    }

    #[test]
    fn test_generated_id_skips_taken_ids() {
        let mut network = Network::new();
        network.add_node(Node::input("InputNode_1")).unwrap();
        assert_eq!(network.add_node(Node::input("")).unwrap(), "InputNode_2");
    }

    #[test]
    fn test_counters_are_per_network() {
        let mut first = Network::new();
        let mut second = Network::new();
        first.add_node(Node::input("")).unwrap();
        assert_eq!(second.add_node(Node::input("")).unwrap(), "InputNode_1");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut network = Network::new();
        network.add_node(Node::input("a")).unwrap();
        let err = network.add_node(Node::input("a")).unwrap_err();
        assert_eq!(err, NetworkError::DuplicateNodeId { node_id: "a".into() });
        assert_eq!(network.len(), 1);
    }

    #[test]
    fn test_connect_unknown_node() {
        let mut network = Network::new();
        network.add_node(Node::input("a")).unwrap();
        let err = network.connect("a", "missing").unwrap_err();
        assert_eq!(err, NetworkError::UnknownNode { node_id: "missing".into() });
        assert_eq!(network.edge_count(), 0);
    }

    #[test]
    fn test_topological_order_respects_edges() {
        let mut network = Network::new();
        for id in ["d", "c", "b", "a"] {
            network.add_node(Node::logic(id, Operation::Identity)).unwrap();
        }
        network.connect("a", "b").unwrap();
        network.connect("b", "c").unwrap();
        network.connect("a", "d").unwrap();
        network.connect("c", "d").unwrap();

        let order = network.topological_order().unwrap();
        let position = |id: &str| order.iter().position(|x| x == id).unwrap();
        assert_eq!(order.len(), 4);
        assert!(position("a") < position("b"));
        assert!(position("b") < position("c"));
        assert!(position("c") < position("d"));
    }

    #[test]
    fn test_cycle_detected_before_execution() {
        let mut network = Network::new();
        network.add_node(Node::input("src")).unwrap();
        network.add_node(Node::logic("x", Operation::Identity)).unwrap();
        network.add_node(Node::logic("y", Operation::Identity)).unwrap();
        network.connect("src", "x").unwrap();
        network.connect("x", "y").unwrap();
        network.connect("y", "x").unwrap();
        network.receive("src", Signal::simple(0.5, 0.5, "s")).unwrap();

        let err = network.propagate_all().unwrap_err();
        assert_eq!(
            err,
            NetworkError::CycleDetected {
                unresolved: vec!["x".into(), "y".into()]
            }
        );
        // nothing ran, not even the acyclic prefix
        assert_eq!(network.node("src").unwrap().state(), NodeState::Fed);
        assert!(network.get_outputs("src").is_empty());
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let mut network = Network::new();
        network.add_node(Node::logic("x", Operation::Identity)).unwrap();
        network.connect("x", "x").unwrap();
        assert!(matches!(
            network.propagate_all(),
            Err(NetworkError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_fan_out_delivers_independent_clones() {
        let mut network = Network::new();
        network.add_node(Node::input("in")).unwrap();
        network.add_node(Node::output("left", Operation::Identity)).unwrap();
        network.add_node(Node::output("right", Operation::Identity)).unwrap();
        network.connect("in", "left").unwrap();
        network.connect("in", "right").unwrap();
        network.receive("in", Signal::simple(0.6, 0.2, "s")).unwrap();
        network.propagate_all().unwrap();

        assert_eq!(network.get_outputs("left"), network.get_outputs("right"));
        assert_eq!(network.get_outputs("left").len(), 1);
    }

    #[test]
    fn test_parallel_edges_each_deliver() {
        let mut network = Network::new();
        network.add_node(Node::input("in")).unwrap();
        network.add_node(Node::output("out", Operation::Identity)).unwrap();
        network.connect("in", "out").unwrap();
        network.connect("in", "out").unwrap();
        network.receive("in", Signal::simple(0.6, 0.2, "s")).unwrap();
        network.propagate_all().unwrap();

        assert_eq!(network.get_outputs("out").len(), 2);
    }

    #[test]
    fn test_repeated_passes_are_stable() {
        let mut network = Network::new();
        network.add_node(Node::input("in")).unwrap();
        network
            .add_node(Node::output("avg", Operation::ReduceBatch(Calculation::average())))
            .unwrap();
        network.connect("in", "avg").unwrap();
        network.receive("in", Signal::simple(0.9, 0.1, "a")).unwrap();

        network.propagate_all().unwrap();
        let first = network.get_outputs("avg").to_vec();
        network.propagate_all().unwrap();
        assert_eq!(network.get_outputs("avg"), first.as_slice());
    }

    #[test]
    fn test_unknown_outputs_are_empty() {
        let network = Network::new();
        assert!(network.get_outputs("nope").is_empty());
        assert!(network.get_all_outputs().is_empty());
    }

    #[test]
    fn test_reset_all() {
        let mut network = Network::new();
        network.add_node(Node::input("in")).unwrap();
        network.receive("in", Signal::simple(0.9, 0.1, "a")).unwrap();
        network.propagate_all().unwrap();
        assert_eq!(network.get_outputs("in").len(), 1);

        network.reset_all();
        assert!(network.get_outputs("in").is_empty());
        assert_eq!(network.node("in").unwrap().state(), NodeState::Idle);
    }

    #[test]
    fn test_receive_unknown_node() {
        let mut network = Network::new();
        assert!(matches!(
            network.receive("ghost", Signal::simple(0.1, 0.1, "s")),
            Err(NetworkError::UnknownNode { .. })
        ));
    }
}
