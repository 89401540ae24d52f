// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Network description validation.
//!
//! Catches every structural problem a description can have before a
//! [`Network`](crate::network::Network) is built from it, so that building
//! never fails halfway.
//!
//! # Validation Pipeline
//!
//! 1. **Uniqueness**: node ids (including the ids blocks expand to) are unique
//! 2. **Shape**: input nodes carry no operation and no dependencies; logic and
//!    output nodes carry an operation
//! 3. **References**: every `depends_on` entry names a node, every signal
//!    targets an input node
//! 4. **Cycle detection**: DFS with a recursion stack, reporting the cycle path
//!
//! Cycle detection needs a structurally valid graph, so it only runs when the
//! earlier stages found nothing. Errors are accumulated so a user sees all of
//! them at once.
//!
//! ```rust
//! use paranet::config::{parse_yaml, validate_network_config};
//! use paranet::errors::ValidationError;
//!
//! let cfg = parse_yaml(r#"
//! nodes:
//!   - { id: a, kind: logic, operation: { type: identity }, depends_on: [missing] }
//! "#).unwrap();
//!
//! let errors = validate_network_config(&cfg).unwrap_err();
//! assert_eq!(errors, vec![ValidationError::UnresolvedDependency {
//!     node_id: "a".into(),
//!     missing_dependency: "missing".into(),
//! }]);
//! ```

use crate::config::loader::{NetworkConfig, NodeKindConfig};
use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    CyclicDependencyDetected, DuplicateNodeId, UnresolvedDependency,
};
use crate::observability::messages::StructuredLog;
use std::collections::{HashMap, HashSet};

/// Suffixes of the nodes a block expands to, upstream first.
pub const BLOCK_NODE_SUFFIXES: [&str; 4] = ["in", "last", "complete", "classified"];

/// Validates a network description for structural integrity.
///
/// # Returns
///
/// * `Ok(())` - the description can be built and propagated
/// * `Err(Vec<ValidationError>)` - every problem found
pub fn validate_network_config(config: &NetworkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(validate_unique_node_ids(config));
    errors.extend(validate_node_shapes(config));
    errors.extend(validate_references(config));

    if errors.is_empty() {
        if let Err(cycle_error) = validate_acyclic_graph(config) {
            errors.push(cycle_error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Every node id the description declares, blocks expanded, in declaration order.
fn declared_ids(config: &NetworkConfig) -> Vec<(String, NodeKindConfig)> {
    let mut ids = Vec::new();
    for block in &config.blocks {
        for (i, suffix) in BLOCK_NODE_SUFFIXES.iter().enumerate() {
            let kind = match i {
                0 => NodeKindConfig::Input,
                3 => NodeKindConfig::Output,
                _ => NodeKindConfig::Logic,
            };
            ids.push((format!("{}.{}", block.id, suffix), kind));
        }
    }
    for node in &config.nodes {
        ids.push((node.id.clone(), node.kind));
    }
    ids
}

fn validate_unique_node_ids(config: &NetworkConfig) -> Vec<ValidationError> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for (id, _) in declared_ids(config) {
        if !seen_ids.insert(id.clone()) {
            DuplicateNodeId { node_id: &id }.log();
            errors.push(ValidationError::DuplicateNodeId { node_id: id });
        }
    }

    errors
}

fn validate_node_shapes(config: &NetworkConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for node in &config.nodes {
        match (node.kind, node.operation.is_some()) {
            (NodeKindConfig::Input, true) => errors.push(ValidationError::OperationOnInputNode {
                node_id: node.id.clone(),
            }),
            (NodeKindConfig::Logic | NodeKindConfig::Output, false) => {
                errors.push(ValidationError::MissingOperation {
                    node_id: node.id.clone(),
                })
            }
            _ => {}
        }
        if node.kind == NodeKindConfig::Input && !node.depends_on.is_empty() {
            errors.push(ValidationError::InputWithDependencies {
                node_id: node.id.clone(),
            });
        }
    }

    errors
}

fn validate_references(config: &NetworkConfig) -> Vec<ValidationError> {
    let kinds: HashMap<String, NodeKindConfig> = declared_ids(config).into_iter().collect();
    let mut errors = Vec::new();

    for node in &config.nodes {
        for dependency in &node.depends_on {
            if !kinds.contains_key(dependency) {
                UnresolvedDependency {
                    node_id: &node.id,
                    missing_dependency: dependency,
                }
                .log();
                errors.push(ValidationError::UnresolvedDependency {
                    node_id: node.id.clone(),
                    missing_dependency: dependency.clone(),
                });
            }
        }
    }

    for signal in &config.signals {
        if kinds.get(&signal.node) != Some(&NodeKindConfig::Input) {
            errors.push(ValidationError::UnknownSignalTarget {
                node_id: signal.node.clone(),
            });
        }
    }

    errors
}

/// Validates that the dependency graph is acyclic using DFS-based cycle detection.
///
/// Uses the "three colors" approach: a node found again while it is still on
/// the recursion stack closes a cycle, and the path from its first occurrence
/// to the current node is reported with the back edge appended.
///
/// Block-internal chains are part of the graph, so a path through a block is
/// followed like any other.
fn validate_acyclic_graph(config: &NetworkConfig) -> Result<(), ValidationError> {
    let ids = declared_ids(config);
    let mut graph: HashMap<&str, Vec<&str>> = ids.iter().map(|(id, _)| (id.as_str(), Vec::new())).collect();

    for chain in ids.chunks(BLOCK_NODE_SUFFIXES.len()).take(config.blocks.len()) {
        for pair in chain.windows(2) {
            if let Some(dependents) = graph.get_mut(pair[0].0.as_str()) {
                dependents.push(pair[1].0.as_str());
            }
        }
    }

    for node in &config.nodes {
        for dependency in &node.depends_on {
            if let Some(dependents) = graph.get_mut(dependency.as_str()) {
                dependents.push(node.id.as_str());
            }
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for (id, _) in &ids {
        if !visited.contains(id.as_str()) {
            if let Some(cycle) = dfs_cycle_detection(id, &graph, &mut visited, &mut rec_stack, &mut path) {
                let cycle_refs: Vec<&str> = cycle.iter().map(String::as_str).collect();
                CyclicDependencyDetected { cycle: &cycle_refs }.log();
                return Err(ValidationError::CyclicDependency { cycle });
            }
        }
    }

    Ok(())
}

/// DFS with recursion-stack tracking; returns the cycle path when one is found.
///
/// For graph A → B → C → A the walk reaches A again while it is still on the
/// stack, and the cycle `[A, B, C, A]` is the path from A's position onward
/// plus the closing edge.
fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let cycle_start = path.iter().position(|x| *x == neighbor).unwrap_or(0);
                let mut cycle: Vec<String> = path[cycle_start..].iter().map(|s| s.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{BlockConfig, NodeConfig, OperationConfig, SignalConfig};
    use crate::paraconsistent::BlockParams;

    fn node(id: &str, kind: NodeKindConfig, depends_on: Vec<&str>) -> NodeConfig {
        NodeConfig {
            id: id.to_string(),
            kind,
            operation: match kind {
                NodeKindConfig::Input => None,
                _ => Some(OperationConfig::Identity),
            },
            depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn config(nodes: Vec<NodeConfig>) -> NetworkConfig {
        NetworkConfig {
            params: BlockParams::default(),
            blocks: vec![],
            nodes,
            signals: vec![],
        }
    }

    #[test]
    fn test_valid_empty_config() {
        assert!(validate_network_config(&config(vec![])).is_ok());
    }

    #[test]
    fn test_valid_diamond() {
        let cfg = config(vec![
            node("a", NodeKindConfig::Input, vec![]),
            node("b", NodeKindConfig::Logic, vec!["a"]),
            node("c", NodeKindConfig::Logic, vec!["a"]),
            node("d", NodeKindConfig::Output, vec!["b", "c"]),
        ]);
        assert!(validate_network_config(&cfg).is_ok());
    }

    #[test]
    fn test_duplicate_node_ids() {
        let cfg = config(vec![
            node("a", NodeKindConfig::Input, vec![]),
            node("a", NodeKindConfig::Input, vec![]),
        ]);
        let errors = validate_network_config(&cfg).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicateNodeId { node_id: "a".into() }]);
    }

    #[test]
    fn test_block_ids_collide_with_nodes() {
        let mut cfg = config(vec![node("b.in", NodeKindConfig::Input, vec![])]);
        cfg.blocks.push(BlockConfig { id: "b".into(), params: None });
        let errors = validate_network_config(&cfg).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicateNodeId { node_id: "b.in".into() }]);
    }

    #[test]
    fn test_node_shapes() {
        let mut input_with_op = node("i", NodeKindConfig::Input, vec![]);
        input_with_op.operation = Some(OperationConfig::Identity);
        let mut logic_without_op = node("l", NodeKindConfig::Logic, vec![]);
        logic_without_op.operation = None;
        let input_with_deps = node("j", NodeKindConfig::Input, vec!["i"]);

        let errors = validate_network_config(&config(vec![input_with_op, logic_without_op, input_with_deps]))
            .unwrap_err();
        assert!(errors.contains(&ValidationError::OperationOnInputNode { node_id: "i".into() }));
        assert!(errors.contains(&ValidationError::MissingOperation { node_id: "l".into() }));
        assert!(errors.contains(&ValidationError::InputWithDependencies { node_id: "j".into() }));
    }

    #[test]
    fn test_signal_must_target_input() {
        let mut cfg = config(vec![
            node("a", NodeKindConfig::Input, vec![]),
            node("b", NodeKindConfig::Logic, vec!["a"]),
        ]);
        cfg.blocks.push(BlockConfig { id: "blk".into(), params: None });
        for target in ["a", "b", "blk.in", "ghost"] {
            cfg.signals.push(SignalConfig {
                node: target.into(),
                mu: 0.5,
                lambda: 0.5,
                source: String::new(),
            });
        }

        let errors = validate_network_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownSignalTarget { node_id: "b".into() },
                ValidationError::UnknownSignalTarget { node_id: "ghost".into() },
            ]
        );
    }

    #[test]
    fn test_simple_cycle() {
        let cfg = config(vec![
            node("a", NodeKindConfig::Logic, vec!["b"]),
            node("b", NodeKindConfig::Logic, vec!["a"]),
        ]);
        let errors = validate_network_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".into(), "b".into(), "a".into()]
            }]
        );
    }

    #[test]
    fn test_self_dependency_cycle() {
        let cfg = config(vec![node("a", NodeKindConfig::Logic, vec!["a"])]);
        let errors = validate_network_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".into(), "a".into()]
            }]
        );
    }

    #[test]
    fn test_dependency_on_block_node() {
        let mut cfg = config(vec![node("after", NodeKindConfig::Output, vec!["b.classified"])]);
        cfg.blocks.push(BlockConfig { id: "b".into(), params: None });
        assert!(validate_network_config(&cfg).is_ok());

        cfg.nodes[0].depends_on.push("b.missing".into());
        let errors = validate_network_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnresolvedDependency {
                node_id: "after".into(),
                missing_dependency: "b.missing".into(),
            }]
        );
    }

    #[test]
    fn test_unresolved_skips_cycle_detection() {
        let cfg = config(vec![
            node("a", NodeKindConfig::Logic, vec!["b", "missing"]),
            node("b", NodeKindConfig::Logic, vec!["a"]),
        ]);
        let errors = validate_network_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::UnresolvedDependency { .. }));
    }
}
