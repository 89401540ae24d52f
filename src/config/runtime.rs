// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::loader::{NetworkConfig, NodeKindConfig};
use crate::errors::ConfigError;
use crate::network::{Network, Node};
use crate::signal::Signal;
use crate::wiring::ParaconsistentBlock;

/// A network built from a description, seed signals already injected.
#[derive(Debug)]
pub struct Runtime {
    pub network: Network,
    pub blocks: Vec<ParaconsistentBlock>,
}

impl Runtime {
    /// Run one propagation pass.
    pub fn run(&mut self) -> Result<(), ConfigError> {
        Ok(self.network.propagate_all()?)
    }
}

/// Builds a live [`Network`] from a [`NetworkConfig`].
///
/// The description should have passed
/// [`validate_network_config`](crate::config::validate_network_config);
/// building re-checks ids and references through the network itself and
/// reports the first failure.
///
/// # Examples
///
/// ```
/// use paranet::config::{parse_yaml, RuntimeBuilder};
///
/// let cfg = parse_yaml(r#"
/// blocks:
///   - id: b
/// signals:
///   - { node: b.in, mu: 1.0, lambda: 0.0, source: s }
/// "#).unwrap();
///
/// let mut runtime = RuntimeBuilder::from_config(&cfg).unwrap();
/// runtime.run().unwrap();
/// assert_eq!(runtime.blocks[0].classified(&runtime.network).unwrap().label.as_str(), "V");
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    pub fn from_config(cfg: &NetworkConfig) -> Result<Runtime, ConfigError> {
        let mut network = Network::new();

        let mut blocks = Vec::with_capacity(cfg.blocks.len());
        for block in &cfg.blocks {
            let params = block.params.unwrap_or(cfg.params);
            blocks.push(ParaconsistentBlock::new(&mut network, &block.id, params)?);
        }

        for node in &cfg.nodes {
            let built = match (&node.kind, &node.operation) {
                (NodeKindConfig::Input, _) => Node::input(node.id.as_str()),
                (kind, operation) => {
                    let mut builder = Node::builder((*kind).into()).id(node.id.as_str());
                    if let Some(operation) = operation {
                        builder = builder.operation(operation.build(&cfg.params));
                    }
                    builder.build()?
                }
            };
            network.add_node(built)?;
        }

        for node in &cfg.nodes {
            for dependency in &node.depends_on {
                network.connect(dependency, &node.id)?;
            }
        }

        for signal in &cfg.signals {
            network.receive(
                &signal.node,
                Signal::simple(signal.mu, signal.lambda, signal.source.as_str()),
            )?;
        }

        Ok(Runtime { network, blocks })
    }
}
