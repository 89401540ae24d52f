// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A pre-wired paraconsistent analysis chain.
//!
//! ```text
//!   <id>.in ──► <id>.last ──► <id>.complete ──► <id>.classified
//!   (Input)     (LastOfBatch)  (Parse)           (RegionClassifier, Output)
//! ```
//!
//! Ports:
//! * `in` - `mu`, `lam` (alias `lambda`); the only bindable port. Reads
//!   come from `<id>.last` (the effective input of the pass), bridges write
//!   into `<id>.in`
//! * `complete` - every derived metric of the record
//! * `classified` - `confidence`

use crate::errors::{NetworkError, WiringError};
use crate::network::{Calculation, Network, Node, Operation};
use crate::observability::messages::wiring::{BlockCreated, BlockParamsUpdated};
use crate::observability::messages::StructuredLog;
use crate::paraconsistent::{clamp01, BlockParams, CompleteRecord};
use crate::signal::{ClassifiedSignal, Signal};
use crate::wiring::block::{Block, INPUT_PORT};
use crate::wiring::schema::{read_certainty, read_lambda, read_mu, Port, PortRef, PortSchema};

pub const COMPLETE_PORT: &str = "complete";
pub const CLASSIFIED_PORT: &str = "classified";

fn metric(signal: &Signal, name: &str) -> f64 {
    match signal {
        Signal::Complete(c) => c.record.metric(name).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn complete_port(node_id: &str) -> Port {
    Port::new(node_id)
        .field("mu", read_mu)
        .field("lam", read_lambda)
        .field("lambda", read_lambda)
        .field("gc", |s| metric(s, "gc"))
        .field("gct", |s| metric(s, "gct"))
        .field("gcr", |s| metric(s, "gcr"))
        .field("d", |s| metric(s, "d"))
        .field("D", |s| metric(s, "D"))
        .field("phi", |s| metric(s, "phi"))
        .field("muE", |s| metric(s, "muE"))
        .field("muECT", |s| metric(s, "muECT"))
        .field("muER", |s| metric(s, "muER"))
        .field("phiE", |s| metric(s, "phiE"))
        .field("decision_output", |s| metric(s, "decision_output"))
        .field("certainty", read_certainty)
}

#[derive(Debug, Clone)]
pub struct ParaconsistentBlock {
    id: String,
    params: BlockParams,
    schema: PortSchema,
    input_node: String,
    last_node: String,
    complete_node: String,
    classified_node: String,
}

impl ParaconsistentBlock {
    /// Register the block's four nodes and their edges in `network`.
    pub fn new(network: &mut Network, id: &str, params: BlockParams) -> Result<Self, WiringError> {
        let params = params.clamped();
        let input_node = format!("{}.{}", id, INPUT_PORT);
        let last_node = format!("{}.last", id);
        let complete_node = format!("{}.{}", id, COMPLETE_PORT);
        let classified_node = format!("{}.{}", id, CLASSIFIED_PORT);

        for node_id in [&input_node, &last_node, &complete_node, &classified_node] {
            if network.contains(node_id) {
                return Err(NetworkError::DuplicateNodeId {
                    node_id: node_id.clone(),
                }
                .into());
            }
        }

        network.add_node(Node::input(input_node.as_str()))?;
        network.add_node(Node::logic(last_node.as_str(), Operation::LastOfBatch))?;
        network.add_node(Node::logic(
            complete_node.as_str(),
            Operation::EachSignal(Calculation::parse(params)),
        ))?;
        network.add_node(Node::output(
            classified_node.as_str(),
            Operation::EachSignal(Calculation::region_classifier(params)),
        ))?;
        network.connect(&input_node, &last_node)?;
        network.connect(&last_node, &complete_node)?;
        network.connect(&complete_node, &classified_node)?;

        let schema = PortSchema::new()
            .with_port(
                INPUT_PORT,
                Port::new(last_node.as_str())
                    .writes_to(input_node.as_str())
                    .field("mu", read_mu)
                    .field("lam", read_lambda)
                    .field("lambda", read_lambda),
            )
            .with_port(COMPLETE_PORT, complete_port(&complete_node))
            .with_port(
                CLASSIFIED_PORT,
                Port::new(classified_node.as_str()).field("confidence", read_certainty),
            );

        BlockCreated {
            block_id: id,
            node_count: 4,
        }
        .log();

        Ok(Self {
            id: id.to_string(),
            params,
            schema,
            input_node,
            last_node,
            complete_node,
            classified_node,
        })
    }

    pub fn params(&self) -> &BlockParams {
        &self.params
    }

    /// Ids of the internal nodes, upstream first.
    pub fn node_ids(&self) -> [&str; 4] {
        [
            &self.input_node,
            &self.last_node,
            &self.complete_node,
            &self.classified_node,
        ]
    }

    /// Feed evidence into the block's input node; values are clamped to `[0, 1]`.
    pub fn set_input(
        &self,
        network: &mut Network,
        mu: f64,
        lambda: f64,
        source_id: &str,
    ) -> Result<(), NetworkError> {
        network.receive(
            &self.input_node,
            Signal::simple(clamp01(mu), clamp01(lambda), source_id),
        )
    }

    /// Replace the thresholds of the parse and classify steps in place.
    pub fn set_params(&mut self, network: &mut Network, params: BlockParams) -> Result<(), NetworkError> {
        let params = params.clamped();
        for node_id in [&self.complete_node, &self.classified_node] {
            let node = network.node_mut(node_id).ok_or_else(|| NetworkError::UnknownNode {
                node_id: node_id.clone(),
            })?;
            if let Some(operation) = node.operation_mut() {
                operation.set_params(params);
            }
        }
        self.params = params;

        BlockParamsUpdated {
            block_id: &self.id,
            ftc: params.ftc,
            vlv: params.vlv,
            vlf: params.vlf,
        }
        .log();
        Ok(())
    }

    pub fn in_port(&self) -> Result<PortRef, WiringError> {
        self.port(INPUT_PORT)
    }

    pub fn complete_port(&self) -> Result<PortRef, WiringError> {
        self.port(COMPLETE_PORT)
    }

    pub fn classified_port(&self) -> Result<PortRef, WiringError> {
        self.port(CLASSIFIED_PORT)
    }

    /// Latest complete record produced by the last pass.
    pub fn complete<'n>(&self, network: &'n Network) -> Option<&'n CompleteRecord> {
        network
            .get_outputs(&self.complete_node)
            .iter()
            .rev()
            .find_map(|s| match s {
                Signal::Complete(c) => Some(&c.record),
                _ => None,
            })
    }

    /// Latest classification produced by the last pass.
    pub fn classified<'n>(&self, network: &'n Network) -> Option<&'n ClassifiedSignal> {
        network
            .get_outputs(&self.classified_node)
            .iter()
            .rev()
            .find_map(|s| match s {
                Signal::Classified(c) => Some(c),
                _ => None,
            })
    }
}

impl Block for ParaconsistentBlock {
    fn block_id(&self) -> &str {
        &self.id
    }

    fn schema(&self) -> &PortSchema {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paraconsistent::Region;

    #[test]
    fn test_block_registers_chain() {
        let mut network = Network::new();
        let block = ParaconsistentBlock::new(&mut network, "b", BlockParams::default()).unwrap();

        assert_eq!(block.node_ids(), ["b.in", "b.last", "b.complete", "b.classified"]);
        assert_eq!(network.len(), 4);
        assert_eq!(network.downstream("b.in"), &["b.last".to_string()]);
        assert_eq!(network.downstream("b.complete"), &["b.classified".to_string()]);
    }

    #[test]
    fn test_block_id_collision() {
        let mut network = Network::new();
        ParaconsistentBlock::new(&mut network, "b", BlockParams::default()).unwrap();
        let err = ParaconsistentBlock::new(&mut network, "b", BlockParams::default()).unwrap_err();
        assert!(matches!(err, WiringError::Network(NetworkError::DuplicateNodeId { .. })));
        assert_eq!(network.len(), 4);
    }

    #[test]
    fn test_block_runs_last_input() {
        let mut network = Network::new();
        let block = ParaconsistentBlock::new(&mut network, "b", BlockParams::default()).unwrap();
        block.set_input(&mut network, 0.2, 0.9, "old").unwrap();
        block.set_input(&mut network, 1.0, 0.0, "new").unwrap();
        network.propagate_all().unwrap();

        let record = block.complete(&network).unwrap();
        assert_eq!(record.label, Region::True);
        assert_eq!(record.gc, 1.0);

        let classified = block.classified(&network).unwrap();
        assert_eq!(classified.label, Region::True);
        assert_eq!(classified.confidence, 1.0);
        assert_eq!(classified.source_id, "new");
    }

    #[test]
    fn test_set_input_clamps() {
        let mut network = Network::new();
        let block = ParaconsistentBlock::new(&mut network, "b", BlockParams::default()).unwrap();
        block.set_input(&mut network, 1.7, -0.2, "s").unwrap();
        assert_eq!(
            network.node("b.in").unwrap().inbox(),
            &[Signal::simple(1.0, 0.0, "s")]
        );
    }

    #[test]
    fn test_set_params_changes_result() {
        let mut network = Network::new();
        let mut block = ParaconsistentBlock::new(&mut network, "b", BlockParams::default()).unwrap();
        block.set_input(&mut network, 0.8, 0.2, "s").unwrap();

        network.propagate_all().unwrap();
        assert_eq!(block.complete(&network).unwrap().label, Region::True);

        block
            .set_params(&mut network, BlockParams::default().with_ftc(0.9))
            .unwrap();
        network.propagate_all().unwrap();
        let record = block.complete(&network).unwrap();
        assert_eq!(record.ftc, 0.9);
        assert_ne!(record.label, Region::True);
        assert_eq!(block.params().ftc, 0.9);
    }

    #[test]
    fn test_ports_and_fields() {
        let mut network = Network::new();
        let block = ParaconsistentBlock::new(&mut network, "b", BlockParams::default()).unwrap();

        let in_port = block.in_port().unwrap();
        assert!(in_port.is_input);
        assert_eq!(in_port.node_id(), "b.last");
        assert_eq!(block.field("in", "lam").unwrap().write_node_id, "b.in");
        assert!(!block.complete_port().unwrap().is_input);
        assert_eq!(block.classified_port().unwrap().node_id(), "b.classified");
        assert!(block.field("complete", "muER").is_ok());
        assert!(matches!(
            block.port("nope"),
            Err(WiringError::UnknownPort { .. })
        ));
        assert!(matches!(
            block.field("classified", "gc"),
            Err(WiringError::UnknownField { .. })
        ));
    }
}
