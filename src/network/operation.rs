// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Batch transformations carried by Logic and Output nodes.
//!
//! Every operation maps the batch of signals a node received during a pass
//! to the batch it emits. An empty batch always yields an empty batch.

use crate::errors::OperationError;
use crate::network::calculation::{Calculate, Calculation, AGGREGATED_SOURCE};
use crate::paraconsistent::{compute, BlockParams, Region};
use crate::signal::{CompleteSignal, Signal};
use crate::wiring::BridgeOperation;

/// Labels a whole batch of complete signals with one region.
///
/// The label comes from the mean evidence of the batch; the confidence is the
/// mean certainty of the inputs. Non-complete signals are ignored, and a
/// batch without any complete signal is [`Region::Undecided`] with confidence
/// `0.0`. Only an empty batch yields nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchClassifier {
    pub params: BlockParams,
}

impl BatchClassifier {
    pub fn new(params: BlockParams) -> Self {
        Self { params }
    }

    pub fn classify(&self, inputs: &[Signal]) -> Option<Signal> {
        let completes: Vec<&CompleteSignal> = inputs
            .iter()
            .filter_map(|s| match s {
                Signal::Complete(c) => Some(c),
                _ => None,
            })
            .collect();
        let Some(first) = completes.first() else {
            let first = inputs.first()?;
            let source = if inputs.iter().all(|s| s.source_id() == first.source_id()) {
                first.source_id()
            } else {
                AGGREGATED_SOURCE
            };
            return Some(Signal::classified(Region::Undecided, 0.0, source));
        };

        let n = completes.len() as f64;
        let mu = completes.iter().map(|c| c.record.mu).sum::<f64>() / n;
        let lambda = completes.iter().map(|c| c.record.lambda).sum::<f64>() / n;
        let confidence = completes.iter().map(|c| c.record.gc).sum::<f64>() / n;
        let record = compute(mu, lambda, &self.params);

        let source = if completes.iter().all(|c| c.source_id == first.source_id) {
            first.source_id.as_str()
        } else {
            AGGREGATED_SOURCE
        };

        Some(Signal::classified(record.label, confidence, source))
    }
}

#[derive(Debug, Clone)]
pub enum Operation {
    /// Emit the batch unchanged.
    Identity,
    /// Run the calculation once per signal.
    EachSignal(Calculation),
    /// Emit only the most recently received signal.
    LastOfBatch,
    /// Feed the whole batch to the calculation and emit its single result.
    ReduceBatch(Calculation),
    Classify(BatchClassifier),
    /// Evaluate a bound expression.
    Bridge(BridgeOperation),
}

impl Operation {
    pub fn execute(&mut self, inputs: &[Signal]) -> Result<Vec<Signal>, OperationError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        match self {
            Operation::Identity => Ok(inputs.to_vec()),
            Operation::EachSignal(calc) => {
                let mut outputs = Vec::with_capacity(inputs.len());
                for signal in inputs {
                    calc.clear();
                    calc.process(signal);
                    outputs.extend(calc.result());
                }
                calc.clear();
                Ok(outputs)
            }
            Operation::LastOfBatch => Ok(inputs.last().cloned().into_iter().collect()),
            Operation::ReduceBatch(calc) => {
                calc.clear();
                for signal in inputs {
                    calc.process(signal);
                }
                let result = calc.result();
                calc.clear();
                Ok(result.into_iter().collect())
            }
            Operation::Classify(classifier) => Ok(classifier.classify(inputs).into_iter().collect()),
            Operation::Bridge(bridge) => bridge.execute(inputs),
        }
    }

    /// Run over what a node collected during a pass: signals injected by the
    /// caller plus one batch per incoming edge.
    ///
    /// Bridges read their edges positionally, one value per source. Every
    /// other operation sees the injected signals followed by the flattened
    /// edge batches.
    pub fn execute_edges(
        &mut self,
        injected: Vec<Signal>,
        edges: Vec<Vec<Signal>>,
    ) -> Result<Vec<Signal>, OperationError> {
        match self {
            Operation::Bridge(bridge) if !edges.is_empty() => bridge.execute_edges(&edges),
            _ => {
                let mut inputs = injected;
                inputs.extend(edges.into_iter().flatten());
                self.execute(&inputs)
            }
        }
    }

    pub fn name(&self) -> String {
        match self {
            Operation::Identity => "identity".to_string(),
            Operation::EachSignal(calc) => format!("each_signal({})", calc.name()),
            Operation::LastOfBatch => "last_of_batch".to_string(),
            Operation::ReduceBatch(calc) => format!("reduce_batch({})", calc.name()),
            Operation::Classify(_) => "classify".to_string(),
            Operation::Bridge(_) => "bridge".to_string(),
        }
    }

    pub fn params(&self) -> Option<&BlockParams> {
        match self {
            Operation::EachSignal(calc) | Operation::ReduceBatch(calc) => calc.params(),
            Operation::Classify(classifier) => Some(&classifier.params),
            _ => None,
        }
    }

    /// Replace the thresholds in place; returns false when the operation has none.
    pub fn set_params(&mut self, params: BlockParams) -> bool {
        match self {
            Operation::EachSignal(calc) | Operation::ReduceBatch(calc) => calc.set_params(params),
            Operation::Classify(classifier) => {
                classifier.params = params.clamped();
                true
            }
            _ => false,
        }
    }
}
