// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Generic directed-acyclic dataflow engine.

mod calculation;
mod graph;
mod node;
mod operation;


pub use calculation::{
    AverageAggregation, Calculate, Calculation, ParaconsistentParser, SignalClassifier,
    AGGREGATED_SOURCE,
};
pub use graph::Network;
pub use node::{Node, NodeBuilder, NodeKind, NodeState};
pub use operation::{BatchClassifier, Operation};
