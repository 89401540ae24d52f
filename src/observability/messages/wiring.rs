// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for block construction and expression binding.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A block finished wiring its internal chain.
///
/// # Log Level
/// `debug!` - Construction detail
pub struct BlockCreated<'a> {
    pub block_id: &'a str,
    pub node_count: usize,
}

impl Display for BlockCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Created block '{}' with {} nodes", self.block_id, self.node_count)
    }
}

impl StructuredLog for BlockCreated<'_> {
    fn log(&self) {
        tracing::debug!(block_id = self.block_id, node_count = self.node_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("block_created", span_name = name, block_id = self.block_id)
    }
}

/// An expression was compiled into a bridge node.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use paranet::observability::messages::wiring::BridgeSynthesized;
///
/// let msg = BridgeSynthesized {
///     bridge_id: "LogicNode_1",
///     target: "b.in.mu",
///     source_count: 2,
/// };
///
/// assert_eq!(msg.to_string(), "Bound 2-source expression to 'b.in.mu' via 'LogicNode_1'");
/// ```
pub struct BridgeSynthesized<'a> {
    pub bridge_id: &'a str,
    pub target: &'a str,
    pub source_count: usize,
}

impl Display for BridgeSynthesized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Bound {}-source expression to '{}' via '{}'",
            self.source_count, self.target, self.bridge_id
        )
    }
}

impl StructuredLog for BridgeSynthesized<'_> {
    fn log(&self) {
        tracing::info!(
            bridge_id = self.bridge_id,
            target = self.target,
            source_count = self.source_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "bridge_synthesized",
            span_name = name,
            bridge_id = self.bridge_id,
            target = self.target,
        )
    }
}

/// Block thresholds changed after construction.
///
/// # Log Level
/// `debug!` - Configuration detail
pub struct BlockParamsUpdated<'a> {
    pub block_id: &'a str,
    pub ftc: f64,
    pub vlv: f64,
    pub vlf: f64,
}

impl Display for BlockParamsUpdated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Block '{}' params updated: FtC={} VlV={} VlF={}",
            self.block_id, self.ftc, self.vlv, self.vlf
        )
    }
}

impl StructuredLog for BlockParamsUpdated<'_> {
    fn log(&self) {
        tracing::debug!(
            block_id = self.block_id,
            ftc = self.ftc,
            vlv = self.vlv,
            vlf = self.vlf,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("block_params_updated", span_name = name, block_id = self.block_id)
    }
}
