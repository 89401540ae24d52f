// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for a human-readable line and
//! [`StructuredLog`] for emitting the same event with typed fields.
//!
//! # Organization
//!
//! * `network` - graph construction and propagation events
//! * `wiring` - block creation and expression binding events
//! * `validation` - network description validation failures
//!
//! # Usage Pattern
//!
//! ```rust
//! use paranet::observability::messages::network::PropagationStarted;
//! use paranet::observability::messages::StructuredLog;
//!
//! let msg = PropagationStarted {
//!     node_count: 5,
//!     edge_count: 4,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod network;
pub mod validation;
pub mod wiring;

/// Emit a message as a structured tracing event or open a span carrying its fields.
pub trait StructuredLog {
    /// Emit the event at the message's level.
    fn log(&self);

    /// Span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
