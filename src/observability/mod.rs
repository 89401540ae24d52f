// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with `Display` so that log
//! text lives in one place instead of being scattered through the engine.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::network` - node registration, edges and propagation passes
//! * `messages::wiring` - block construction and bridge synthesis
//! * `messages::validation` - network description validation failures
//!
//! # Usage
//!
//! ```rust
//! use paranet::observability::messages::network::NodeRegistered;
//!
//! let msg = NodeRegistered {
//!     node_id: "InputNode_1",
//!     kind: "InputNode",
//! };
//!
//! tracing::debug!("{}", msg);
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, honouring `RUST_LOG` and falling back to `default_level`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
