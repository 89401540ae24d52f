// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Expression-building wiring layer.
//!
//! Blocks expose named ports; ports hand out field references; field
//! references compose into [`Expression`]s; binding an expression to a
//! block's input field compiles it into a bridge node plus edges.
//!
//! ```
//! use paranet::network::Network;
//! use paranet::paraconsistent::BlockParams;
//! use paranet::wiring::{Block, ParaconsistentBlock};
//!
//! let mut network = Network::new();
//! let a = ParaconsistentBlock::new(&mut network, "a", BlockParams::default()).unwrap();
//! let b = ParaconsistentBlock::new(&mut network, "b", BlockParams::default()).unwrap();
//!
//! // b.mu = 1 - a.muER
//! let a_mu_er = a.field("complete", "muER").unwrap();
//! paranet::wiring::Expression::constant(1.0)
//!     .subtract(&a_mu_er)
//!     .bind_to(&mut network, &b.field("in", "mu").unwrap())
//!     .unwrap();
//!
//! a.set_input(&mut network, 1.0, 0.0, "sensor").unwrap();
//! network.propagate_all().unwrap();
//! assert_eq!(b.complete(&network).unwrap().mu, 0.0);
//! ```

mod block;
mod bridge;
mod expression;
mod paraconsistent_block;
mod schema;

pub use block::{Block, INPUT_PORT};
pub use bridge::{bind, BridgeOperation, InputAttr};
pub use expression::Expression;
pub use paraconsistent_block::{ParaconsistentBlock, CLASSIFIED_PORT, COMPLETE_PORT};
pub use schema::{read_certainty, read_lambda, read_mu, FieldReader, FieldRef, Port, PortRef, PortSchema};
