// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;         // network descriptions + runtime builder
pub mod errors;         // error handling
pub mod network;        // dataflow graph engine
pub mod observability;
pub mod paraconsistent; // PAL2v metrics and region classifier
pub mod signal;         // signals flowing between nodes
pub mod wiring;         // blocks, ports and the expression DSL
