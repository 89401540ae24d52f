// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod network;
mod wiring;

pub use config::{ConfigError, ValidationError};
pub use network::{ExpressionError, NetworkError, OperationError};
pub use wiring::WiringError;
