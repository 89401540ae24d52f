// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::NetworkError;
use thiserror::Error;

/// Errors raised while resolving port references or binding expressions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WiringError {
    #[error("block '{block_id}' has no port '{port}'")]
    UnknownPort { block_id: String, port: String },

    #[error("port '{block_id}.{port}' has no field '{field}'")]
    UnknownField {
        block_id: String,
        port: String,
        field: String,
    },

    #[error("expression has no sources to bind")]
    NoSources,

    #[error("binding '{block_id}' to itself would create a cycle")]
    DirectCycle { block_id: String },

    #[error("'{block_id}.{port}.{field}' is not a writable input field")]
    NotAnInputPort {
        block_id: String,
        port: String,
        field: String,
    },

    #[error(transparent)]
    Network(#[from] NetworkError),
}
