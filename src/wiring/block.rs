// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::WiringError;
use crate::wiring::schema::{FieldRef, PortRef, PortSchema};

/// Name of the writable port every block exposes.
pub const INPUT_PORT: &str = "in";

/// A group of nodes that exposes named ports to the wiring DSL.
pub trait Block {
    fn block_id(&self) -> &str;

    fn schema(&self) -> &PortSchema;

    /// The only port expressions may be bound to.
    fn input_port(&self) -> &str {
        INPUT_PORT
    }

    /// Resolve a port by name.
    fn port(&self, name: &str) -> Result<PortRef, WiringError> {
        let port = self
            .schema()
            .port(name)
            .ok_or_else(|| WiringError::UnknownPort {
                block_id: self.block_id().to_string(),
                port: name.to_string(),
            })?;
        Ok(PortRef::new(
            self.block_id(),
            name,
            name == self.input_port(),
            port.clone(),
        ))
    }

    /// Shorthand for `port(port)?.field(field)`.
    fn field(&self, port: &str, field: &str) -> Result<FieldRef, WiringError> {
        self.port(port)?.field(field)
    }
}
