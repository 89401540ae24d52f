// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Port schemas: which scalar fields a block exposes on which node.

use crate::errors::WiringError;
use crate::signal::Signal;
use std::collections::BTreeMap;
use std::fmt;

/// Reads one scalar out of a signal.
pub type FieldReader = fn(&Signal) -> f64;

/// Reads `mu`, `0.0` for signals without evidence.
pub fn read_mu(signal: &Signal) -> f64 {
    signal.evidence().map(|(mu, _)| mu).unwrap_or(0.0)
}

/// Reads `lambda`, `0.0` for signals without evidence.
pub fn read_lambda(signal: &Signal) -> f64 {
    signal.evidence().map(|(_, lambda)| lambda).unwrap_or(0.0)
}

pub fn read_certainty(signal: &Signal) -> f64 {
    signal.certainty()
}

/// One named port: the node its fields are read from, an optional separate
/// node that bridges write into, and its readable fields.
#[derive(Clone)]
pub struct Port {
    pub node_id: String,
    pub write_node_id: Option<String>,
    pub fields: BTreeMap<&'static str, FieldReader>,
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Port")
            .field("node_id", &self.node_id)
            .field("write_node_id", &self.write_node_id)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Port {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            write_node_id: None,
            fields: BTreeMap::new(),
        }
    }

    /// Route bridges bound to this port into `node_id` instead of the read node.
    pub fn writes_to(mut self, node_id: impl Into<String>) -> Self {
        self.write_node_id = Some(node_id.into());
        self
    }

    pub fn field(mut self, name: &'static str, reader: FieldReader) -> Self {
        self.fields.insert(name, reader);
        self
    }
}

/// All ports of one block, keyed by port name.
#[derive(Debug, Clone, Default)]
pub struct PortSchema {
    ports: BTreeMap<&'static str, Port>,
}

impl PortSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, name: &'static str, port: Port) -> Self {
        self.ports.insert(name, port);
        self
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    pub fn port_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ports.keys().copied()
    }
}

/// A resolved `(block, port)` pair, ready to hand out field references.
#[derive(Debug, Clone)]
pub struct PortRef {
    pub block_id: String,
    pub port: String,
    pub is_input: bool,
    inner: Port,
}

impl PortRef {
    pub fn new(block_id: impl Into<String>, port: impl Into<String>, is_input: bool, inner: Port) -> Self {
        Self {
            block_id: block_id.into(),
            port: port.into(),
            is_input,
            inner,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.inner.node_id
    }

    /// Dereference a field of this port.
    pub fn field(&self, name: &str) -> Result<FieldRef, WiringError> {
        let (field, reader) = self
            .inner
            .fields
            .get_key_value(name)
            .ok_or_else(|| WiringError::UnknownField {
                block_id: self.block_id.clone(),
                port: self.port.clone(),
                field: name.to_string(),
            })?;

        Ok(FieldRef {
            block_id: self.block_id.clone(),
            node_id: self.inner.node_id.clone(),
            write_node_id: self
                .inner
                .write_node_id
                .clone()
                .unwrap_or_else(|| self.inner.node_id.clone()),
            port: self.port.clone(),
            field: field.to_string(),
            is_input: self.is_input,
            reader: *reader,
        })
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.fields.keys().copied()
    }
}

/// A single readable (or, on an input port, writable) scalar of a block.
///
/// Expressions read it from `node_id`; bridges bound to it deliver into
/// `write_node_id`.
#[derive(Clone)]
pub struct FieldRef {
    pub block_id: String,
    pub node_id: String,
    pub write_node_id: String,
    pub port: String,
    pub field: String,
    pub is_input: bool,
    pub reader: FieldReader,
}

impl fmt::Debug for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRef")
            .field("path", &self.path())
            .field("node_id", &self.node_id)
            .field("write_node_id", &self.write_node_id)
            .field("is_input", &self.is_input)
            .finish()
    }
}

impl FieldRef {
    pub fn read(&self, signal: &Signal) -> f64 {
        (self.reader)(signal)
    }

    /// `block.port.field`
    pub fn path(&self) -> String {
        format!("{}.{}.{}", self.block_id, self.port, self.field)
    }
}
