// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for network description validation failures.
//!
//! This module contains message types for logging events related to:
//! * Cyclic dependency detection
//! * Unresolved dependency detection
//! * Duplicate node ID detection
//! * Overall validation outcome

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cyclic dependency detected in a network description.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use paranet::observability::messages::validation::CyclicDependencyDetected;
///
/// let cycle = vec!["a", "b", "c", "a"];
/// let msg = CyclicDependencyDetected {
///     cycle: &cycle,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CyclicDependencyDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicDependencyDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic dependency detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicDependencyDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = %self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            cycle_length = self.cycle.len(),
        )
    }
}

/// Unresolved dependency detected in a network description.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnresolvedDependency<'a> {
    pub node_id: &'a str,
    pub missing_dependency: &'a str,
}

impl Display for UnresolvedDependency<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' depends on missing node '{}'",
            self.node_id, self.missing_dependency
        )
    }
}

impl StructuredLog for UnresolvedDependency<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            missing_dependency = self.missing_dependency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            node_id = self.node_id,
            missing_dependency = self.missing_dependency,
        )
    }
}

/// Duplicate node ID detected in a network description.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicateNodeId<'a> {
    pub node_id: &'a str,
}

impl Display for DuplicateNodeId<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate node ID: '{}'", self.node_id)
    }
}

impl StructuredLog for DuplicateNodeId<'_> {
    fn log(&self) {
        tracing::error!(node_id = self.node_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(tracing::Level::ERROR, "span_name", name = name, node_id = self.node_id)
    }
}

/// Validation finished with errors.
///
/// # Log Level
/// `warn!` - Configuration rejected
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Network description rejected with {} errors", self.error_count)
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::warn!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("validation_failed", span_name = name, error_count = self.error_count)
    }
}
