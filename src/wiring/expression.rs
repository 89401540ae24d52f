// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Arithmetic over block fields.
//!
//! An [`Expression`] is an ordered list of source fields plus a function that
//! combines their values. Combinators concatenate the source lists left to
//! right and split the incoming values at the left operand's length, so the
//! i-th value always belongs to the i-th source.
//!
//! ```
//! use paranet::wiring::Expression;
//!
//! let expr = Expression::constant(0.5).add(0.25).multiply(2.0);
//! assert!(expr.sources().is_empty());
//! assert_eq!(expr.evaluate(&[]).unwrap(), 1.5);
//! ```

use crate::errors::{ExpressionError, OperationError};
use crate::signal::Signal;
use crate::wiring::schema::FieldRef;
use std::fmt;
use std::sync::Arc;

type Combine = Arc<dyn Fn(&[f64]) -> Result<f64, ExpressionError> + Send + Sync>;

fn combiner<F>(f: F) -> Combine
where
    F: Fn(&[f64]) -> Result<f64, ExpressionError> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[derive(Clone)]
pub struct Expression {
    sources: Vec<FieldRef>,
    combine: Combine,
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<String> = self.sources.iter().map(FieldRef::path).collect();
        f.debug_struct("Expression").field("sources", &paths).finish()
    }
}

impl Expression {
    /// Zero-source expression yielding `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            sources: Vec::new(),
            combine: combiner(move |_| Ok(value)),
        }
    }

    /// Single-source expression reading `field`.
    pub fn field(field: FieldRef) -> Self {
        Self {
            sources: vec![field],
            combine: combiner(|values| Ok(values.first().copied().unwrap_or(f64::NAN))),
        }
    }

    pub fn sources(&self) -> &[FieldRef] {
        &self.sources
    }

    pub fn add(self, rhs: impl Into<Expression>) -> Self {
        self.binary(rhs.into(), |a, b| Ok(a + b))
    }

    pub fn subtract(self, rhs: impl Into<Expression>) -> Self {
        self.binary(rhs.into(), |a, b| Ok(a - b))
    }

    pub fn multiply(self, rhs: impl Into<Expression>) -> Self {
        self.binary(rhs.into(), |a, b| Ok(a * b))
    }

    pub fn divide(self, rhs: impl Into<Expression>) -> Self {
        self.binary(rhs.into(), |a, b| {
            if b == 0.0 {
                Err(ExpressionError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        })
    }

    pub fn power(self, rhs: impl Into<Expression>) -> Self {
        self.binary(rhs.into(), |a, b| Ok(a.powf(b)))
    }

    pub fn negate(self) -> Self {
        self.unary(|a| -a)
    }

    pub fn abs(self) -> Self {
        self.unary(f64::abs)
    }

    /// Evaluate against one value per source, in source order.
    pub fn evaluate(&self, values: &[f64]) -> Result<f64, ExpressionError> {
        let value = (self.combine)(values)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ExpressionError::NonFinite { value })
        }
    }

    /// Read each signal with the matching source's reader and evaluate.
    ///
    /// A source with no signal reads `0.0`.
    pub fn read(&self, signals: &[Option<&Signal>]) -> Result<f64, OperationError> {
        if signals.len() != self.sources.len() {
            return Err(OperationError::ArityMismatch {
                expected: self.sources.len(),
                received: signals.len(),
            });
        }
        let values: Vec<f64> = self
            .sources
            .iter()
            .zip(signals)
            .map(|(source, signal)| signal.map_or(0.0, |signal| source.read(signal)))
            .collect();
        Ok(self.evaluate(&values)?)
    }

    fn binary(
        self,
        rhs: Expression,
        op: fn(f64, f64) -> Result<f64, ExpressionError>,
    ) -> Self {
        let split = self.sources.len();
        let left = self.combine;
        let right = rhs.combine;
        let mut sources = self.sources;
        sources.extend(rhs.sources);

        Self {
            sources,
            combine: combiner(move |values| {
                let (a, b) = values.split_at(split.min(values.len()));
                op(left(a)?, right(b)?)
            }),
        }
    }

    fn unary(self, op: fn(f64) -> f64) -> Self {
        let inner = self.combine;
        Self {
            sources: self.sources,
            combine: combiner(move |values| Ok(op(inner(values)?))),
        }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::constant(value)
    }
}

impl From<FieldRef> for Expression {
    fn from(field: FieldRef) -> Self {
        Expression::field(field)
    }
}

impl From<&FieldRef> for Expression {
    fn from(field: &FieldRef) -> Self {
        Expression::field(field.clone())
    }
}

impl FieldRef {
    /// Lift this field into a single-source expression.
    pub fn expr(&self) -> Expression {
        Expression::from(self)
    }
}
