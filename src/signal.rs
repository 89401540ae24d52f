// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Signal values flowing along network edges.
//!
//! A [`Signal`] is a plain value: cloning it yields an independent deep copy,
//! and the network clones every signal at delivery time so two consumers of
//! the same producer never observe each other's changes.
//!
//! Three shapes exist:
//!
//! * [`SimpleSignal`] - raw evidence degrees `(mu, lambda)`
//! * [`CompleteSignal`] - evidence plus the full derived metric record
//! * [`ClassifiedSignal`] - a region label with a confidence score
//!
//! ```
//! use paranet::signal::Signal;
//!
//! let signal = Signal::simple(0.9, 0.1, "sensor");
//! assert!((signal.certainty() - 0.8).abs() < 1e-12);
//! assert!(!signal.is_empty());
//! ```

use crate::paraconsistent::{CompleteRecord, Region};
use serde_json::{json, Value};

/// Record `type` tag for simple signals.
pub const SIMPLE_TYPE: &str = "paraconsistent";
/// Record `type` tag for complete signals.
pub const COMPLETE_TYPE: &str = "paraconsistent_complete";
/// Record `type` tag for classified signals.
pub const CLASSIFIED_TYPE: &str = "paraconsistent_output";

/// Raw favorable/unfavorable evidence.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSignal {
    pub mu: f64,
    pub lambda: f64,
    pub source_id: String,
}

/// Evidence together with every metric derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteSignal {
    pub record: CompleteRecord,
    pub source_id: String,
}

/// Region label and its confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSignal {
    pub label: Region,
    pub confidence: f64,
    pub source_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Simple,
    Complete,
    Classified,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Simple(SimpleSignal),
    Complete(CompleteSignal),
    Classified(ClassifiedSignal),
}

impl Signal {
    pub fn simple(mu: f64, lambda: f64, source_id: impl Into<String>) -> Self {
        Signal::Simple(SimpleSignal {
            mu,
            lambda,
            source_id: source_id.into(),
        })
    }

    pub fn complete(record: CompleteRecord, source_id: impl Into<String>) -> Self {
        Signal::Complete(CompleteSignal {
            record,
            source_id: source_id.into(),
        })
    }

    pub fn classified(label: Region, confidence: f64, source_id: impl Into<String>) -> Self {
        Signal::Classified(ClassifiedSignal {
            label,
            confidence,
            source_id: source_id.into(),
        })
    }

    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Simple(_) => SignalKind::Simple,
            Signal::Complete(_) => SignalKind::Complete,
            Signal::Classified(_) => SignalKind::Classified,
        }
    }

    /// Scalar projection of the signal.
    ///
    /// * Simple: `mu - lambda`
    /// * Complete: `gc`
    /// * Classified: `confidence`
    pub fn certainty(&self) -> f64 {
        match self {
            Signal::Simple(s) => s.mu - s.lambda,
            Signal::Complete(c) => c.record.gc,
            Signal::Classified(c) => c.confidence,
        }
    }

    /// True when the signal carries no information.
    pub fn is_empty(&self) -> bool {
        match self {
            Signal::Simple(s) => s.mu == 0.0 && s.lambda == 0.0,
            Signal::Complete(c) => c.record.mu == 0.0 && c.record.lambda == 0.0,
            Signal::Classified(c) => c.confidence == 0.0,
        }
    }

    /// `(mu, lambda)` for the evidence-carrying shapes.
    pub fn evidence(&self) -> Option<(f64, f64)> {
        match self {
            Signal::Simple(s) => Some((s.mu, s.lambda)),
            Signal::Complete(c) => Some((c.record.mu, c.record.lambda)),
            Signal::Classified(_) => None,
        }
    }

    pub fn source_id(&self) -> &str {
        match self {
            Signal::Simple(s) => &s.source_id,
            Signal::Complete(c) => &c.source_id,
            Signal::Classified(c) => &c.source_id,
        }
    }

    /// Fixed-key record view used for printing and external consumers.
    pub fn to_record(&self) -> Value {
        match self {
            Signal::Simple(s) => json!({
                "type": SIMPLE_TYPE,
                "mu": s.mu,
                "lambda": s.lambda,
                "certainty": self.certainty(),
                "source": s.source_id,
            }),
            Signal::Complete(c) => {
                let r = &c.record;
                json!({
                    "type": COMPLETE_TYPE,
                    "mu": r.mu,
                    "lambda": r.lambda,
                    "gc": r.gc,
                    "gct": r.gct,
                    "gcr": r.gcr,
                    "d": r.d,
                    "D": r.big_d,
                    "phi": r.phi,
                    "muE": r.mu_e,
                    "muECT": r.mu_ect,
                    "muER": r.mu_er,
                    "phiE": r.phi_e,
                    "decision_output": r.decision_output,
                    "label": r.label.as_str(),
                    "certainty": self.certainty(),
                    "source": c.source_id,
                })
            }
            Signal::Classified(c) => json!({
                "type": CLASSIFIED_TYPE,
                "label": c.label.as_str(),
                "confidence": c.confidence,
                "source": c.source_id,
            }),
        }
    }
}
