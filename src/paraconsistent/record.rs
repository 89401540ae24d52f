// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::paraconsistent::region::{region_flags, Region};
use serde::Serialize;
use std::collections::BTreeMap;

/// Every metric derived from one `(mu, lambda)` pair, together with the
/// thresholds it was computed under.
///
/// Records are recomputed from scratch whenever the inputs change; nothing
/// mutates one in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompleteRecord {
    pub mu: f64,
    pub lambda: f64,
    /// Certainty degree.
    pub gc: f64,
    /// Contradiction degree.
    pub gct: f64,
    /// Distance to the nearest extreme on the certainty axis.
    pub d: f64,
    /// `d` capped at 1.
    #[serde(rename = "D")]
    pub big_d: f64,
    /// Real certainty degree.
    pub gcr: f64,
    pub phi: f64,
    #[serde(rename = "muE")]
    pub mu_e: f64,
    #[serde(rename = "muECT")]
    pub mu_ect: f64,
    #[serde(rename = "muER")]
    pub mu_er: f64,
    #[serde(rename = "phiE")]
    pub phi_e: f64,
    pub decision_output: f64,
    pub label: Region,
    #[serde(rename = "FtC")]
    pub ftc: f64,
    #[serde(rename = "VlV")]
    pub vlv: f64,
    #[serde(rename = "VlF")]
    pub vlf: f64,
    #[serde(rename = "L")]
    pub l: f64,
}

impl CompleteRecord {
    /// Flag per region label, exactly one set.
    pub fn regions(&self) -> BTreeMap<&'static str, bool> {
        region_flags(self.label)
    }

    /// Evidence energy, the larger of the two degrees.
    pub fn energy(&self) -> f64 {
        self.mu.max(self.lambda)
    }

    /// Look up a metric by its record key.
    pub fn metric(&self, name: &str) -> Option<f64> {
        let value = match name {
            "mu" => self.mu,
            "lam" | "lambda" => self.lambda,
            "gc" => self.gc,
            "gct" => self.gct,
            "gcr" => self.gcr,
            "d" => self.d,
            "D" => self.big_d,
            "phi" => self.phi,
            "muE" => self.mu_e,
            "muECT" => self.mu_ect,
            "muER" => self.mu_er,
            "phiE" => self.phi_e,
            "decision_output" => self.decision_output,
            _ => return None,
        };
        Some(value)
    }
}
