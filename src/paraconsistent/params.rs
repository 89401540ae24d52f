// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_FTC, DEFAULT_L, DEFAULT_ND, DEFAULT_VLF, DEFAULT_VLV};
use serde::{Deserialize, Serialize};

/// Clamp into `[0, 1]`, mapping NaN to `0`.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Classifier thresholds.
///
/// # Fields
/// * `ftc` - certainty control limit (FtC)
/// * `vlv` - pro-true bias (VlV)
/// * `vlf` - pro-false bias (VlF)
/// * `l` - minimal evidence energy below which a signal is undecided
/// * `nd` - decimal places kept in reported confidences
///
/// Floats are kept in `[0, 1]`; the setters and [`BlockParams::clamped`] enforce it.
///
/// # Example
/// ```yaml
/// params:
///   ftc: 0.6
///   vlv: 0.5
///   vlf: 0.5
///   l: 0.05
///   nd: 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockParams {
    pub ftc: f64,
    pub vlv: f64,
    pub vlf: f64,
    pub l: f64,
    pub nd: u32,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            ftc: DEFAULT_FTC,
            vlv: DEFAULT_VLV,
            vlf: DEFAULT_VLF,
            l: DEFAULT_L,
            nd: DEFAULT_ND,
        }
    }
}

impl BlockParams {
    pub fn new(ftc: f64, vlv: f64, vlf: f64, l: f64, nd: u32) -> Self {
        Self { ftc, vlv, vlf, l, nd }.clamped()
    }

    /// Copy with every float forced into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            ftc: clamp01(self.ftc),
            vlv: clamp01(self.vlv),
            vlf: clamp01(self.vlf),
            l: clamp01(self.l),
            nd: self.nd,
        }
    }

    pub fn with_ftc(mut self, ftc: f64) -> Self {
        self.set_ftc(ftc);
        self
    }

    pub fn set_ftc(&mut self, ftc: f64) {
        self.ftc = clamp01(ftc);
    }

    pub fn set_vlv(&mut self, vlv: f64) {
        self.vlv = clamp01(vlv);
    }

    pub fn set_vlf(&mut self, vlf: f64) {
        self.vlf = clamp01(vlf);
    }

    pub fn set_l(&mut self, l: f64) {
        self.l = clamp01(l);
    }

    pub fn set_nd(&mut self, nd: u32) {
        self.nd = nd;
    }

    /// Effective thresholds derived from the control limit and the biases.
    pub fn thresholds(&self) -> Thresholds {
        let ftc = self.ftc;
        Thresholds {
            ftc_pos: (ftc.max(ftc.abs()) - self.vlv).max(ftc),
            ftc_neg: (ftc - self.vlf).max(ftc),
            fd_pos: (1.0 - ftc).abs(),
            fd_neg: (ftc - 1.0).abs(),
        }
    }
}

/// Bias-adjusted decision thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Certainty needed for `V`.
    pub ftc_pos: f64,
    /// Certainty magnitude needed for `F`.
    pub ftc_neg: f64,
    /// Contradiction needed for `⊤`.
    pub fd_pos: f64,
    /// Contradiction magnitude needed for `⊥`.
    pub fd_neg: f64,
}

/// Round to `nd` decimal places, normalizing negative zero.
pub fn round_to(value: f64, nd: u32) -> f64 {
    let factor = 10f64.powi(nd.min(15) as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
