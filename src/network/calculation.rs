// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Accumulating calculations plugged into batch operations.
//!
//! A calculation sees signals one at a time through [`Calculate::process`] and
//! reports its accumulated value through [`Calculate::result`]. Operations
//! clear a calculation at the start of every batch, so no state leaks from
//! one propagation pass into the next.

use crate::paraconsistent::{compute, round_to, BlockParams, Region};
use crate::signal::Signal;

/// Source id given to signals produced by averaging several inputs.
pub const AGGREGATED_SOURCE: &str = "aggregated";

pub trait Calculate {
    /// Accumulate one signal.
    fn process(&mut self, signal: &Signal);

    /// Accumulated value, `None` when nothing usable was processed.
    fn result(&self) -> Option<Signal>;

    /// Forget everything processed so far.
    fn clear(&mut self);
}

/// Turns evidence into a complete derived record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParaconsistentParser {
    pub params: BlockParams,
    last: Option<Signal>,
}

impl ParaconsistentParser {
    pub fn new(params: BlockParams) -> Self {
        Self { params, last: None }
    }
}

impl Calculate for ParaconsistentParser {
    fn process(&mut self, signal: &Signal) {
        if let Some((mu, lambda)) = signal.evidence() {
            let record = compute(mu, lambda, &self.params);
            self.last = Some(Signal::complete(record, signal.source_id()));
        }
    }

    fn result(&self) -> Option<Signal> {
        self.last.clone()
    }

    fn clear(&mut self) {
        self.last = None;
    }
}

/// Arithmetic mean of `mu` and of `lambda` over a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageAggregation {
    mu_sum: f64,
    lambda_sum: f64,
    count: usize,
}

impl AverageAggregation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Calculate for AverageAggregation {
    fn process(&mut self, signal: &Signal) {
        if let Some((mu, lambda)) = signal.evidence() {
            self.mu_sum += mu;
            self.lambda_sum += lambda;
            self.count += 1;
        }
    }

    fn result(&self) -> Option<Signal> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(Signal::simple(
            self.mu_sum / n,
            self.lambda_sum / n,
            AGGREGATED_SOURCE,
        ))
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Labels each evidence-carrying signal with its region.
///
/// Signals whose energy `max(mu, lambda)` is below `L` are undecided, with
/// confidence `L - energy`. Otherwise the confidence is `|gcr|`. Confidences
/// are rounded to `nd` places.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalClassifier {
    pub params: BlockParams,
    last: Option<Signal>,
}

impl SignalClassifier {
    pub fn new(params: BlockParams) -> Self {
        Self { params, last: None }
    }
}

impl Calculate for SignalClassifier {
    fn process(&mut self, signal: &Signal) {
        let Some((mu, lambda)) = signal.evidence() else {
            return;
        };
        let record = compute(mu, lambda, &self.params);
        let energy = record.energy();
        let (label, confidence) = if energy < self.params.l {
            (Region::Undecided, self.params.l - energy)
        } else {
            (record.label, record.gcr.abs())
        };
        self.last = Some(Signal::classified(
            label,
            round_to(confidence, self.params.nd),
            signal.source_id(),
        ));
    }

    fn result(&self) -> Option<Signal> {
        self.last.clone()
    }

    fn clear(&mut self) {
        self.last = None;
    }
}

/// Closed set of calculations an operation can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Calculation {
    Parse(ParaconsistentParser),
    Average(AverageAggregation),
    RegionClassifier(SignalClassifier),
}

impl Calculation {
    pub fn parse(params: BlockParams) -> Self {
        Calculation::Parse(ParaconsistentParser::new(params))
    }

    pub fn average() -> Self {
        Calculation::Average(AverageAggregation::new())
    }

    pub fn region_classifier(params: BlockParams) -> Self {
        Calculation::RegionClassifier(SignalClassifier::new(params))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Calculation::Parse(_) => "parse",
            Calculation::Average(_) => "average",
            Calculation::RegionClassifier(_) => "region_classifier",
        }
    }

    pub fn params(&self) -> Option<&BlockParams> {
        match self {
            Calculation::Parse(c) => Some(&c.params),
            Calculation::RegionClassifier(c) => Some(&c.params),
            Calculation::Average(_) => None,
        }
    }

    /// Replace the thresholds; returns false for calculations without any.
    pub fn set_params(&mut self, params: BlockParams) -> bool {
        match self {
            Calculation::Parse(c) => c.params = params.clamped(),
            Calculation::RegionClassifier(c) => c.params = params.clamped(),
            Calculation::Average(_) => return false,
        }
        true
    }
}

impl Calculate for Calculation {
    fn process(&mut self, signal: &Signal) {
        match self {
            Calculation::Parse(c) => c.process(signal),
            Calculation::Average(c) => c.process(signal),
            Calculation::RegionClassifier(c) => c.process(signal),
        }
    }

    fn result(&self) -> Option<Signal> {
        match self {
            Calculation::Parse(c) => c.result(),
            Calculation::Average(c) => c.result(),
            Calculation::RegionClassifier(c) => c.result(),
        }
    }

    fn clear(&mut self) {
        match self {
            Calculation::Parse(c) => c.clear(),
            Calculation::Average(c) => c.clear(),
            Calculation::RegionClassifier(c) => c.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_two_signals() {
        let mut calc = AverageAggregation::new();
        calc.process(&Signal::simple(0.9, 0.1, "a"));
        calc.process(&Signal::simple(0.5, 0.3, "b"));

        let result = calc.result().unwrap();
        let (mu, lambda) = result.evidence().unwrap();
        assert!((mu - 0.7).abs() < 1e-12);
        assert!((lambda - 0.2).abs() < 1e-12);
        assert_eq!(result.source_id(), AGGREGATED_SOURCE);
    }

    #[test]
    fn test_average_without_input_has_no_result() {
        let mut calc = AverageAggregation::new();
        assert!(calc.result().is_none());
        calc.process(&Signal::classified(Region::True, 1.0, "x"));
        assert!(calc.result().is_none());
    }

    #[test]
    fn test_clear_resets_state() {
        let mut calc = Calculation::average();
        calc.process(&Signal::simple(1.0, 0.0, "a"));
        calc.clear();
        assert!(calc.result().is_none());
    }

    #[test]
    fn test_parser_produces_complete_signal() {
        let mut calc = ParaconsistentParser::new(BlockParams::default());
        calc.process(&Signal::simple(1.0, 0.0, "sensor"));

        match calc.result() {
            Some(Signal::Complete(c)) => {
                assert_eq!(c.record.label, Region::True);
                assert_eq!(c.source_id, "sensor");
            }
            other => panic!("expected complete signal, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_ignores_classified_signal() {
        let mut calc = ParaconsistentParser::new(BlockParams::default());
        calc.process(&Signal::classified(Region::True, 0.9, "x"));
        assert!(calc.result().is_none());
    }

    #[test]
    fn test_classifier_low_energy_is_undecided() {
        let params = BlockParams::new(0.5, 0.5, 0.5, 0.1, 3);
        let mut calc = SignalClassifier::new(params);
        calc.process(&Signal::simple(0.04, 0.02, "quiet"));

        match calc.result() {
            Some(Signal::Classified(c)) => {
                assert_eq!(c.label, Region::Undecided);
                assert!((c.confidence - 0.06).abs() < 1e-9);
                assert_eq!(c.source_id, "quiet");
            }
            other => panic!("expected classified signal, got {:?}", other),
        }
    }

    #[test]
    fn test_classifier_confidence_is_rounded_real_certainty() {
        let mut calc = SignalClassifier::new(BlockParams::default());
        calc.process(&Signal::simple(0.85, 0.36, "s"));

        match calc.result() {
            Some(Signal::Classified(c)) => {
                assert_eq!(c.label, Region::QuasiTrueTowardInconsistent);
                let expected = round_to(compute(0.85, 0.36, &BlockParams::default()).gcr.abs(), 3);
                assert_eq!(c.confidence, expected);
            }
            other => panic!("expected classified signal, got {:?}", other),
        }
    }

    #[test]
    fn test_set_params() {
        let mut calc = Calculation::parse(BlockParams::default());
        assert!(calc.set_params(BlockParams::default().with_ftc(0.8)));
        assert_eq!(calc.params().map(|p| p.ftc), Some(0.8));

        let mut average = Calculation::average();
        assert!(!average.set_params(BlockParams::default()));
        assert_eq!(average.name(), "average");
    }
}
