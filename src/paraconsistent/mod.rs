// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Paraconsistent annotated logic (PAL2v) computation and classification.

mod engine;
mod params;
mod record;
mod region;

pub use engine::{compute, decide};
pub use params::{clamp01, round_to, BlockParams, Thresholds};
pub use record::CompleteRecord;
pub use region::{classify, region_flags, Region};
