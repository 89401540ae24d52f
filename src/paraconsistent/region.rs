// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The twelve logical regions of the paraconsistent lattice, plus the
//! undecided centre.

use crate::paraconsistent::params::Thresholds;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// `V`
    True,
    /// `F`
    False,
    /// `⊤`
    Inconsistent,
    /// `⊥`
    Paracomplete,
    /// `QV→⊤`
    QuasiTrueTowardInconsistent,
    /// `QV→⊥`
    QuasiTrueTowardParacomplete,
    /// `QF→⊤`
    QuasiFalseTowardInconsistent,
    /// `QF→⊥`
    QuasiFalseTowardParacomplete,
    /// `Q⊤→V`
    QuasiInconsistentTowardTrue,
    /// `Q⊤→F`
    QuasiInconsistentTowardFalse,
    /// `Q⊥→V`
    QuasiParacompleteTowardTrue,
    /// `Q⊥→F`
    QuasiParacompleteTowardFalse,
    /// `I`
    Undecided,
}

impl Region {
    pub const ALL: [Region; 13] = [
        Region::True,
        Region::False,
        Region::Inconsistent,
        Region::Paracomplete,
        Region::QuasiTrueTowardInconsistent,
        Region::QuasiTrueTowardParacomplete,
        Region::QuasiFalseTowardInconsistent,
        Region::QuasiFalseTowardParacomplete,
        Region::QuasiInconsistentTowardTrue,
        Region::QuasiInconsistentTowardFalse,
        Region::QuasiParacompleteTowardTrue,
        Region::QuasiParacompleteTowardFalse,
        Region::Undecided,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::True => "V",
            Region::False => "F",
            Region::Inconsistent => "⊤",
            Region::Paracomplete => "⊥",
            Region::QuasiTrueTowardInconsistent => "QV→⊤",
            Region::QuasiTrueTowardParacomplete => "QV→⊥",
            Region::QuasiFalseTowardInconsistent => "QF→⊤",
            Region::QuasiFalseTowardParacomplete => "QF→⊥",
            Region::QuasiInconsistentTowardTrue => "Q⊤→V",
            Region::QuasiInconsistentTowardFalse => "Q⊤→F",
            Region::QuasiParacompleteTowardTrue => "Q⊥→V",
            Region::QuasiParacompleteTowardFalse => "Q⊥→F",
            Region::Undecided => "I",
        }
    }

    /// Parse a lattice symbol back into a region.
    pub fn from_label(label: &str) -> Option<Region> {
        Region::ALL.iter().copied().find(|r| r.as_str() == label)
    }

    /// True for the four extreme regions.
    pub fn is_extreme(&self) -> bool {
        matches!(
            self,
            Region::True | Region::False | Region::Inconsistent | Region::Paracomplete
        )
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Place a `(gc, gct)` point into exactly one region.
///
/// Extreme regions are checked first with inclusive comparisons, certainty
/// before contradiction. Everything else falls into one of the eight quasi
/// regions chosen by quadrant, the certainty axis winning ties. The exact
/// origin is [`Region::Undecided`].
pub fn classify(gc: f64, gct: f64, th: &Thresholds) -> Region {
    if gc >= th.ftc_pos {
        return Region::True;
    }
    if gc <= -th.ftc_neg {
        return Region::False;
    }
    if gct >= th.fd_pos {
        return Region::Inconsistent;
    }
    if gct <= -th.fd_neg {
        return Region::Paracomplete;
    }
    if gc == 0.0 && gct == 0.0 {
        return Region::Undecided;
    }

    let certainty = gc.abs();
    let contradiction = gct.abs();
    match (gc >= 0.0, gct >= 0.0) {
        (true, true) if certainty >= contradiction => Region::QuasiTrueTowardInconsistent,
        (true, true) => Region::QuasiInconsistentTowardTrue,
        (true, false) if certainty >= contradiction => Region::QuasiTrueTowardParacomplete,
        (true, false) => Region::QuasiParacompleteTowardTrue,
        (false, true) if certainty >= contradiction => Region::QuasiFalseTowardInconsistent,
        (false, true) => Region::QuasiInconsistentTowardFalse,
        (false, false) if certainty >= contradiction => Region::QuasiFalseTowardParacomplete,
        (false, false) => Region::QuasiParacompleteTowardFalse,
    }
}

/// Flag map with every label present and exactly `region` set.
pub fn region_flags(region: Region) -> BTreeMap<&'static str, bool> {
    Region::ALL
        .iter()
        .map(|r| (r.as_str(), *r == region))
        .collect()
}
