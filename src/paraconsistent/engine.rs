// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pure PAL2v computation from evidence degrees to a [`CompleteRecord`].
//!
//! The pipeline:
//!
//! 1. clamp `mu` and `lambda` into `[0, 1]`
//! 2. certainty `gc = mu - lambda`, contradiction `gct = mu + lambda - 1`
//! 3. distance `d = sqrt((1 - |gc|)^2 + gct^2)`, `D = min(d, 1)`
//! 4. real certainty `gcr = (1 - D) * sign(gc)`
//! 5. normalized degrees `muE`, `muECT`, `muER` and interval `phi`
//! 6. `decision_output` against the control limit and the region label
//!
//! ```
//! use paranet::paraconsistent::{compute, BlockParams, Region};
//!
//! let record = compute(1.0, 1.0, &BlockParams::default());
//! assert_eq!(record.gc, 0.0);
//! assert_eq!(record.gct, 1.0);
//! assert_eq!(record.label, Region::Inconsistent);
//! ```

use crate::paraconsistent::params::{clamp01, BlockParams};
use crate::paraconsistent::record::CompleteRecord;
use crate::paraconsistent::region::classify;

/// Compute every derived metric for one evidence pair.
pub fn compute(mu: f64, lambda: f64, params: &BlockParams) -> CompleteRecord {
    let params = params.clamped();
    let mu = clamp01(mu);
    let lambda = clamp01(lambda);

    let gc = mu - lambda;
    let gct = mu + lambda - 1.0;

    let d = ((1.0 - gc.abs()).powi(2) + gct.powi(2)).sqrt();
    let big_d = d.min(1.0);
    let sign = if gc >= 0.0 { 1.0 } else { -1.0 };
    let gcr = (1.0 - big_d) * sign;

    let phi = 1.0 - gct.abs();
    let mu_e = (gc + 1.0) / 2.0;
    let mu_ect = (gct + 1.0) / 2.0;
    let mu_er = (gcr + 1.0) / 2.0;

    let decision_output = decide(mu_er, params.ftc);
    let label = classify(gc, gct, &params.thresholds());

    CompleteRecord {
        mu,
        lambda,
        gc,
        gct,
        d,
        big_d,
        gcr,
        phi,
        mu_e,
        mu_ect,
        mu_er,
        phi_e: phi,
        decision_output,
        label,
        ftc: params.ftc,
        vlv: params.vlv,
        vlf: params.vlf,
        l: params.l,
    }
}

/// `1.0` above the control limit, `0.0` below, `0.5` on an exact tie.
pub fn decide(mu_er: f64, ftc: f64) -> f64 {
    if mu_er > ftc {
        1.0
    } else if mu_er < ftc {
        0.0
    } else {
        0.5
    }
}
