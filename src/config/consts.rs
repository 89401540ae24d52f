// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default certainty control limit (FtC)
pub const DEFAULT_FTC: f64 = 0.5;
/// Default pro-true bias (VlV)
pub const DEFAULT_VLV: f64 = 0.5;
/// Default pro-false bias (VlF)
pub const DEFAULT_VLF: f64 = 0.5;
/// Default minimal evidence energy (L)
pub const DEFAULT_L: f64 = 0.05;
/// Default decimal places for reported confidences
pub const DEFAULT_ND: u32 = 3;
/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";
