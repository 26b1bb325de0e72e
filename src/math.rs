// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Frequency rounding helpers.
//!
//! Detection files quote frequencies in MHz with 6 decimal places, i.e. to
//! the whole Hz. Spike matching needs *exact* equality at that precision, so
//! comparisons are done on integer Hz rather than floats.

/// Round a frequency in MHz to 6 decimal places (the nearest Hz).
pub(crate) fn round_to_hz(freq_mhz: f64) -> f64 {
    (freq_mhz * 1e6).round() / 1e6
}

/// A frequency in MHz as an integer number of Hz, for exact comparisons.
pub(crate) fn whole_hz(freq_mhz: f64) -> i64 {
    (freq_mhz * 1e6).round() as i64
}
