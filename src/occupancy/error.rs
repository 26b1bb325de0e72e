// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors when aggregating spectral occupancy.

use thiserror::Error;

use crate::dat::DatReadError;

#[derive(Error, Debug)]
pub enum OccupancyError {
    #[error("Bin width must be positive, got {bin_width} MHz")]
    InvalidBinWidth { bin_width: f64 },

    #[error("No .dat files were supplied; nothing to aggregate")]
    NoDatFiles,

    #[error("None of the supplied .dat files contain any hits; without a band there is no frequency range to bin over")]
    NoHits,

    #[error("The files' frequency ranges don't overlap (tightest common range: {common_min} to {common_max} MHz)")]
    DisjointRanges { common_min: f64, common_max: f64 },

    #[error("Histogram bins don't line up across files (expected {expected} bins in the common range, found {found}); is the bin width compatible with every file's frequency range?")]
    BinMisalignment { expected: usize, found: usize },

    #[error(transparent)]
    DatRead(#[from] DatReadError),
}
