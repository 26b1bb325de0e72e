// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all gbt_occupancy-related errors. This should be the
//! *only* error enum that is publicly visible.

use thiserror::Error;

use crate::band::BANDS_COMMA_SEPARATED;
use crate::dat::DatReadError;
use crate::flagging::SpikeRemovalError;
use crate::io::GlobError;
use crate::occupancy::OccupancyError;

/// The *only* publicly visible error from gbt_occupancy.
#[derive(Error, Debug)]
pub enum GbtOccupancyError {
    /// An unrecognised band identifier.
    #[error("Unrecognised GBT band '{0}'; valid bands are: {}", *BANDS_COMMA_SEPARATED)]
    UnknownBand(String),

    /// An error reading a .dat detection file.
    #[error("{0}")]
    DatRead(String),

    /// An error removing DC spikes.
    #[error("{0}")]
    SpikeRemoval(String),

    /// An error aggregating spectral occupancy.
    #[error("{0}")]
    Occupancy(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// An error writing the occupancy plot.
    #[error("{0}")]
    Plot(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<DatReadError> for GbtOccupancyError {
    fn from(e: DatReadError) -> Self {
        Self::DatRead(e.to_string())
    }
}

impl From<SpikeRemovalError> for GbtOccupancyError {
    fn from(e: SpikeRemovalError) -> Self {
        let s = e.to_string();
        match e {
            SpikeRemovalError::DatRead(_) => Self::DatRead(s),
            SpikeRemovalError::NoFileName { .. } | SpikeRemovalError::Write { .. } => {
                Self::SpikeRemoval(s)
            }
        }
    }
}

impl From<OccupancyError> for GbtOccupancyError {
    fn from(e: OccupancyError) -> Self {
        let s = e.to_string();
        match e {
            OccupancyError::DatRead(_) => Self::DatRead(s),
            OccupancyError::InvalidBinWidth { .. }
            | OccupancyError::NoDatFiles
            | OccupancyError::NoHits
            | OccupancyError::DisjointRanges { .. }
            | OccupancyError::BinMisalignment { .. } => Self::Occupancy(s),
        }
    }
}

#[cfg(feature = "plotting")]
impl From<super::spectral_occupancy::PlotError> for GbtOccupancyError {
    fn from(e: super::spectral_occupancy::PlotError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<GlobError> for GbtOccupancyError {
    fn from(e: GlobError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for GbtOccupancyError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
