// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors when removing DC spikes.

use std::path::PathBuf;

use thiserror::Error;

use crate::dat::DatReadError;

#[derive(Error, Debug)]
pub enum SpikeRemovalError {
    #[error(transparent)]
    DatRead(#[from] DatReadError),

    #[error("{path} has no file name; can't name a cleaned copy of it")]
    NoFileName { path: PathBuf },

    #[error("Couldn't write {path}: {err}")]
    Write { path: PathBuf, err: std::io::Error },
}
