// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors when reading `.dat` detection tables.

use std::path::PathBuf;

use thiserror::Error;

use super::{MIN_COLUMNS, NUM_HEADER_LINES};

#[derive(Error, Debug)]
pub enum DatReadError {
    #[error("{path}: the file ended after {num_lines} lines, before its {NUM_HEADER_LINES}-line header was complete")]
    IncompleteHeader { path: PathBuf, num_lines: usize },

    #[error("{path}: no 'DELTAF(Hz):' field in the header")]
    MissingDeltaF { path: PathBuf },

    #[error("{path}: couldn't parse the header's DELTAF value '{text}' as a number")]
    UnparsableDeltaF { path: PathBuf, text: String },

    #[error("{path} line {line_num}: expected at least {MIN_COLUMNS} columns, found {num_columns}")]
    TooFewColumns {
        path: PathBuf,
        line_num: usize,
        num_columns: usize,
    },

    #[error("{path} line {line_num}: couldn't parse frequency '{text}'")]
    UnparsableFrequency {
        path: PathBuf,
        line_num: usize,
        text: String,
    },

    #[error("IO error when reading {path}: {err}")]
    IO { path: PathBuf, err: std::io::Error },
}
