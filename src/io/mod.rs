// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! File stuff (globs and file lists).

mod glob;

pub(crate) use self::glob::{get_all_matches_from_glob, GlobError};

use std::fs;
use std::path::{Path, PathBuf};

/// Read a text file containing one `.dat` path per line. Blank lines are
/// skipped.
pub(crate) fn read_paths_file(path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    Ok(fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
