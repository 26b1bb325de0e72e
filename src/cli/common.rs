// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helpers shared between the subcommands.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use itertools::Itertools;
use strum::IntoEnumIterator;

use super::GbtOccupancyError;
use crate::io::get_all_matches_from_glob;

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref BAND_HELP: String =
        format!("The GBT band the data was collected from. Valid bands are: {}", *crate::band::BANDS_COMMA_SEPARATED);
}

/// All of the possible file extensions an arguments file can have.
#[derive(Debug, Clone, Copy, strum_macros::Display, strum_macros::EnumIter, strum_macros::EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,

    #[strum(serialize = "json")]
    Json,
}

// Get a deserialisable args struct out of a toml or json file.
macro_rules! unpack_arg_file {
    ($arg_file:expr) => {{
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(GbtOccupancyError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(GbtOccupancyError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            None => {
                return Err(GbtOccupancyError::ArgFile(format!(
                    "Argument file '{}' doesn't have a recognised file extension! Valid extensions are: {}",
                    $arg_file.display(),
                    *ARG_FILE_TYPES_COMMA_SEPARATED
                )))
            }
        }
    }};
}

/// Collect `.dat` files from explicitly-listed paths and/or a directory to
/// search.
pub(super) fn gather_dat_files(
    files: &[PathBuf],
    data_dir: Option<&Path>,
) -> Result<Vec<PathBuf>, GbtOccupancyError> {
    let mut dat_files = files.to_vec();
    if let Some(dir) = data_dir {
        dat_files.extend(get_all_matches_from_glob(&format!(
            "{}/*.dat",
            dir.display()
        ))?);
    }
    Ok(dat_files)
}

/// A progress bar in the house style, hidden if the user asked for no
/// progress bars.
pub(super) fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    ProgressBar::with_draw_target(
        Some(len as u64),
        if crate::PROGRESS_BARS.load() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_style(
        ProgressStyle::default_bar()
            .template(
                "{msg:17}: [{wide_bar:.blue}] {pos:4}/{len:4} files ({elapsed_precise}<{eta_precise})",
            )
            .unwrap()
            .progress_chars("=> "),
    )
    .with_message(message)
}
