// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Aggregate detection files into a spectral-occupancy histogram.

#[cfg(feature = "plotting")]
mod plot;

#[cfg(feature = "plotting")]
pub(super) use plot::PlotError;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::common::{gather_dat_files, progress_bar, ARG_FILE_HELP, BAND_HELP};
use super::GbtOccupancyError;
use crate::band::Band;
use crate::constants::{DEFAULT_BIN_WIDTH_MHZ, DEFAULT_NUM_COARSE_CHANNELS};
use crate::flagging::remove_dc_spikes;
use crate::io::read_paths_file;
use crate::occupancy::{calculate_occupancy, OccupancyError, OccupancyParams};

/// The default name of the output plot.
const DEFAULT_PLOT_FILENAME: &str = "spectral_occupancy.png";

#[derive(Parser, Debug, Default, Serialize, Deserialize)]
pub(super) struct SpectralOccupancyArgs {
    /// Paths to the .dat files to aggregate. Used together with any
    /// --data-dir and --paths-file matches.
    #[clap(name = "DAT_FILES", parse(from_os_str))]
    #[serde(default)]
    files: Vec<PathBuf>,

    #[clap(long, parse(from_os_str), help = ARG_FILE_HELP.as_str())]
    #[serde(skip)]
    args_file: Option<PathBuf>,

    /// A directory to search for .dat files.
    #[clap(short = 'f', long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    /// A text file listing one .dat path per line.
    #[clap(short = 't', long, parse(from_os_str))]
    paths_file: Option<PathBuf>,

    #[clap(short, long, help = BAND_HELP.as_str())]
    band: Option<String>,

    /// The width of the histogram bins [MHz]. Default: 1
    #[clap(short = 'w', long)]
    bin_width: Option<f64>,

    /// Exclude detections that fell within the receiver's notch filter.
    /// Only L and S band have notch filters.
    #[clap(long)]
    #[serde(default)]
    notch_filter: bool,

    /// The files still contain DC spikes; remove them first. Cleaned copies
    /// are written to <band>_band_no_DC_spike. Requires a band.
    #[clap(long)]
    #[serde(default)]
    remove_dc_spike: bool,

    /// The filename to write the occupancy plot to. Default:
    /// spectral_occupancy.png
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

impl SpectralOccupancyArgs {
    /// Merge these arguments with an arguments file, if one was given. CLI
    /// arguments take precedence.
    pub(super) fn merge(self) -> Result<SpectralOccupancyArgs, GbtOccupancyError> {
        let cli_args = self;
        if let Some(arg_file) = &cli_args.args_file {
            debug!("Merging command-line arguments with the argument file");
            let file_args: SpectralOccupancyArgs = unpack_arg_file!(arg_file);
            Ok(SpectralOccupancyArgs {
                files: if cli_args.files.is_empty() {
                    file_args.files
                } else {
                    cli_args.files
                },
                args_file: None,
                data_dir: cli_args.data_dir.or(file_args.data_dir),
                paths_file: cli_args.paths_file.or(file_args.paths_file),
                band: cli_args.band.or(file_args.band),
                bin_width: cli_args.bin_width.or(file_args.bin_width),
                notch_filter: cli_args.notch_filter || file_args.notch_filter,
                remove_dc_spike: cli_args.remove_dc_spike || file_args.remove_dc_spike,
                output: cli_args.output.or(file_args.output),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(&self) -> Result<(), GbtOccupancyError> {
        let band = match self.band.as_deref() {
            Some(b) => Some(
                Band::from_str(b).map_err(|_| GbtOccupancyError::UnknownBand(b.to_string()))?,
            ),
            None => None,
        };
        let bin_width = self.bin_width.unwrap_or(DEFAULT_BIN_WIDTH_MHZ);

        info!("Gathering .dat files...");
        let mut dat_files = gather_dat_files(&self.files, self.data_dir.as_deref())?;
        if let Some(paths_file) = &self.paths_file {
            dat_files.extend(read_paths_file(paths_file)?);
        }
        if dat_files.is_empty() {
            return Err(OccupancyError::NoDatFiles.into());
        }
        info!("{} files to aggregate", dat_files.len());

        if self.remove_dc_spike {
            let band = band.ok_or_else(|| {
                GbtOccupancyError::Generic(
                    "Removing DC spikes requires knowing the band; supply one".to_string(),
                )
            })?;
            dat_files = remove_spikes(&dat_files, band)?;
        }

        if self.notch_filter && band.and_then(Band::notch_filter).is_none() {
            warn!("--notch-filter was given, but there is no notch filter to apply; ignoring");
        }

        info!("Calculating histograms...");
        let result = calculate_occupancy(
            &dat_files,
            OccupancyParams {
                band,
                bin_width,
                notch_filter: self.notch_filter,
            },
        )?;
        if let (Some(first), Some(last)) = (result.bin_edges.first(), result.bin_edges.last()) {
            info!(
                "{} bins between {first} and {last} MHz",
                result.occupancy.len()
            );
        }
        if let Some(peak) = result.occupancy.iter().copied().reduce(f64::max) {
            info!("Peak occupancy: {peak:.3}");
        }

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PLOT_FILENAME));
        #[cfg(feature = "plotting")]
        {
            info!("Saving plot to {}", output.display());
            plot::plot_occupancy(&result, dat_files.len(), bin_width, &output)?;
            Ok(())
        }
        #[cfg(not(feature = "plotting"))]
        {
            // Plotting is an optional feature because it doesn't look
            // possible to statically compile the C dependencies needed for
            // plotting.
            Err(GbtOccupancyError::Plot(format!(
                "Can't write {}: gbt_occupancy wasn't compiled with the \"plotting\" feature",
                output.display()
            )))
        }
    }
}

/// De-spike every file, the cleaned copies landing in
/// `<band>_band_no_DC_spike`. Returns the cleaned files' paths.
fn remove_spikes(dat_files: &[PathBuf], band: Band) -> Result<Vec<PathBuf>, GbtOccupancyError> {
    let output_dir = PathBuf::from(format!("{band}_band_no_DC_spike"));
    fs::create_dir_all(&output_dir)?;

    info!("Removing DC spikes...");
    let pb = progress_bar(dat_files.len(), "Removing DC spikes");
    let mut cleaned = Vec::with_capacity(dat_files.len());
    for dat_file in dat_files {
        let summary = remove_dc_spikes(dat_file, &output_dir, band, DEFAULT_NUM_COARSE_CHANNELS)?;
        cleaned.push(summary.output);
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(cleaned)
}
