// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Strip the DC-spike artifact out of detection files.


use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use clap::Parser;
use log::{debug, info};

use super::common::{gather_dat_files, progress_bar, BAND_HELP};
use super::GbtOccupancyError;
use crate::band::Band;
use crate::flagging::remove_dc_spikes;

#[derive(Parser, Debug)]
pub(super) struct RemoveDcSpikeArgs {
    /// Paths to the .dat files to clean. Used together with any --data-dir
    /// matches.
    #[clap(name = "DAT_FILES", parse(from_os_str))]
    files: Vec<PathBuf>,

    /// A directory to search for .dat files.
    #[clap(short = 'f', long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    #[clap(short, long, help = BAND_HELP.as_str())]
    band: String,

    /// The number of coarse channels in the band.
    #[clap(short, long, default_value = "512")]
    num_coarse_channels: NonZeroUsize,

    /// The directory to write cleaned files into; created if it doesn't
    /// exist. Default: <band>_band_no_DC_spike
    #[clap(short, long, parse(from_os_str))]
    output_dir: Option<PathBuf>,
}

impl RemoveDcSpikeArgs {
    pub(super) fn run(&self) -> Result<(), GbtOccupancyError> {
        let band = Band::from_str(&self.band)
            .map_err(|_| GbtOccupancyError::UnknownBand(self.band.clone()))?;

        let dat_files = gather_dat_files(&self.files, self.data_dir.as_deref())?;
        if dat_files.is_empty() {
            return Err(GbtOccupancyError::Generic(
                "No .dat files were found to clean".to_string(),
            ));
        }

        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{band}_band_no_DC_spike")));
        fs::create_dir_all(&output_dir)?;

        info!("Removing DC spikes from {} files...", dat_files.len());
        let start = Instant::now();
        let pb = progress_bar(dat_files.len(), "Removing DC spikes");
        let mut num_removed = 0;
        for dat_file in &dat_files {
            let summary = remove_dc_spikes(dat_file, &output_dir, band, self.num_coarse_channels)?;
            debug!(
                "{}: removed {} of {} hits",
                dat_file.display(),
                summary.num_removed,
                summary.num_removed + summary.num_kept
            );
            num_removed += summary.num_removed;
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(
            "Removed {} DC-spike hits from {} files in {:.2}s",
            num_removed,
            dat_files.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
