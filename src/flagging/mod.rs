// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Removal of DC spikes from detection tables.
//!
//! The GBT channeliser leaves a spurious detection at the centre of every
//! coarse channel. Given a band's reference frequency and a file's
//! fine-channel spacing, the frequency of every such artifact can be
//! computed exactly, and hits landing on one (to the Hz) dropped.

mod error;
#[cfg(test)]
mod tests;

pub use error::SpikeRemovalError;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use log::debug;

use crate::band::Band;
use crate::constants::COARSE_CHANNEL_WIDTH_MHZ;
use crate::dat::DatFile;
use crate::math::{round_to_hz, whole_hz};

/// What [remove_dc_spikes] did to one file.
#[derive(Debug)]
pub struct SpikeRemovalSummary {
    /// The cleaned file.
    pub output: PathBuf,

    /// The number of hits dropped as DC spikes.
    pub num_removed: usize,

    /// The number of hits kept.
    pub num_kept: usize,
}

/// The frequencies at which DC spikes fall for the given band and
/// fine-channel spacing \[MHz\], rounded to the Hz. The sequence is ordered
/// by coarse-channel index, so it ascends or descends in frequency with the
/// sign of `foff`, and is truncated at the first non-positive frequency
/// (nothing past that point is valid).
pub fn spike_frequencies(band: Band, foff: f64, num_coarse_channels: NonZeroUsize) -> Vec<f64> {
    let nfpc = COARSE_CHANNEL_WIDTH_MHZ / foff.abs();
    let fch1 = band.fch1();
    // The spike sits at the centre of each coarse channel.
    (0..num_coarse_channels.get())
        .map(|i| nfpc / 2.0 + nfpc * i as f64)
        .map(|fine_channel| round_to_hz(fch1 + foff * fine_channel))
        .take_while(|&freq| freq > 0.0)
        .collect()
}

/// Remove DC-spike hits from the `.dat` file at `dat_path`, writing a
/// cleaned copy named `<file_name>new.dat` into `output_dir`. The input file
/// is never mutated, surviving rows keep their order, and every surviving
/// row's frequencies are recentred from the channel's left edge to its
/// centre (`foff/2` below the reported value for descending-frequency
/// files).
pub fn remove_dc_spikes(
    dat_path: &Path,
    output_dir: &Path,
    band: Band,
    num_coarse_channels: NonZeroUsize,
) -> Result<SpikeRemovalSummary, SpikeRemovalError> {
    let dat = DatFile::read(dat_path)?;
    let foff = dat.header.foff();

    let spikes: HashSet<i64> = spike_frequencies(band, foff, num_coarse_channels)
        .into_iter()
        .map(whole_hz)
        .collect();
    debug!(
        "{}: {} spike frequencies for band {band}",
        dat_path.display(),
        spikes.len()
    );

    let mut file_name = dat_path
        .file_name()
        .ok_or_else(|| SpikeRemovalError::NoFileName {
            path: dat_path.to_path_buf(),
        })?
        .to_os_string();
    file_name.push("new.dat");
    let output = output_dir.join(file_name);

    let out_file = File::create(&output).map_err(|err| SpikeRemovalError::Write {
        path: output.clone(),
        err,
    })?;
    let mut writer = BufWriter::new(out_file);
    let write_err = |err| SpikeRemovalError::Write {
        path: output.clone(),
        err,
    };

    for line in dat.header.normalised_lines() {
        writeln!(writer, "{line}").map_err(write_err)?;
    }

    let (mut num_removed, mut num_kept) = (0, 0);
    for mut hit in dat.hits {
        let freq = round_to_hz(hit.freq - foff / 2.0);
        let freq_start = round_to_hz(hit.freq_start - foff / 2.0);
        let freq_end = round_to_hz(hit.freq_end - foff / 2.0);

        // The recentred frequency, give or take a Hz, must not land on a
        // spike.
        let hz = whole_hz(freq);
        if [hz - 1, hz, hz + 1].iter().any(|probe| spikes.contains(probe)) {
            num_removed += 1;
            continue;
        }

        hit.set_frequencies(freq, freq_start, freq_end);
        writeln!(writer, "{}", hit.to_line()).map_err(write_err)?;
        num_kept += 1;
    }
    writer.flush().map_err(write_err)?;

    Ok(SpikeRemovalSummary {
        output,
        num_removed,
        num_kept,
    })
}
