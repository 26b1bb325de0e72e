// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spectral-occupancy aggregation.
//!
//! Each detection table is binned into a histogram of hits over frequency;
//! the histograms are aligned onto a common set of bin edges, and the
//! fraction of files with at least one hit in each bin is the band's
//! spectral occupancy.

mod error;
#[cfg(test)]
mod tests;

pub use error::OccupancyError;

use std::path::Path;

use itertools::{Itertools, MinMaxResult};
use log::debug;
use vec1::Vec1;

use crate::band::Band;
use crate::constants::DEFAULT_BIN_WIDTH_MHZ;
use crate::dat::DatFile;

/// How to aggregate a set of detection tables.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyParams {
    /// With a band, every file is binned over the band's fixed frequency
    /// range; without one, each file's range is derived from its own data
    /// and the ranges are reconciled afterwards.
    pub band: Option<Band>,

    /// Histogram bin width \[MHz\]. Must be positive.
    pub bin_width: f64,

    /// Drop bins inside the band's hardware notch-filter window. Only L and
    /// S band have notch filters; a no-op otherwise.
    pub notch_filter: bool,
}

impl Default for OccupancyParams {
    fn default() -> Self {
        OccupancyParams {
            band: None,
            bin_width: DEFAULT_BIN_WIDTH_MHZ,
            notch_filter: false,
        }
    }
}

/// A single file's hit histogram.
#[derive(Debug, Clone)]
pub struct HitHistogram {
    /// Bin edges \[MHz\]; `counts.len() + 1` entries. Empty when a
    /// data-ranged file has no hits to derive a range from.
    pub bin_edges: Vec<f64>,

    /// Hits per bin.
    pub counts: Vec<u32>,
}

/// The aggregated result.
#[derive(Debug, Clone)]
pub struct SpectralOccupancy {
    /// The left edge of every kept bin, plus the final right edge \[MHz\].
    /// Contiguous unless notch-filter bins were removed.
    pub bin_edges: Vec<f64>,

    /// Per bin, the fraction of files with at least one hit in it;
    /// `bin_edges.len() - 1` entries, each in \[0, 1\].
    pub occupancy: Vec<f64>,
}

/// Histogram one file's hit frequencies into uniform `bin_width`-wide bins.
pub fn calculate_hist(dat: &DatFile, band: Option<Band>, bin_width: f64) -> HitHistogram {
    let range = match band {
        Some(band) => Some(band.freq_range()),
        None => match dat.hits.iter().map(|hit| hit.freq).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(f) => Some((f.floor(), f.round())),
            MinMaxResult::MinMax(min, max) => Some((min.floor(), max.round())),
        },
    };
    let (min_freq, max_freq) = match range {
        Some(r) => r,
        // No band and no hits: there's no range to bin over. The file
        // contributes zeros once histograms are aligned.
        None => {
            return HitHistogram {
                bin_edges: vec![],
                counts: vec![],
            }
        }
    };

    let bin_edges = uniform_bin_edges(min_freq, max_freq, bin_width);
    let num_bins = bin_edges.len().saturating_sub(1);
    let mut counts = vec![0; num_bins];
    if num_bins > 0 {
        let top = bin_edges[num_bins];
        for hit in &dat.hits {
            if hit.freq < min_freq || hit.freq > top {
                continue;
            }
            // A hit exactly on the final edge belongs to the last bin.
            let i = (((hit.freq - min_freq) / bin_width) as usize).min(num_bins - 1);
            counts[i] += 1;
        }
    }
    HitHistogram { bin_edges, counts }
}

/// Aggregate a set of `.dat` files into their spectral occupancy.
pub fn calculate_occupancy<P: AsRef<Path>>(
    dat_files: &[P],
    params: OccupancyParams,
) -> Result<SpectralOccupancy, OccupancyError> {
    // Validate before touching the filesystem.
    if !(params.bin_width > 0.0) {
        return Err(OccupancyError::InvalidBinWidth {
            bin_width: params.bin_width,
        });
    }

    let mut histograms = Vec::with_capacity(dat_files.len());
    for path in dat_files {
        let dat = DatFile::read(path.as_ref())?;
        histograms.push(calculate_hist(&dat, params.band, params.bin_width));
    }
    let histograms = Vec1::try_from_vec(histograms).map_err(|_| OccupancyError::NoDatFiles)?;

    let (bin_edges, occupancy) = aggregate(&histograms, params.bin_width)?;

    let result = match (params.notch_filter, params.band.and_then(Band::notch_filter)) {
        (true, Some(window)) => exclude_notch_bins(bin_edges, occupancy, window),
        _ => SpectralOccupancy {
            bin_edges,
            occupancy,
        },
    };
    Ok(result)
}

/// Uniform bin edges covering `[min_freq, max_freq]`. The number of bins is
/// *floored*, so a final partial bin is clipped rather than extended past
/// `max_freq`.
fn uniform_bin_edges(min_freq: f64, max_freq: f64, bin_width: f64) -> Vec<f64> {
    let num_bins = ((max_freq - min_freq) / bin_width).floor() as usize;
    (0..=num_bins)
        .map(|i| min_freq + i as f64 * bin_width)
        .collect()
}

/// Align per-file histograms onto their tightest common frequency range and
/// count, per bin, the files with at least one hit in it.
fn aggregate(
    histograms: &Vec1<HitHistogram>,
    bin_width: f64,
) -> Result<(Vec<f64>, Vec<f64>), OccupancyError> {
    // The tightest range shared by every file. Histograms without bins
    // (hitless data-ranged files) don't constrain it. Band-ranged histograms
    // all pin the same range, so only data-derived ranges can disagree.
    let mut common_min = f64::NEG_INFINITY;
    let mut common_max = f64::INFINITY;
    let mut ranged = false;
    for hist in histograms.iter() {
        if let (Some(&first), Some(&last)) = (hist.bin_edges.first(), hist.bin_edges.last()) {
            common_min = common_min.max(first);
            common_max = common_max.min(last);
            ranged = true;
        }
    }
    if !ranged {
        return Err(OccupancyError::NoHits);
    }
    if common_min >= common_max {
        return Err(OccupancyError::DisjointRanges {
            common_min,
            common_max,
        });
    }
    debug!("Common frequency range: {common_min} to {common_max} MHz");

    // Keep only the bins whose left edge lies in [common_min, common_max),
    // so every file's counts line up positionally on one axis. Edge
    // comparisons get a small tolerance; the grids are nominally identical
    // but arrive via different arithmetic.
    let tol = bin_width * 1e-6;
    let mut common_edges: Option<Vec<f64>> = None;
    let mut files_with_hit: Vec<u32> = vec![];
    for hist in histograms.iter() {
        if hist.bin_edges.is_empty() {
            continue;
        }
        let kept: Vec<(f64, u32)> = hist
            .bin_edges
            .iter()
            .zip(hist.counts.iter())
            .filter(|(&edge, _)| edge >= common_min - tol && edge < common_max - tol)
            .map(|(&edge, &count)| (edge, count))
            .collect();

        match &common_edges {
            None => {
                let mut edges: Vec<f64> = kept.iter().map(|&(edge, _)| edge).collect();
                edges.push(common_max);
                common_edges = Some(edges);
                files_with_hit = kept
                    .iter()
                    .map(|&(_, count)| u32::from(count > 0))
                    .collect();
            }

            Some(edges) => {
                if kept.len() + 1 != edges.len() {
                    return Err(OccupancyError::BinMisalignment {
                        expected: edges.len() - 1,
                        found: kept.len(),
                    });
                }
                for (slot, (_, count)) in files_with_hit.iter_mut().zip(&kept) {
                    *slot += u32::from(*count > 0);
                }
            }
        }
    }

    let num_files = histograms.len() as f64;
    let occupancy = files_with_hit
        .iter()
        .map(|&n| f64::from(n) / num_files)
        .collect();
    // `ranged` guarantees at least one histogram reached the match above.
    let bin_edges = common_edges.unwrap_or_default();
    Ok((bin_edges, occupancy))
}

/// Drop the bins whose left edge falls inside the notch-filter window
/// `[start, end)` from both sequences. This is an exact re-slice of the
/// aligned vectors; the surviving values are untouched.
fn exclude_notch_bins(
    bin_edges: Vec<f64>,
    occupancy: Vec<f64>,
    (start, end): (f64, f64),
) -> SpectralOccupancy {
    debug!("Excluding bins in the notch-filter range {start}-{end} MHz");
    let last_edge = bin_edges.last().copied();
    let (mut kept_edges, kept_occupancy): (Vec<f64>, Vec<f64>) = bin_edges
        .iter()
        .zip(occupancy.iter())
        .filter(|(&edge, _)| edge < start || edge >= end)
        .map(|(&edge, &occ)| (edge, occ))
        .unzip();
    if let Some(last_edge) = last_edge {
        kept_edges.push(last_edge);
    }
    SpectralOccupancy {
        bin_edges: kept_edges,
        occupancy: kept_occupancy,
    }
}
