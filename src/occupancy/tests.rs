// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use super::*;
use crate::tests::{hit_row, write_dat};

const DELTAF_HZ: f64 = -2.793968;

/// Write a `.dat` file with hits at the given frequencies.
fn dat_path_with_hits(dir: &TempDir, name: &str, freqs: &[f64]) -> PathBuf {
    let rows: Vec<String> = freqs
        .iter()
        .enumerate()
        .map(|(i, &f)| hit_row(i + 1, f, f + 0.000002, f - 0.000002))
        .collect();
    write_dat(dir.path(), name, DELTAF_HZ, &rows)
}

/// Like [dat_path_with_hits], but parsed.
fn dat_with_hits(dir: &TempDir, name: &str, freqs: &[f64]) -> DatFile {
    DatFile::read(&dat_path_with_hits(dir, name, freqs)).unwrap()
}

#[test]
fn test_uniform_bin_edges() {
    let edges = uniform_bin_edges(1100.0, 1900.0, 1.0);
    assert_eq!(edges.len(), 801);
    assert_abs_diff_eq!(edges[0], 1100.0);
    assert_abs_diff_eq!(edges[1], 1101.0);
    assert_abs_diff_eq!(edges[800], 1900.0);
}

#[test]
fn test_uniform_bin_edges_clip_a_partial_final_bin() {
    // 800 / 0.7 isn't integral; the bin count is floored and the last 0.4
    // MHz of the range is clipped.
    let edges = uniform_bin_edges(1100.0, 1900.0, 0.7);
    assert_eq!(edges.len(), 1143);
    let last = *edges.last().unwrap();
    assert!(last < 1900.0);
    assert_abs_diff_eq!(last, 1899.4, epsilon = 1e-9);
}

#[test]
fn test_calculate_hist_with_band_range() {
    let tmp = TempDir::new().unwrap();
    let dat = dat_with_hits(
        &tmp,
        "l.dat",
        &[1100.5, 1105.2, 1105.7, 1900.0, 2000.0, 1050.0],
    );

    let hist = calculate_hist(&dat, Some(Band::L), 1.0);
    assert_eq!(hist.bin_edges.len(), 801);
    assert_eq!(hist.counts.len(), 800);
    assert_eq!(hist.counts[0], 1);
    assert_eq!(hist.counts[5], 2);
    // A hit exactly on the final edge lands in the last bin.
    assert_eq!(hist.counts[799], 1);
    // Out-of-band hits are ignored.
    assert_eq!(hist.counts.iter().sum::<u32>(), 4);
}

#[test]
fn test_calculate_hist_with_data_derived_range() {
    let tmp = TempDir::new().unwrap();
    let dat = dat_with_hits(&tmp, "a.dat", &[100.2, 250.5, 499.6]);

    let hist = calculate_hist(&dat, None, 1.0);
    // floor(100.2) .. round(499.6)
    assert_abs_diff_eq!(hist.bin_edges[0], 100.0);
    assert_abs_diff_eq!(*hist.bin_edges.last().unwrap(), 500.0);
    assert_eq!(hist.counts.len(), 400);
    assert_eq!(hist.counts[0], 1);
    assert_eq!(hist.counts[150], 1);
    assert_eq!(hist.counts[399], 1);
}

#[test]
fn test_calculate_hist_with_no_hits_and_no_band() {
    let tmp = TempDir::new().unwrap();
    let dat = dat_with_hits(&tmp, "empty.dat", &[]);

    let hist = calculate_hist(&dat, None, 1.0);
    assert!(hist.bin_edges.is_empty());
    assert!(hist.counts.is_empty());
}

#[test]
fn test_occupancy_reconciles_data_derived_ranges() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        dat_path_with_hits(&tmp, "a.dat", &[100.2, 250.5, 300.5, 499.6]),
        dat_path_with_hits(&tmp, "b.dat", &[200.1, 250.5, 599.9]),
    ];

    let result = calculate_occupancy(
        &paths,
        OccupancyParams {
            band: None,
            bin_width: 1.0,
            notch_filter: false,
        },
    )
    .unwrap();

    // Per-file ranges [100, 500] and [200, 600] tighten to [200, 500].
    assert_eq!(result.occupancy.len(), 300);
    assert_eq!(result.bin_edges.len(), 301);
    assert_abs_diff_eq!(result.bin_edges[0], 200.0);
    assert_abs_diff_eq!(*result.bin_edges.last().unwrap(), 500.0);

    // 250-251 MHz has a hit in both files, 300-301 and 499-500 only in one,
    // 200-201 only in the other, 210-211 in neither.
    assert_abs_diff_eq!(result.occupancy[50], 1.0);
    assert_abs_diff_eq!(result.occupancy[100], 0.5);
    assert_abs_diff_eq!(result.occupancy[299], 0.5);
    assert_abs_diff_eq!(result.occupancy[0], 0.5);
    assert_abs_diff_eq!(result.occupancy[10], 0.0);
    assert!(result.occupancy.iter().all(|&o| (0.0..=1.0).contains(&o)));
}

#[test]
fn test_occupancy_with_a_hitless_file() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        dat_path_with_hits(&tmp, "quiet.dat", &[]),
        dat_path_with_hits(&tmp, "busy.dat", &[1150.5]),
    ];

    let result = calculate_occupancy(
        &paths,
        OccupancyParams {
            band: Some(Band::L),
            bin_width: 1.0,
            notch_filter: false,
        },
    )
    .unwrap();

    assert_eq!(result.occupancy.len(), 800);
    assert_abs_diff_eq!(result.occupancy[50], 0.5);
    assert_eq!(result.occupancy.iter().filter(|&&o| o > 0.0).count(), 1);
}

#[test]
fn test_invalid_bin_width_fails_before_any_io() {
    // The path doesn't exist; an IO error here would mean validation came
    // too late.
    let paths = [PathBuf::from("/nonexistent/never.dat")];
    for bin_width in [0.0, -1.0] {
        let result = calculate_occupancy(
            &paths,
            OccupancyParams {
                band: Some(Band::L),
                bin_width,
                notch_filter: false,
            },
        );
        assert!(matches!(
            result,
            Err(OccupancyError::InvalidBinWidth { .. })
        ));
    }
}

#[test]
fn test_no_dat_files() {
    let paths: Vec<PathBuf> = vec![];
    let result = calculate_occupancy(&paths, OccupancyParams::default());
    assert!(matches!(result, Err(OccupancyError::NoDatFiles)));
}

#[test]
fn test_no_hits_anywhere_without_a_band() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        dat_path_with_hits(&tmp, "a.dat", &[]),
        dat_path_with_hits(&tmp, "b.dat", &[]),
    ];
    let result = calculate_occupancy(&paths, OccupancyParams::default());
    assert!(matches!(result, Err(OccupancyError::NoHits)));
}

#[test]
fn test_disjoint_ranges() {
    let tmp = TempDir::new().unwrap();
    let paths = [
        dat_path_with_hits(&tmp, "low.dat", &[100.2, 199.4]),
        dat_path_with_hits(&tmp, "high.dat", &[300.1, 399.6]),
    ];
    let result = calculate_occupancy(&paths, OccupancyParams::default());
    assert!(matches!(result, Err(OccupancyError::DisjointRanges { .. })));
}

#[test]
fn test_notch_filter_exclusion() {
    let tmp = TempDir::new().unwrap();
    let paths = [dat_path_with_hits(
        &tmp,
        "l.dat",
        &[1150.5, 1250.5, 1341.5, 1899.5],
    )];

    let result = calculate_occupancy(
        &paths,
        OccupancyParams {
            band: Some(Band::L),
            bin_width: 1.0,
            notch_filter: true,
        },
    )
    .unwrap();

    // No bin edge may fall inside [1200, 1341); 1341 itself survives.
    assert!(!result
        .bin_edges
        .iter()
        .any(|&edge| (1200.0..1341.0).contains(&edge)));
    // 100 bins below the window, 559 at and above it.
    assert_eq!(result.occupancy.len(), 659);
    assert_eq!(result.bin_edges.len(), 660);
    assert_abs_diff_eq!(*result.bin_edges.last().unwrap(), 1900.0);

    // The surviving values are exactly the aligned ones: the hit at 1150.5
    // is still in bin 50, and 1341.5's bin is the first one after the
    // window. The hit at 1250.5 disappeared with its bin.
    assert_abs_diff_eq!(result.occupancy[50], 1.0);
    assert_abs_diff_eq!(result.bin_edges[100], 1341.0);
    assert_abs_diff_eq!(result.occupancy[100], 1.0);
    assert_abs_diff_eq!(result.occupancy[658], 1.0);
    assert_eq!(result.occupancy.iter().filter(|&&o| o > 0.0).count(), 3);
}

#[test]
fn test_notch_filter_is_a_noop_for_bands_without_one() {
    let tmp = TempDir::new().unwrap();
    let paths = [dat_path_with_hits(&tmp, "c.dat", &[4100.5, 7799.5])];

    let with = calculate_occupancy(
        &paths,
        OccupancyParams {
            band: Some(Band::C),
            bin_width: 1.0,
            notch_filter: true,
        },
    )
    .unwrap();
    let without = calculate_occupancy(
        &paths,
        OccupancyParams {
            band: Some(Band::C),
            bin_width: 1.0,
            notch_filter: false,
        },
    )
    .unwrap();

    assert_eq!(with.bin_edges, without.bin_edges);
    assert_eq!(with.occupancy, without.occupancy);
}
