// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;
use std::num::NonZeroUsize;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use super::*;
use crate::tests::{hit_row, write_dat};

// An exactly-representable spacing: 1 / 2^19 MHz. With this, there are
// exactly 1536000 fine channels per coarse channel and the spike arithmetic
// below is reproducible to the bit.
const FOFF: f64 = -1.9073486328125e-6;
const DELTAF_HZ: f64 = -1.9073486328125;

fn num_coarse(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_first_spike_frequency_per_band() {
    // First spike = fch1 + foff * nfpc/2, i.e. half a coarse channel
    // (1.46484375 MHz) below the reference frequency.
    for (band, expected) in [
        (Band::L, 1924.804689),
        (Band::S, 2719.335938),
        (Band::C, 8200.195313),
        (Band::X, 11100.585938),
    ] {
        let spikes = spike_frequencies(band, FOFF, num_coarse(4));
        assert_eq!(spikes.len(), 4);
        assert_abs_diff_eq!(spikes[0], expected, epsilon = 1e-9);
    }
}

#[test]
fn test_spike_frequencies_descend_with_negative_foff() {
    let spikes = spike_frequencies(Band::L, FOFF, num_coarse(8));
    assert_eq!(spikes.len(), 8);
    for pair in spikes.windows(2) {
        assert!(pair[1] < pair[0]);
        // Adjacent spikes are one coarse channel apart.
        assert_abs_diff_eq!(pair[0] - pair[1], 2.9296875, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(spikes[1], 1921.875001, epsilon = 1e-9);
}

#[test]
fn test_spike_frequencies_ascend_with_positive_foff() {
    let spikes = spike_frequencies(Band::L, -FOFF, num_coarse(8));
    assert_eq!(spikes.len(), 8);
    for pair in spikes.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    assert_abs_diff_eq!(spikes[0], 1927.734376, epsilon = 1e-9);
}

#[test]
fn test_spike_frequencies_truncate_at_non_positive() {
    // L band runs out of positive frequencies after 658 coarse channels at
    // this spacing; the remainder of the sequence is dropped entirely.
    let spikes = spike_frequencies(Band::L, FOFF, num_coarse(1024));
    assert_eq!(spikes.len(), 658);
    assert_abs_diff_eq!(spikes[657], 0.000001, epsilon = 1e-12);
    assert!(spikes.iter().all(|&f| f > 0.0));
}

#[test]
fn test_spike_frequencies_are_deterministic() {
    let a = spike_frequencies(Band::S, FOFF, num_coarse(512));
    let b = spike_frequencies(Band::S, FOFF, num_coarse(512));
    assert_eq!(a, b);
}

#[test]
fn test_remove_dc_spikes() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("cleaned");
    fs::create_dir(&out_dir).unwrap();

    // The first two L-band spikes sit at 1924.804689 and 1921.875001 MHz
    // after recentring. Rows 1 and 4 land on them exactly, row 2 lands 2 Hz
    // below the first (outside the 1 Hz probe window), row 3 is far away.
    let rows = [
        hit_row(1, 1924.804688, 1924.804690, 1924.804686),
        hit_row(2, 1924.804686, 1924.804688, 1924.804684),
        hit_row(3, 1924.810000, 1924.810002, 1924.809998),
        hit_row(4, 1921.875000, 1921.875002, 1921.874998),
    ];
    let path = write_dat(tmp.path(), "lband.dat", DELTAF_HZ, &rows);

    let summary = remove_dc_spikes(&path, &out_dir, Band::L, num_coarse(512)).unwrap();
    assert_eq!(summary.num_removed, 2);
    assert_eq!(summary.num_kept, 2);
    assert_eq!(summary.output, out_dir.join("lband.datnew.dat"));

    let cleaned = DatFile::read(&summary.output).unwrap();
    assert_eq!(cleaned.hits.len(), 2);
    // Survivors are recentred by -foff/2 and keep their order.
    assert_abs_diff_eq!(cleaned.hits[0].freq, 1924.804687, epsilon = 1e-9);
    assert_abs_diff_eq!(cleaned.hits[1].freq, 1924.810001, epsilon = 1e-9);
    assert_abs_diff_eq!(cleaned.hits[1].freq_start, 1924.810003, epsilon = 1e-9);
    assert_abs_diff_eq!(cleaned.hits[1].freq_end, 1924.809999, epsilon = 1e-9);
}

#[test]
fn test_probe_window_catches_hits_one_hz_off() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("cleaned");
    fs::create_dir(&out_dir).unwrap();

    // 1 Hz below the first spike after recentring; the ±1 Hz probe window
    // must catch it.
    let rows = [hit_row(1, 1924.804687, 1924.804689, 1924.804685)];
    let path = write_dat(tmp.path(), "close.dat", DELTAF_HZ, &rows);

    let summary = remove_dc_spikes(&path, &out_dir, Band::L, num_coarse(512)).unwrap();
    assert_eq!(summary.num_removed, 1);
    assert_eq!(summary.num_kept, 0);
}

#[test]
fn test_no_spikes_matched_is_success() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("cleaned");
    fs::create_dir(&out_dir).unwrap();

    let rows = [
        hit_row(1, 1500.000000, 1500.000002, 1499.999998),
        hit_row(2, 1500.123456, 1500.123458, 1500.123454),
    ];
    let path = write_dat(tmp.path(), "quiet.dat", DELTAF_HZ, &rows);

    let summary = remove_dc_spikes(&path, &out_dir, Band::L, num_coarse(512)).unwrap();
    assert_eq!(summary.num_removed, 0);
    assert_eq!(summary.num_kept, 2);

    let cleaned = DatFile::read(&summary.output).unwrap();
    assert_eq!(cleaned.hits.len(), rows.len());
    assert_abs_diff_eq!(cleaned.hits[0].freq, 1500.000001, epsilon = 1e-9);
    assert_abs_diff_eq!(cleaned.hits[1].freq, 1500.123457, epsilon = 1e-9);
}

#[test]
fn test_removal_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    let out_a = tmp.path().join("a");
    let out_b = tmp.path().join("b");
    fs::create_dir(&out_a).unwrap();
    fs::create_dir(&out_b).unwrap();

    let rows = [
        hit_row(1, 1924.804688, 1924.804690, 1924.804686),
        hit_row(2, 1924.810000, 1924.810002, 1924.809998),
    ];
    let path = write_dat(tmp.path(), "lband.dat", DELTAF_HZ, &rows);

    let a = remove_dc_spikes(&path, &out_a, Band::L, num_coarse(512)).unwrap();
    let b = remove_dc_spikes(&path, &out_b, Band::L, num_coarse(512)).unwrap();
    assert_eq!(fs::read(a.output).unwrap(), fs::read(b.output).unwrap());
}

#[test]
fn test_input_file_is_untouched() {
    let tmp = TempDir::new().unwrap();
    let out_dir = tmp.path().join("cleaned");
    fs::create_dir(&out_dir).unwrap();

    let rows = [hit_row(1, 1924.804688, 1924.804690, 1924.804686)];
    let path = write_dat(tmp.path(), "lband.dat", DELTAF_HZ, &rows);
    let before = fs::read(&path).unwrap();

    remove_dc_spikes(&path, &out_dir, Band::L, num_coarse(512)).unwrap();
    assert_eq!(fs::read(&path).unwrap(), before);
}
