// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All frequency constants *must* be double precision; the spike arithmetic
depends on exact 6-decimal rounding of MHz values.
 */

use std::num::NonZeroUsize;

/// The nominal bandwidth digitised by the GBT backend \[MHz\].
pub const NOMINAL_BANDWIDTH_MHZ: f64 = 1500.0;

/// The number of coarse channels the nominal bandwidth is split into by the
/// first channelisation stage.
pub const NOMINAL_NUM_COARSE_CHANNELS: f64 = 512.0;

/// The width of one coarse channel \[MHz\]. Fixed instrument geometry; the
/// fine-channels-per-coarse-channel ratio is derived from this and a file's
/// fine-channel spacing.
pub const COARSE_CHANNEL_WIDTH_MHZ: f64 = NOMINAL_BANDWIDTH_MHZ / NOMINAL_NUM_COARSE_CHANNELS;

/// The default number of coarse channels to locate DC spikes in.
pub const DEFAULT_NUM_COARSE_CHANNELS: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(n) => n,
    None => unreachable!(),
};

/// The default width of spectral-occupancy histogram bins \[MHz\].
pub const DEFAULT_BIN_WIDTH_MHZ: f64 = 1.0;
