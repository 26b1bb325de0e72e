// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
DC-spike removal and spectral-occupancy analysis for Green Bank Telescope
(GBT) detection files.

The GBT fine channeliser injects a spurious detection ("DC spike") at the
centre of every coarse channel; `flagging` computes where those artifacts
fall and strips matching hits out of `.dat` detection tables. `occupancy`
aggregates many detection tables into the fraction of the band that contains
any detection at all.
 */

pub mod band;
pub mod cli;
pub mod constants;
pub mod dat;
pub mod flagging;
pub(crate) mod io;
pub(crate) mod math;
pub mod occupancy;


// Re-exports.
pub use band::Band;
pub use cli::GbtOccupancyError;

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? The CLI sets this once, before any work
/// starts.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
