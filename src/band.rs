// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! GBT receiver bands and their fixed frequency parameters.

use itertools::Itertools;
use strum::IntoEnumIterator;

lazy_static::lazy_static! {
    pub(crate) static ref BANDS_COMMA_SEPARATED: String = Band::iter().join(", ");
}

/// A GBT receiver band. Anything else is unrepresentable; unknown band
/// strings are rejected when parsing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
pub enum Band {
    #[strum(serialize = "L")]
    L,

    #[strum(serialize = "S")]
    S,

    #[strum(serialize = "C")]
    C,

    #[strum(serialize = "X")]
    X,
}

impl Band {
    /// The reference frequency anchoring DC-spike positions: the frequency of
    /// the first fine channel of the band's topmost coarse channel \[MHz\].
    pub fn fch1(self) -> f64 {
        match self {
            Band::L => 1926.2695326677515,
            Band::S => 2720.80078125,
            Band::C => 8201.66015625,
            Band::X => 11102.05078125,
        }
    }

    /// The band edges \[MHz\], as listed in Traas et al. 2021.
    pub fn freq_range(self) -> (f64, f64) {
        match self {
            Band::L => (1100.0, 1900.0),
            Band::S => (1800.0, 2800.0),
            Band::C => (4000.0, 7800.0),
            Band::X => (7800.0, 11200.0),
        }
    }

    /// The window suppressed by the receiver's hardware notch filter
    /// \[MHz\], if the band has one. Detections inside it are unreliable.
    pub fn notch_filter(self) -> Option<(f64, f64)> {
        match self {
            Band::L => Some((1200.0, 1341.0)),
            Band::S => Some((2300.0, 2360.0)),
            Band::C | Band::X => None,
        }
    }
}
