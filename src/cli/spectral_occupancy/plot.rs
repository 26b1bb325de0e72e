// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plot a spectral-occupancy histogram.

use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::occupancy::SpectralOccupancy;

/// The number of X pixels on the plot.
const X_PIXELS: u32 = 1600;
/// The number of Y pixels on the plot.
const Y_PIXELS: u32 = 800;

#[derive(Error, Debug)]
pub(crate) enum PlotError {
    #[error("No bins to plot")]
    NoBins,

    #[error("Error from the plotters library: {0}")]
    Draw(String),
}

/// Draw the occupancy as a bar chart, one bar per bin.
pub(super) fn plot_occupancy(
    result: &SpectralOccupancy,
    num_files: usize,
    bin_width: f64,
    output: &Path,
) -> Result<(), PlotError> {
    let (x_min, x_max) = match (result.bin_edges.first(), result.bin_edges.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(PlotError::NoBins),
    };
    let draw_err = |e: &dyn std::fmt::Display| PlotError::Draw(e.to_string());

    let root = BitMapBackend::new(output, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .caption(
            format!("Spectral Occupancy: n={num_files}"),
            ("sans-serif", 40),
        )
        .build_cartesian_2d(x_min..x_max, 0.0..1.0f64)
        .map_err(|e| draw_err(&e))?;
    chart
        .configure_mesh()
        .x_desc("Frequency [MHz]")
        .y_desc("Fraction of files with hits")
        .label_style(("sans-serif", 20))
        .draw()
        .map_err(|e| draw_err(&e))?;

    chart
        .draw_series(
            result
                .bin_edges
                .iter()
                .zip(result.occupancy.iter())
                .map(|(&edge, &occupancy)| {
                    Rectangle::new(
                        [(edge, 0.0), (edge + bin_width * 0.99, occupancy)],
                        BLUE.filled(),
                    )
                }),
        )
        .map_err(|e| draw_err(&e))?;
    root.present().map_err(|e| draw_err(&e))?;
    Ok(())
}
