// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing turbo_seti-style `.dat` detection tables.
//!
//! A `.dat` file is a 9-line commented header followed by one
//! whitespace-delimited row per candidate hit. The columns are Top_Hit_#,
//! Drift_Rate, SNR, Uncorrected_Frequency, Corrected_Frequency, Index,
//! freq_start, freq_end, SEFD, SEFD_freq, Coarse_Channel_Number and
//! Full_number_of_hits. Only the frequency columns are ever interpreted or
//! mutated here; everything else passes through as opaque text.

mod error;

pub use error::DatReadError;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The number of lines in a `.dat` file's header.
pub const NUM_HEADER_LINES: usize = 9;

/// The minimum number of columns a data row may have.
pub const MIN_COLUMNS: usize = 12;

// Column positions fixed by the detection-file convention (0-indexed).
const UNCORRECTED_FREQ_COL: usize = 3;
const CORRECTED_FREQ_COL: usize = 4;
const FREQ_START_COL: usize = 6;
const FREQ_END_COL: usize = 7;

/// The header of a `.dat` file. The lines are kept verbatim so a cleaned
/// copy of the file can reproduce them.
#[derive(Debug, Clone)]
pub struct DatHeader {
    lines: Vec<String>,

    /// The fine-channel spacing \[Hz\], signed; negative means the file's
    /// channels descend in frequency.
    pub deltaf_hz: f64,
}

impl DatHeader {
    /// The fine-channel spacing \[MHz\].
    pub fn foff(&self) -> f64 {
        self.deltaf_hz * 1e-6
    }

    /// The header lines with leading and trailing tabs trimmed, ready to be
    /// written to a cleaned copy of the file.
    pub fn normalised_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.trim_matches('\t'))
    }
}

/// One candidate signal in the table.
#[derive(Debug, Clone)]
pub struct Hit {
    /// The `Corrected_Frequency` column \[MHz\].
    pub freq: f64,

    /// The `freq_start` column \[MHz\].
    pub freq_start: f64,

    /// The `freq_end` column \[MHz\].
    pub freq_end: f64,

    /// The raw column text, used when re-serialising the row. Only the
    /// frequency columns are ever rewritten.
    fields: Vec<String>,
}

impl Hit {
    /// Overwrite this hit's frequency columns. The uncorrected- and
    /// corrected-frequency columns both receive `freq`. Frequencies are
    /// written with exactly 6 decimal places.
    pub fn set_frequencies(&mut self, freq: f64, freq_start: f64, freq_end: f64) {
        self.freq = freq;
        self.freq_start = freq_start;
        self.freq_end = freq_end;
        self.fields[UNCORRECTED_FREQ_COL] = format!("{freq:.6}");
        self.fields[CORRECTED_FREQ_COL] = format!("{freq:.6}");
        self.fields[FREQ_START_COL] = format!("{freq_start:.6}");
        self.fields[FREQ_END_COL] = format!("{freq_end:.6}");
    }

    /// Serialise the row, fields joined by a double space.
    pub fn to_line(&self) -> String {
        self.fields.join("  ")
    }
}

/// An entire detection table.
#[derive(Debug, Clone)]
pub struct DatFile {
    pub header: DatHeader,
    pub hits: Vec<Hit>,
}

impl DatFile {
    /// Read and parse the `.dat` file at `path`. Row order is preserved.
    pub fn read(path: &Path) -> Result<DatFile, DatReadError> {
        let file = File::open(path).map_err(|err| DatReadError::IO {
            path: path.to_path_buf(),
            err,
        })?;

        let mut header_lines = Vec::with_capacity(NUM_HEADER_LINES);
        let mut hits = vec![];
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|err| DatReadError::IO {
                path: path.to_path_buf(),
                err,
            })?;
            if i < NUM_HEADER_LINES {
                header_lines.push(line);
            } else if !line.trim().is_empty() {
                hits.push(parse_hit(path, i + 1, &line)?);
            }
        }
        if header_lines.len() < NUM_HEADER_LINES {
            return Err(DatReadError::IncompleteHeader {
                path: path.to_path_buf(),
                num_lines: header_lines.len(),
            });
        }

        let deltaf_hz = parse_deltaf(path, &header_lines)?;
        Ok(DatFile {
            header: DatHeader {
                lines: header_lines,
                deltaf_hz,
            },
            hits,
        })
    }
}

/// Find `DELTAF(Hz):` among the header lines and parse the token after it.
fn parse_deltaf(path: &Path, header_lines: &[String]) -> Result<f64, DatReadError> {
    for line in header_lines {
        let mut tokens = line.split_ascii_whitespace();
        while let Some(token) = tokens.next() {
            if token == "DELTAF(Hz):" {
                let text = tokens.next().unwrap_or("");
                return text.parse().map_err(|_| DatReadError::UnparsableDeltaF {
                    path: path.to_path_buf(),
                    text: text.to_string(),
                });
            }
        }
    }
    Err(DatReadError::MissingDeltaF {
        path: path.to_path_buf(),
    })
}

fn parse_hit(path: &Path, line_num: usize, line: &str) -> Result<Hit, DatReadError> {
    let fields: Vec<String> = line
        .split_ascii_whitespace()
        .map(|field| field.to_string())
        .collect();
    if fields.len() < MIN_COLUMNS {
        return Err(DatReadError::TooFewColumns {
            path: path.to_path_buf(),
            line_num,
            num_columns: fields.len(),
        });
    }

    let parse_freq = |col: usize| -> Result<f64, DatReadError> {
        fields[col].parse().map_err(|_| DatReadError::UnparsableFrequency {
            path: path.to_path_buf(),
            line_num,
            text: fields[col].clone(),
        })
    };

    Ok(Hit {
        freq: parse_freq(CORRECTED_FREQ_COL)?,
        freq_start: parse_freq(FREQ_START_COL)?,
        freq_end: parse_freq(FREQ_END_COL)?,
        fields,
    })
}
