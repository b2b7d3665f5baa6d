//! Plain-text CSV persistence for signals.
//!
//! The format is a handful of `#`-prefixed header comments (label, sample
//! rate, length, duration), a `Time,Amplitude` column row, then one
//! `time,amplitude` line per sample. Loading recovers the sample rate from
//! the header and tolerates comments it does not recognize.

use crate::error::Error;
use crate::signal::Signal;
use alloc::string::String;
use alloc::vec::Vec;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sample rate assumed when a loaded file carries no header.
const DEFAULT_SAMPLE_RATE: f64 = 44_100.0;

/// Errors raised by CSV persistence.
#[derive(Debug)]
pub enum ExportError {
    /// Underlying filesystem I/O failure.
    Io(std::io::Error),
    /// The file held no data rows.
    EmptyFile,
    /// A data row could not be parsed as `time,amplitude`.
    MalformedRow {
        /// 1-based line number of the offending row.
        line: usize,
    },
    /// The recovered samples could not form a valid signal.
    Invalid(Error),
}

impl core::fmt::Display for ExportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "csv I/O failure: {err}"),
            ExportError::EmptyFile => write!(f, "csv file holds no data rows"),
            ExportError::MalformedRow { line } => {
                write!(f, "csv row at line {line} is not `time,amplitude`")
            }
            ExportError::Invalid(err) => write!(f, "loaded signal is invalid: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            ExportError::Invalid(err) => Some(err),
            ExportError::EmptyFile | ExportError::MalformedRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        ExportError::Io(value)
    }
}

impl From<Error> for ExportError {
    fn from(value: Error) -> Self {
        ExportError::Invalid(value)
    }
}

/// Write `(time, amplitude)` rows for every sample of the signal.
pub fn save_signal_csv<P: AsRef<Path>>(signal: &Signal, path: P) -> Result<(), ExportError> {
    let file = fs::File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# {}", signal.label())?;
    writeln!(out, "# Sample Rate: {:.1} Hz", signal.sample_rate())?;
    writeln!(out, "# Length: {} samples", signal.len())?;
    writeln!(out, "# Duration: {:.6} seconds", signal.duration())?;
    writeln!(out, "Time,Amplitude")?;

    for (i, sample) in signal.samples().iter().enumerate() {
        let time = i as f64 / signal.sample_rate();
        writeln!(out, "{time:.6},{sample:.6}")?;
    }
    out.flush()?;
    Ok(())
}

/// Load a signal previously written by [`save_signal_csv`].
pub fn load_signal_csv<P: AsRef<Path>>(path: P) -> Result<Signal, ExportError> {
    let contents = fs::read_to_string(path)?;

    let mut sample_rate = DEFAULT_SAMPLE_RATE;
    let mut label: Option<String> = None;
    let mut samples: Vec<f64> = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if let Some(rate) = comment.strip_prefix("Sample Rate:") {
                let rate = rate.trim().trim_end_matches("Hz").trim();
                if let Ok(parsed) = rate.parse::<f64>() {
                    if parsed.is_finite() && parsed > 0.0 {
                        sample_rate = parsed;
                    }
                }
            } else if label.is_none() && !comment.is_empty() && !comment.contains(':') {
                label = Some(comment.into());
            }
            continue;
        }
        if line.starts_with("Time") {
            continue;
        }

        let (_, amplitude) = line
            .split_once(',')
            .ok_or(ExportError::MalformedRow { line: idx + 1 })?;
        let amplitude: f64 = amplitude
            .trim()
            .parse()
            .map_err(|_| ExportError::MalformedRow { line: idx + 1 })?;
        samples.push(amplitude);
    }

    if samples.is_empty() {
        return Err(ExportError::EmptyFile);
    }

    let mut signal = Signal::from_samples(samples, sample_rate)?;
    signal.set_label(label.unwrap_or_else(|| "Loaded from file".into()));
    Ok(signal)
}
