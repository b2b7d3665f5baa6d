//! ASCII rendering of signals and spectra.
//!
//! Pure string producers with no I/O of their own; the demo binary decides
//! where the text goes. Canvases narrower than 10 columns or shorter than 5
//! rows are rejected rather than drawn illegibly.

use crate::error::Error;
use crate::signal::spectrum::Spectrum;
use crate::signal::Signal;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

const PLOT_CHAR: u8 = b'*';
const HAXIS_CHAR: u8 = b'-';
const ZERO_CHAR: u8 = b'+';

fn check_canvas(width: usize, height: usize) -> Result<(), Error> {
    if width < 10 {
        return Err(Error::InvalidArg {
            arg: "width".to_string(),
            reason: "plot width must be at least 10 columns".to_string(),
        });
    }
    if height < 5 {
        return Err(Error::InvalidArg {
            arg: "height".to_string(),
            reason: "plot height must be at least 5 rows".to_string(),
        });
    }
    Ok(())
}

fn rows_to_string(rows: &[Vec<u8>]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str("        |");
        out.push_str(core::str::from_utf8(row).unwrap_or(""));
        out.push('\n');
    }
    out
}

fn rule(label: f64, width: usize) -> String {
    let mut line = format!("  {label:.3} |");
    for _ in 0..width {
        line.push('-');
    }
    line.push('\n');
    line
}

fn index_ruler(width: usize) -> String {
    let mut line = String::from("        0");
    for x in 1..width {
        if x % 10 == 0 {
            line.push_str(&((x / 10) % 10).to_string());
        } else {
            line.push(' ');
        }
    }
    line.push('\n');
    line
}

/// Render a time-domain plot of the signal.
///
/// Signals wider than the canvas are downsampled by averaging; narrower ones
/// are stretched by repeating samples. A `-` line marks zero when it falls
/// inside the value range.
pub fn render_signal(signal: &Signal, width: usize, height: usize) -> Result<String, Error> {
    check_canvas(width, height)?;

    let stats = signal.stats();
    let (mut min, mut max) = (stats.min, stats.max);
    if (max - min).abs() < 1e-10 {
        max += 0.1;
        min -= 0.1;
    }
    let range = max - min;

    let mut out = format!("=== {} ===\n", signal.label());
    out.push_str(&format!(
        "Length: {} samples, Sample Rate: {:.1} Hz, Duration: {:.3} s\n",
        signal.len(),
        signal.sample_rate(),
        signal.duration(),
    ));
    out.push_str(&format!("Range: [{min:.6}, {max:.6}]\n\n"));

    let mut rows = vec![vec![b' '; width]; height];

    // Zero axis, when zero sits inside the plotted range.
    if min <= 0.0 && 0.0 <= max {
        let zero_row = ((height - 1) as f64 * max / range).round() as usize;
        if zero_row < height {
            rows[zero_row].fill(HAXIS_CHAR);
            rows[zero_row][0] = ZERO_CHAR;
        }
    }

    let samples = signal.samples();
    let len = samples.len();
    for x in 0..width {
        let start = x * len / width;
        let end = ((x + 1) * len / width).max(start + 1).min(len);
        if start >= len {
            break;
        }
        let chunk = &samples[start..end];
        let value = chunk.iter().sum::<f64>() / chunk.len() as f64;

        let y = ((height - 1) as f64 * (max - value) / range).round() as usize;
        if y < height {
            rows[y][x] = PLOT_CHAR;
        }
    }

    out.push_str(&rule(max, width));
    out.push_str(&rows_to_string(&rows));
    out.push_str(&rule(min, width));
    out.push_str(&index_ruler(width));
    Ok(out)
}

/// Render the positive-frequency half of a magnitude spectrum.
pub fn render_spectrum(spectrum: &Spectrum, width: usize, height: usize) -> Result<String, Error> {
    check_canvas(width, height)?;
    if spectrum.is_empty() {
        return Err(Error::InvalidArg {
            arg: "spectrum".to_string(),
            reason: "spectrum holds no bins".to_string(),
        });
    }

    let half = (spectrum.len() / 2).max(1);
    let magnitude = &spectrum.magnitude()[..half];
    let max_mag = magnitude.iter().copied().fold(0.0f64, f64::max);

    let mut out = String::from("=== FFT Magnitude Spectrum ===\n");
    if max_mag < 1e-10 {
        out.push_str("No significant frequency content detected.\n");
        return Ok(out);
    }

    let resolution = if spectrum.frequency().len() > 1 {
        (spectrum.frequency()[1] - spectrum.frequency()[0]).abs()
    } else {
        0.0
    };
    out.push_str(&format!("Max Magnitude: {max_mag:.6}\n"));
    out.push_str(&format!("Frequency Resolution: {resolution:.2} Hz\n\n"));

    let mut rows = vec![vec![b' '; width]; height];
    for x in 0..width {
        let freq_idx = x * half / width;
        let y = height - 1 - ((height - 1) as f64 * magnitude[freq_idx] / max_mag).round() as usize;
        if y < height {
            rows[y][x] = PLOT_CHAR;
        }
    }

    out.push_str(&rule(max_mag, width));
    out.push_str(&rows_to_string(&rows));
    out.push_str(&rule(0.0, width));

    let nyquist = spectrum.frequency()[half - 1].max(0.0);
    out.push_str(&format!("        0Hz .. {nyquist:.0}Hz\n"));
    Ok(out)
}

/// One-paragraph textual summary of a signal and its statistics.
pub fn signal_summary(signal: &Signal) -> String {
    let stats = signal.stats();
    let mut out = String::from("Signal Information:\n");
    out.push_str(&format!("  Name: {}\n", signal.label()));
    out.push_str(&format!("  Type: {}\n", signal.kind()));
    out.push_str(&format!("  Length: {} samples\n", signal.len()));
    out.push_str(&format!("  Sample Rate: {:.1} Hz\n", signal.sample_rate()));
    out.push_str(&format!("  Duration: {:.3} seconds\n", signal.duration()));
    out.push_str(&format!("  Range: [{:.6}, {:.6}]\n", stats.min, stats.max));
    out.push_str(&format!("  Mean: {:.6}\n", stats.mean));
    out.push_str(&format!("  RMS: {:.6}\n", stats.rms));
    out.push_str(&format!("  Standard Deviation: {:.6}\n", stats.std_dev));
    out
}
