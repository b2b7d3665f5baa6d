//! Signal container and the signal-processing modules built around it.
//!
//! A [`Signal`] is a fixed-length sequence of `f64` samples with an associated
//! sample rate. Every operation in [`convolve`] and [`spectrum`] allocates a
//! fresh output Signal and leaves its inputs untouched; the only in-place
//! mutators are [`Signal::normalize`] and the generators in [`wave`], which
//! are documented as such.

use crate::error::Error;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use itertools::Itertools;

pub mod convolve;
pub mod fourier;
pub mod spectrum;
pub mod traits;
pub mod wave;
pub mod windows;

pub use convolve::{convolve_circular, convolve_linear, convolve_spectral};
pub use spectrum::analyze_spectrum;
pub use windows::window_signal;

/// Display labels are capped at this many characters; longer labels truncate.
pub const MAX_LABEL_LEN: usize = 64;

/// Closed set of signal kinds a [`Signal`] can be tagged with.
///
/// Derived signals (convolution outputs, loaded files) are tagged [`Custom`].
///
/// [`Custom`]: SignalKind::Custom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Pure sinusoid.
    Sine,
    /// Bipolar square wave.
    Square,
    /// Triangle wave.
    Triangle,
    /// Sawtooth wave.
    Sawtooth,
    /// Uniform white noise.
    Noise,
    /// Single-sample impulse.
    Impulse,
    /// Gaussian pulse.
    Gaussian,
    /// Anything else.
    Custom,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalKind::Sine => "Sine Wave",
            SignalKind::Square => "Square Wave",
            SignalKind::Triangle => "Triangle Wave",
            SignalKind::Sawtooth => "Sawtooth Wave",
            SignalKind::Noise => "White Noise",
            SignalKind::Impulse => "Impulse",
            SignalKind::Gaussian => "Gaussian Pulse",
            SignalKind::Custom => "Custom Signal",
        };
        f.write_str(name)
    }
}

/// Basic amplitude statistics of a [`Signal`], computed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalStats {
    /// Smallest sample value.
    pub min: f64,
    /// Largest sample value.
    pub max: f64,
    /// Arithmetic mean (DC offset).
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Root mean square.
    pub rms: f64,
    /// `max - min`.
    pub peak_to_peak: f64,
}

/// Fixed-length sequence of real samples with an associated sample rate.
///
/// Sample storage is exclusively owned; no two Signals alias the same buffer.
/// Duration is always derived from `len / sample_rate` and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: f64,
    kind: SignalKind,
    label: String,
}

impl Signal {
    /// Create a zero-filled signal of `len` samples at `sample_rate` Hz.
    pub fn zeros(len: usize, sample_rate: f64) -> Result<Self, Error> {
        Self::from_samples(vec![0.0; len], sample_rate)
    }

    /// Wrap an owned sample buffer.
    ///
    /// Fails when the buffer is empty or the sample rate is not finite and
    /// positive.
    pub fn from_samples(samples: Vec<f64>, sample_rate: f64) -> Result<Self, Error> {
        if samples.is_empty() {
            return Err(Error::InvalidArg {
                arg: "samples".to_string(),
                reason: "a signal must hold at least one sample".to_string(),
            });
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidArg {
                arg: "sample_rate".to_string(),
                reason: "sample rate must be finite and > 0".to_string(),
            });
        }
        Ok(Self {
            samples,
            sample_rate,
            kind: SignalKind::Custom,
            label: String::from("Untitled Signal"),
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal holds no samples. Always `false` for a constructed
    /// Signal; present for the conventional `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the sample sequence.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Mutably borrow the sample sequence.
    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Duration in seconds, derived as `len / sample_rate`.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Kind tag.
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Replace the kind tag.
    pub fn set_kind(&mut self, kind: SignalKind) {
        self.kind = kind;
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the display label, truncating to [`MAX_LABEL_LEN`] characters.
    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        if label.chars().count() <= MAX_LABEL_LEN {
            self.label = label;
        } else {
            self.label = label.chars().take(MAX_LABEL_LEN).collect();
        }
    }

    /// Rescale samples in place onto `[-1, 1]`.
    ///
    /// Signals with a value range below `1e-10` are left untouched to avoid
    /// amplifying what is numerically a constant.
    pub fn normalize(&mut self) {
        let Some((min, max)) = minmax(&self.samples) else {
            return;
        };
        let range = max - min;
        if range < 1e-10 {
            return;
        }
        for v in &mut self.samples {
            *v = 2.0 * (*v - min) / range - 1.0;
        }
    }

    /// Compute amplitude statistics over the sample sequence.
    pub fn stats(&self) -> SignalStats {
        let n = self.samples.len() as f64;
        let (min, max) = minmax(&self.samples).unwrap_or((0.0, 0.0));
        let mean = self.samples.iter().sum::<f64>() / n;
        let sum_sq = self.samples.iter().map(|v| v * v).sum::<f64>();
        let variance = self
            .samples
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        SignalStats {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            rms: (sum_sq / n).sqrt(),
            peak_to_peak: max - min,
        }
    }
}

fn minmax(samples: &[f64]) -> Option<(f64, f64)> {
    samples
        .iter()
        .copied()
        .minmax_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .into_option()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zeros_factory_fills_storage_and_derives_duration() {
        let signal = Signal::zeros(250, 1000.0).expect("valid signal");
        assert_eq!(signal.len(), 250);
        assert!(signal.samples().iter().all(|v| *v == 0.0));
        assert_abs_diff_eq!(signal.duration(), 0.25, epsilon = 1e-12);
        assert_eq!(signal.kind(), SignalKind::Custom);
        assert_eq!(signal.label(), "Untitled Signal");
    }

    #[test]
    fn degenerate_construction_is_rejected() {
        assert!(Signal::zeros(0, 1000.0).is_err());
        assert!(Signal::zeros(8, 0.0).is_err());
        assert!(Signal::zeros(8, -44100.0).is_err());
        assert!(Signal::zeros(8, f64::NAN).is_err());
        assert!(Signal::from_samples(Vec::new(), 8000.0).is_err());
    }

    #[test]
    fn labels_truncate_at_the_display_bound() {
        let mut signal = Signal::zeros(1, 1.0).expect("valid signal");
        signal.set_label("x".repeat(MAX_LABEL_LEN + 20));
        assert_eq!(signal.label().chars().count(), MAX_LABEL_LEN);

        signal.set_label("short");
        assert_eq!(signal.label(), "short");
    }

    #[test]
    fn normalize_maps_onto_unit_range() {
        let mut signal = Signal::from_samples(vec![0.0, 5.0, 10.0], 10.0).expect("valid signal");
        signal.normalize();
        assert_eq!(signal.samples(), &[-1.0, 0.0, 1.0]);
    }

    #[test]
    fn normalize_leaves_constant_signals_untouched() {
        let mut signal = Signal::from_samples(vec![3.0; 16], 10.0).expect("valid signal");
        signal.normalize();
        assert!(signal.samples().iter().all(|v| *v == 3.0));
    }

    #[test]
    fn stats_match_hand_computed_values() {
        let signal = Signal::from_samples(vec![1.0, -1.0, 1.0, -1.0], 4.0).expect("valid signal");
        let stats = signal.stats();
        assert_abs_diff_eq!(stats.mean, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.rms, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.std_dev, 1.0, epsilon = 1e-12);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.peak_to_peak, 2.0);
    }
}
