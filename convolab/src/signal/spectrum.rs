//! Two-sided spectrum analysis built on the radix-2 transform.

use crate::error::Error;
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use crate::signal::fourier;
use crate::signal::traits::SpectrumAnalyze1D;
use crate::signal::Signal;
use alloc::vec::Vec;
use num_complex::Complex;

/// Frequency-domain view of a signal.
///
/// Four parallel sequences of equal power-of-two length: complex bins,
/// magnitudes, phases in `(-pi, pi]`, and signed bin frequencies in Hz.
/// Bins past the Nyquist index carry the aliased negative frequencies.
/// Produced only by [`SpectrumKernel`] / [`analyze_spectrum`]; read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    bins: Vec<Complex<f64>>,
    magnitude: Vec<f64>,
    phase: Vec<f64>,
    frequency: Vec<f64>,
}

impl Spectrum {
    /// Number of frequency bins (a power of two).
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the spectrum holds no bins (only true for `Default`).
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Complex frequency-domain samples.
    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    /// Magnitude per bin, `sqrt(re^2 + im^2)`.
    pub fn magnitude(&self) -> &[f64] {
        &self.magnitude
    }

    /// Phase per bin in radians, `atan2(im, re)`.
    pub fn phase(&self) -> &[f64] {
        &self.phase
    }

    /// Signed bin frequency in Hz; the upper half is negative.
    pub fn frequency(&self) -> &[f64] {
        &self.frequency
    }
}

/// Constructor config for [`SpectrumKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumConfig {
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
}

/// Trait-first spectrum analysis kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumKernel {
    sample_rate: f64,
}

impl KernelLifecycle for SpectrumKernel {
    type Config = SpectrumConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !config.sample_rate.is_finite() || config.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "sample_rate",
                reason: "sample rate must be finite and > 0",
            });
        }
        Ok(Self {
            sample_rate: config.sample_rate,
        })
    }
}

impl SpectrumAnalyze1D for SpectrumKernel {
    type Output = Spectrum;

    fn run_into<I>(&self, input: &I, out: &mut Self::Output) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
    {
        *out = self.run_alloc(input)?;
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Self::Output, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        if input.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "spectrum input must be non-empty",
            });
        }

        let fft_len = input.len().next_power_of_two();
        let mut bins = fourier::complex_buffer(input, fft_len);
        fourier::fft(&mut bins)?;

        let resolution = self.sample_rate / fft_len as f64;
        let magnitude = bins.iter().map(|c| c.norm()).collect();
        let phase = bins.iter().map(|c| c.arg()).collect();
        let frequency = (0..fft_len)
            .map(|i| {
                if i <= fft_len / 2 {
                    i as f64 * resolution
                } else {
                    (i as f64 - fft_len as f64) * resolution
                }
            })
            .collect();

        Ok(Spectrum {
            bins,
            magnitude,
            phase,
            frequency,
        })
    }
}

/// Two-sided spectrum of a signal, zero-padded to the next power of two.
pub fn analyze_spectrum(signal: &Signal) -> Result<Spectrum, Error> {
    let kernel = SpectrumKernel::try_new(SpectrumConfig {
        sample_rate: signal.sample_rate(),
    })?;
    Ok(kernel.run_alloc(signal.samples())?)
}
