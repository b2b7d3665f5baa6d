//! Trait interfaces for the signal-processing capabilities.
//!
//! Each capability pairs a checked `run_into` entry point (caller-provided
//! output, shape-verified) with an allocating `run_alloc` convenience.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use alloc::vec::Vec;

/// 1D convolution capability.
pub trait Convolve1D<T> {
    /// Run convolution into a caller-provided output buffer.
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Run convolution and allocate output.
    fn run_alloc<I1, I2>(&self, in1: &I1, in2: &I2) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I1: Read1D<T> + ?Sized,
        I2: Read1D<T> + ?Sized;
}

/// Two-sided spectrum analysis capability.
pub trait SpectrumAnalyze1D {
    /// Analysis result bundle.
    type Output;

    /// Run analysis into a caller-provided output bundle.
    fn run_into<I>(&self, input: &I, out: &mut Self::Output) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized;

    /// Run analysis and allocate the output bundle.
    fn run_alloc<I>(&self, input: &I) -> Result<Self::Output, ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized;
}

/// Waveform generation capability.
///
/// Generators know their output length up front (derived from duration and
/// sample rate at construction time), so `run_into` can verify shape.
pub trait WaveGenerate1D<T> {
    /// Number of samples the generator produces.
    fn output_len(&self) -> usize;

    /// Generate the waveform into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Generate the waveform and allocate output.
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}

/// Window coefficient generation capability.
pub trait WindowGenerate1D<T> {
    /// Generate window coefficients into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Generate window coefficients and allocate output.
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}
