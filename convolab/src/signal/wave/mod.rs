//! Signal generators.
//!
//! Each generator pairs a validated kernel with a free function that wraps
//! the generated samples in a labeled [`Signal`]. The kernels write into any
//! [`crate::kernel::Write1D`] buffer; the free functions are the common path
//! for demos and tests.

use crate::error::Error;
use crate::kernel::KernelLifecycle;
use crate::signal::traits::WaveGenerate1D;
use crate::signal::{Signal, SignalKind};
use alloc::format;

mod kernels;
pub use kernels::*;

fn into_signal(
    samples: alloc::vec::Vec<f64>,
    sample_rate: f64,
    kind: SignalKind,
    label: alloc::string::String,
) -> Result<Signal, Error> {
    let mut signal = Signal::from_samples(samples, sample_rate)?;
    signal.set_kind(kind);
    signal.set_label(label);
    Ok(signal)
}

/// Generate `A * sin(2*pi*f*t + phi)` for `duration` seconds.
pub fn sine_wave(
    frequency: f64,
    amplitude: f64,
    phase: f64,
    duration: f64,
    sample_rate: f64,
) -> Result<Signal, Error> {
    let kernel = SineWaveKernel::try_new(SineWaveConfig {
        frequency,
        amplitude,
        phase,
        duration,
        sample_rate,
    })?;
    into_signal(
        kernel.run_alloc()?,
        sample_rate,
        SignalKind::Sine,
        format!("Sine Wave ({frequency:.1}Hz, {amplitude:.2}A)"),
    )
}

/// Generate a bipolar square wave for `duration` seconds.
pub fn square_wave(
    frequency: f64,
    amplitude: f64,
    duration: f64,
    sample_rate: f64,
) -> Result<Signal, Error> {
    let kernel = SquareWaveKernel::try_new(SquareWaveConfig {
        frequency,
        amplitude,
        duration,
        sample_rate,
    })?;
    into_signal(
        kernel.run_alloc()?,
        sample_rate,
        SignalKind::Square,
        format!("Square Wave ({frequency:.1}Hz, {amplitude:.2}A)"),
    )
}

/// Generate a triangle wave for `duration` seconds.
pub fn triangle_wave(
    frequency: f64,
    amplitude: f64,
    duration: f64,
    sample_rate: f64,
) -> Result<Signal, Error> {
    let kernel = TriangleWaveKernel::try_new(TriangleWaveConfig {
        frequency,
        amplitude,
        duration,
        sample_rate,
    })?;
    into_signal(
        kernel.run_alloc()?,
        sample_rate,
        SignalKind::Triangle,
        format!("Triangle Wave ({frequency:.1}Hz, {amplitude:.2}A)"),
    )
}

/// Generate a rising sawtooth wave for `duration` seconds.
pub fn sawtooth_wave(
    frequency: f64,
    amplitude: f64,
    duration: f64,
    sample_rate: f64,
) -> Result<Signal, Error> {
    let kernel = SawtoothWaveKernel::try_new(SawtoothWaveConfig {
        frequency,
        amplitude,
        duration,
        sample_rate,
    })?;
    into_signal(
        kernel.run_alloc()?,
        sample_rate,
        SignalKind::Sawtooth,
        format!("Sawtooth Wave ({frequency:.1}Hz, {amplitude:.2}A)"),
    )
}

/// Generate uniform white noise in `[-A, A]` from an explicit seed.
pub fn white_noise(
    amplitude: f64,
    duration: f64,
    sample_rate: f64,
    seed: u64,
) -> Result<Signal, Error> {
    let kernel = NoiseKernel::try_new(NoiseWaveConfig {
        amplitude,
        duration,
        sample_rate,
        seed,
    })?;
    into_signal(
        kernel.run_alloc()?,
        sample_rate,
        SignalKind::Noise,
        format!("White Noise ({amplitude:.2}A)"),
    )
}

/// Generate a single-sample impulse `delay` seconds into the waveform.
pub fn impulse(
    amplitude: f64,
    delay: f64,
    duration: f64,
    sample_rate: f64,
) -> Result<Signal, Error> {
    let kernel = ImpulseKernel::try_new(ImpulseConfig {
        amplitude,
        delay,
        duration,
        sample_rate,
    })?;
    into_signal(
        kernel.run_alloc()?,
        sample_rate,
        SignalKind::Impulse,
        format!("Impulse ({amplitude:.2}A, {delay:.3}s delay)"),
    )
}

/// Generate a Gaussian pulse centered `center` seconds into the waveform.
pub fn gaussian_pulse(
    amplitude: f64,
    sigma: f64,
    center: f64,
    duration: f64,
    sample_rate: f64,
) -> Result<Signal, Error> {
    let kernel = GaussPulseKernel::try_new(GaussPulseConfig {
        amplitude,
        sigma,
        center,
        duration,
        sample_rate,
    })?;
    into_signal(
        kernel.run_alloc()?,
        sample_rate,
        SignalKind::Gaussian,
        format!("Gaussian Pulse (sigma={sigma:.3}, center={center:.3}s)"),
    )
}
