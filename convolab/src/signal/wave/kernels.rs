//! Trait-first waveform generation kernels.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Write1D};
use crate::signal::traits::WaveGenerate1D;
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::TAU;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Derive the sample count for a `duration`-second waveform at `sample_rate`,
/// rejecting time bases that produce no samples.
fn timebase_len(duration: f64, sample_rate: f64) -> Result<usize, ConfigError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(ConfigError::InvalidArgument {
            arg: "sample_rate",
            reason: "sample rate must be finite and > 0",
        });
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ConfigError::InvalidArgument {
            arg: "duration",
            reason: "duration must be finite and > 0",
        });
    }
    let len = (duration * sample_rate) as usize;
    if len == 0 {
        return Err(ConfigError::InvalidArgument {
            arg: "duration",
            reason: "duration and sample rate must produce at least one sample",
        });
    }
    Ok(len)
}

fn write_generated<K, O>(kernel: &K, out: &mut O) -> Result<(), ExecInvariantViolation>
where
    K: WaveGenerate1D<f64> + GenerateInto,
    O: Write1D<f64> + ?Sized,
{
    let expected = kernel.output_len();
    let out = out
        .write_slice_mut()
        .map_err(ExecInvariantViolation::from)?;
    if out.len() != expected {
        return Err(ExecInvariantViolation::LengthMismatch {
            arg: "out",
            expected,
            got: out.len(),
        });
    }
    kernel.generate_into(out);
    Ok(())
}

/// Internal fill primitive shared by the generator kernels.
trait GenerateInto {
    fn generate_into(&self, out: &mut [f64]);
}

macro_rules! impl_wave_generate {
    ($kernel:ty) => {
        impl WaveGenerate1D<f64> for $kernel {
            fn output_len(&self) -> usize {
                self.len
            }

            fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
            where
                O: Write1D<f64> + ?Sized,
            {
                write_generated(self, out)
            }

            fn run_alloc(&self) -> Result<Vec<f64>, ExecInvariantViolation> {
                let mut out = vec![0.0; self.len];
                self.run_into(out.as_mut_slice())?;
                Ok(out)
            }
        }
    };
}

/// Constructor config for [`SineWaveKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineWaveConfig {
    /// Oscillation frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude.
    pub amplitude: f64,
    /// Phase offset in radians.
    pub phase: f64,
    /// Waveform duration in seconds.
    pub duration: f64,
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
}

/// `A * sin(2*pi*f*t + phi)` generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineWaveKernel {
    frequency: f64,
    amplitude: f64,
    phase: f64,
    sample_rate: f64,
    len: usize,
}

impl KernelLifecycle for SineWaveKernel {
    type Config = SineWaveConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let len = timebase_len(config.duration, config.sample_rate)?;
        Ok(Self {
            frequency: config.frequency,
            amplitude: config.amplitude,
            phase: config.phase,
            sample_rate: config.sample_rate,
            len,
        })
    }
}

impl GenerateInto for SineWaveKernel {
    fn generate_into(&self, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            let t = i as f64 / self.sample_rate;
            *v = self.amplitude * (TAU * self.frequency * t + self.phase).sin();
        }
    }
}

impl_wave_generate!(SineWaveKernel);

/// Constructor config for [`SquareWaveKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareWaveConfig {
    /// Oscillation frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude.
    pub amplitude: f64,
    /// Waveform duration in seconds.
    pub duration: f64,
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
}

/// Bipolar square wave generator: the sign of the underlying sine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareWaveKernel {
    frequency: f64,
    amplitude: f64,
    sample_rate: f64,
    len: usize,
}

impl KernelLifecycle for SquareWaveKernel {
    type Config = SquareWaveConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let len = timebase_len(config.duration, config.sample_rate)?;
        Ok(Self {
            frequency: config.frequency,
            amplitude: config.amplitude,
            sample_rate: config.sample_rate,
            len,
        })
    }
}

impl GenerateInto for SquareWaveKernel {
    fn generate_into(&self, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            let t = i as f64 / self.sample_rate;
            let sine = (TAU * self.frequency * t).sin();
            *v = if sine >= 0.0 {
                self.amplitude
            } else {
                -self.amplitude
            };
        }
    }
}

impl_wave_generate!(SquareWaveKernel);

/// Constructor config for [`TriangleWaveKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleWaveConfig {
    /// Oscillation frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude.
    pub amplitude: f64,
    /// Waveform duration in seconds.
    pub duration: f64,
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
}

/// Triangle wave generator, piecewise linear over each period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleWaveKernel {
    frequency: f64,
    amplitude: f64,
    sample_rate: f64,
    len: usize,
}

impl KernelLifecycle for TriangleWaveKernel {
    type Config = TriangleWaveConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let len = timebase_len(config.duration, config.sample_rate)?;
        Ok(Self {
            frequency: config.frequency,
            amplitude: config.amplitude,
            sample_rate: config.sample_rate,
            len,
        })
    }
}

impl GenerateInto for TriangleWaveKernel {
    fn generate_into(&self, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            let t = i as f64 / self.sample_rate;
            let phase = (t * self.frequency).fract();
            *v = if phase < 0.5 {
                self.amplitude * (4.0 * phase - 1.0)
            } else {
                self.amplitude * (3.0 - 4.0 * phase)
            };
        }
    }
}

impl_wave_generate!(TriangleWaveKernel);

/// Constructor config for [`SawtoothWaveKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SawtoothWaveConfig {
    /// Oscillation frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude.
    pub amplitude: f64,
    /// Waveform duration in seconds.
    pub duration: f64,
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
}

/// Rising sawtooth generator, `-A` to `A` over each period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SawtoothWaveKernel {
    frequency: f64,
    amplitude: f64,
    sample_rate: f64,
    len: usize,
}

impl KernelLifecycle for SawtoothWaveKernel {
    type Config = SawtoothWaveConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let len = timebase_len(config.duration, config.sample_rate)?;
        Ok(Self {
            frequency: config.frequency,
            amplitude: config.amplitude,
            sample_rate: config.sample_rate,
            len,
        })
    }
}

impl GenerateInto for SawtoothWaveKernel {
    fn generate_into(&self, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            let t = i as f64 / self.sample_rate;
            let phase = (t * self.frequency).fract();
            *v = self.amplitude * (2.0 * phase - 1.0);
        }
    }
}

impl_wave_generate!(SawtoothWaveKernel);

/// Uniform white-noise generator over `[-A, A]`.
///
/// The randomness source is an explicitly seeded [`SmallRng`] owned by the
/// kernel config, so noise signals are reproducible in tests and demos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseKernel {
    amplitude: f64,
    seed: u64,
    len: usize,
}

/// Full constructor config for [`NoiseKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseWaveConfig {
    /// Peak amplitude.
    pub amplitude: f64,
    /// Waveform duration in seconds.
    pub duration: f64,
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
    /// Seed for the generator; equal seeds reproduce equal waveforms.
    pub seed: u64,
}

impl KernelLifecycle for NoiseKernel {
    type Config = NoiseWaveConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let len = timebase_len(config.duration, config.sample_rate)?;
        Ok(Self {
            amplitude: config.amplitude,
            seed: config.seed,
            len,
        })
    }
}

impl GenerateInto for NoiseKernel {
    fn generate_into(&self, out: &mut [f64]) {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for v in out.iter_mut() {
            *v = self.amplitude * rng.random_range(-1.0..=1.0);
        }
    }
}

impl_wave_generate!(NoiseKernel);

/// Constructor config for [`ImpulseKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseConfig {
    /// Impulse height.
    pub amplitude: f64,
    /// Impulse position in seconds from the start.
    pub delay: f64,
    /// Waveform duration in seconds.
    pub duration: f64,
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
}

/// Single-sample impulse generator.
///
/// A delay that lands past the end of the waveform yields all zeros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseKernel {
    amplitude: f64,
    delay_samples: usize,
    len: usize,
}

impl KernelLifecycle for ImpulseKernel {
    type Config = ImpulseConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let len = timebase_len(config.duration, config.sample_rate)?;
        if !config.delay.is_finite() || config.delay < 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "delay",
                reason: "delay must be finite and non-negative",
            });
        }
        Ok(Self {
            amplitude: config.amplitude,
            delay_samples: (config.delay * config.sample_rate) as usize,
            len,
        })
    }
}

impl GenerateInto for ImpulseKernel {
    fn generate_into(&self, out: &mut [f64]) {
        out.fill(0.0);
        if self.delay_samples < out.len() {
            out[self.delay_samples] = self.amplitude;
        }
    }
}

impl_wave_generate!(ImpulseKernel);

/// Constructor config for [`GaussPulseKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussPulseConfig {
    /// Peak amplitude.
    pub amplitude: f64,
    /// Pulse width parameter in seconds; must be > 0.
    pub sigma: f64,
    /// Pulse center in seconds from the start.
    pub center: f64,
    /// Waveform duration in seconds.
    pub duration: f64,
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
}

/// Gaussian pulse generator, `A * exp(-(t-c)^2 / (2*sigma^2))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussPulseKernel {
    amplitude: f64,
    sigma: f64,
    center_sample: i64,
    sample_rate: f64,
    len: usize,
}

impl KernelLifecycle for GaussPulseKernel {
    type Config = GaussPulseConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let len = timebase_len(config.duration, config.sample_rate)?;
        if !config.sigma.is_finite() || config.sigma <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "sigma",
                reason: "sigma must be finite and > 0",
            });
        }
        if !config.center.is_finite() {
            return Err(ConfigError::InvalidArgument {
                arg: "center",
                reason: "center must be finite",
            });
        }
        Ok(Self {
            amplitude: config.amplitude,
            sigma: config.sigma,
            center_sample: (config.center * config.sample_rate) as i64,
            sample_rate: config.sample_rate,
            len,
        })
    }
}

impl GenerateInto for GaussPulseKernel {
    fn generate_into(&self, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            let t = (i as i64 - self.center_sample) as f64 / self.sample_rate;
            let exponent = -(t * t) / (2.0 * self.sigma * self.sigma);
            *v = self.amplitude * exponent.exp();
        }
    }
}

impl_wave_generate!(GaussPulseKernel);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn timebase_validation_rejects_degenerate_configs() {
        assert!(SineWaveKernel::try_new(SineWaveConfig {
            frequency: 5.0,
            amplitude: 1.0,
            phase: 0.0,
            duration: 0.0,
            sample_rate: 1000.0,
        })
        .is_err());
        assert!(SineWaveKernel::try_new(SineWaveConfig {
            frequency: 5.0,
            amplitude: 1.0,
            phase: 0.0,
            duration: 1.0,
            sample_rate: -1.0,
        })
        .is_err());
        // Sub-sample duration rounds down to zero samples.
        assert!(SineWaveKernel::try_new(SineWaveConfig {
            frequency: 5.0,
            amplitude: 1.0,
            phase: 0.0,
            duration: 0.0001,
            sample_rate: 100.0,
        })
        .is_err());
    }

    #[test]
    fn sine_hits_known_sample_points() {
        // 1 Hz at 4 Hz sampling: 0, A, 0, -A.
        let kernel = SineWaveKernel::try_new(SineWaveConfig {
            frequency: 1.0,
            amplitude: 2.0,
            phase: 0.0,
            duration: 1.0,
            sample_rate: 4.0,
        })
        .expect("valid config");
        let samples = kernel.run_alloc().expect("generation succeeds");
        assert_eq!(samples.len(), 4);
        assert_abs_diff_eq!(samples[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(samples[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(samples[2], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(samples[3], -2.0, epsilon = 1e-9);
    }

    #[test]
    fn square_wave_is_bipolar_at_the_configured_amplitude() {
        let kernel = SquareWaveKernel::try_new(SquareWaveConfig {
            frequency: 10.0,
            amplitude: 0.5,
            duration: 0.5,
            sample_rate: 1000.0,
        })
        .expect("valid config");
        let samples = kernel.run_alloc().expect("generation succeeds");
        assert!(samples.iter().all(|v| *v == 0.5 || *v == -0.5));
        assert!(samples.iter().any(|v| *v == 0.5));
        assert!(samples.iter().any(|v| *v == -0.5));
    }

    #[test]
    fn triangle_and_sawtooth_stay_within_amplitude_bounds() {
        let tri = TriangleWaveKernel::try_new(TriangleWaveConfig {
            frequency: 7.0,
            amplitude: 1.5,
            duration: 1.0,
            sample_rate: 500.0,
        })
        .expect("valid config")
        .run_alloc()
        .expect("generation succeeds");
        assert!(tri.iter().all(|v| v.abs() <= 1.5 + 1e-12));

        let saw = SawtoothWaveKernel::try_new(SawtoothWaveConfig {
            frequency: 7.0,
            amplitude: 1.5,
            duration: 1.0,
            sample_rate: 500.0,
        })
        .expect("valid config")
        .run_alloc()
        .expect("generation succeeds");
        assert!(saw.iter().all(|v| v.abs() <= 1.5 + 1e-12));
        // Sawtooth starts each period at the bottom of its ramp.
        assert_abs_diff_eq!(saw[0], -1.5, epsilon = 1e-12);
    }

    #[test]
    fn noise_is_deterministic_per_seed_and_bounded() {
        let config = NoiseWaveConfig {
            amplitude: 0.25,
            duration: 0.1,
            sample_rate: 1000.0,
            seed: 42,
        };
        let first = NoiseKernel::try_new(config)
            .expect("valid config")
            .run_alloc()
            .expect("generation succeeds");
        let second = NoiseKernel::try_new(config)
            .expect("valid config")
            .run_alloc()
            .expect("generation succeeds");
        assert_eq!(first, second);
        assert!(first.iter().all(|v| v.abs() <= 0.25));

        let other = NoiseKernel::try_new(NoiseWaveConfig { seed: 43, ..config })
            .expect("valid config")
            .run_alloc()
            .expect("generation succeeds");
        assert_ne!(first, other);
    }

    #[test]
    fn impulse_lands_at_the_configured_delay() {
        let kernel = ImpulseKernel::try_new(ImpulseConfig {
            amplitude: 3.0,
            delay: 0.005,
            duration: 0.01,
            sample_rate: 1000.0,
        })
        .expect("valid config");
        let samples = kernel.run_alloc().expect("generation succeeds");
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[5], 3.0);
        assert_eq!(samples.iter().filter(|v| **v != 0.0).count(), 1);
    }

    #[test]
    fn impulse_past_the_end_yields_silence() {
        let kernel = ImpulseKernel::try_new(ImpulseConfig {
            amplitude: 3.0,
            delay: 1.0,
            duration: 0.01,
            sample_rate: 1000.0,
        })
        .expect("valid config");
        let samples = kernel.run_alloc().expect("generation succeeds");
        assert!(samples.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn gaussian_pulse_peaks_at_its_center() {
        let kernel = GaussPulseKernel::try_new(GaussPulseConfig {
            amplitude: 2.0,
            sigma: 0.01,
            center: 0.05,
            duration: 0.1,
            sample_rate: 1000.0,
        })
        .expect("valid config");
        let samples = kernel.run_alloc().expect("generation succeeds");
        assert_eq!(samples.len(), 100);
        assert_abs_diff_eq!(samples[50], 2.0, epsilon = 1e-12);
        assert!(samples.iter().all(|v| *v <= 2.0));
        // Symmetric falloff around the center.
        assert_abs_diff_eq!(samples[45], samples[55], epsilon = 1e-12);
    }

    #[test]
    fn run_into_checks_the_output_length() {
        let kernel = SineWaveKernel::try_new(SineWaveConfig {
            frequency: 1.0,
            amplitude: 1.0,
            phase: 0.0,
            duration: 1.0,
            sample_rate: 8.0,
        })
        .expect("valid config");
        let mut short = vec![0.0; 4];
        let err = kernel
            .run_into(short.as_mut_slice())
            .expect_err("short buffer must fail");
        assert!(matches!(
            err,
            ExecInvariantViolation::LengthMismatch {
                expected: 8,
                got: 4,
                ..
            }
        ));
    }
}
