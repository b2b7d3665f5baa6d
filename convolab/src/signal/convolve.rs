//! Convolution engine: direct, circular, and spectral algorithms.
//!
//! The buffer layer is [`ConvolveKernel`], a trait-first kernel over any
//! contiguous 1D container; the signal layer wraps it in
//! [`convolve_linear`], [`convolve_circular`], and [`convolve_spectral`],
//! which allocate a fresh [`Signal`] and never touch their inputs.
//!
//! All three methods assume equal sample rates and inherit the first
//! operand's rate; mismatched rates are the caller's responsibility.

use crate::error::Error;
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::fourier;
use crate::signal::traits::Convolve1D;
use crate::signal::Signal;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use num_traits::{NumAssign, Zero};

/// Algorithm selector for [`ConvolveKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolveMethod {
    /// Direct evaluation of the convolution sum. Output length `N + M - 1`,
    /// O(N*M), exact up to rounding.
    Direct,
    /// Periodic (wrap-around) convolution over `max(N, M)` points, the
    /// shorter operand zero-padded. O(L^2).
    Circular,
    /// Linear convolution via zero-padded forward transforms, a pointwise
    /// product, and the inverse transform. Output length `N + M - 1`,
    /// O(F log F) for `F` the next power of two above `N + M - 1`.
    Spectral,
}

/// Constructor config for [`ConvolveKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveConfig {
    /// Which algorithm the kernel runs.
    pub method: ConvolveMethod,
}

/// Trait-first 1D convolution kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveKernel {
    method: ConvolveMethod,
}

impl ConvolveKernel {
    /// Configured algorithm.
    pub fn method(&self) -> ConvolveMethod {
        self.method
    }

    /// Output length for operand lengths `n` and `m`.
    pub fn output_len(&self, n: usize, m: usize) -> usize {
        match self.method {
            ConvolveMethod::Direct | ConvolveMethod::Spectral => n + m - 1,
            ConvolveMethod::Circular => n.max(m),
        }
    }
}

impl KernelLifecycle for ConvolveKernel {
    type Config = ConvolveConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        Ok(Self {
            method: config.method,
        })
    }
}

impl Convolve1D<f64> for ConvolveKernel {
    fn run_into<I1, I2, O>(
        &self,
        in1: &I1,
        in2: &I2,
        out: &mut O,
    ) -> Result<(), ExecInvariantViolation>
    where
        I1: Read1D<f64> + ?Sized,
        I2: Read1D<f64> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        let a = in1.read_slice().map_err(ExecInvariantViolation::from)?;
        let b = in2.read_slice().map_err(ExecInvariantViolation::from)?;
        if a.is_empty() || b.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "convolution inputs must be non-empty",
            });
        }

        let expected = self.output_len(a.len(), b.len());
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

        match self.method {
            ConvolveMethod::Direct => {
                direct_into(a, b, out);
                Ok(())
            }
            ConvolveMethod::Circular => {
                circular_into(a, b, out);
                Ok(())
            }
            ConvolveMethod::Spectral => spectral_into(a, b, out),
        }
    }

    fn run_alloc<I1, I2>(&self, in1: &I1, in2: &I2) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I1: Read1D<f64> + ?Sized,
        I2: Read1D<f64> + ?Sized,
    {
        let a = in1.read_slice().map_err(ExecInvariantViolation::from)?;
        let b = in2.read_slice().map_err(ExecInvariantViolation::from)?;
        if a.is_empty() || b.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "convolution inputs must be non-empty",
            });
        }
        let mut out = vec![0.0; self.output_len(a.len(), b.len())];
        self.run_into(a, b, out.as_mut_slice())?;
        Ok(out)
    }
}

/// Direct convolution sum over the valid intersection of indices.
///
/// The accumulation range `k in [max(0, n-M+1), min(n, N-1)]` keeps both
/// `a[k]` and `b[n-k]` in range, so the inner loop carries no bounds checks.
/// Generic so integer and other float sample types convolve the same way;
/// empty inputs yield an empty output.
pub fn direct<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: NumAssign + Copy,
{
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![T::zero(); a.len() + b.len() - 1];
    direct_into(a, b, &mut out);
    out
}

/// Circular convolution over `max(N, M)` points with both operands
/// conceptually zero-padded to that length.
///
/// Wrap-around indexing is computed relative to `b`, matching the classic
/// textbook form `y[n] = sum_k a[k]*b[(n-k) mod L]`; the asymmetry between
/// operands is intentional and load-bearing for callers. Empty inputs yield
/// an empty output.
pub fn circular<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: NumAssign + Copy,
{
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![T::zero(); a.len().max(b.len())];
    circular_into(a, b, &mut out);
    out
}

fn direct_into<T>(a: &[T], b: &[T], out: &mut [T])
where
    T: NumAssign + Copy,
{
    let n = a.len();
    let m = b.len();
    for (i, y) in out.iter_mut().enumerate() {
        let k_lo = i.saturating_sub(m - 1);
        let k_hi = i.min(n - 1);
        let mut acc = T::zero();
        for k in k_lo..=k_hi {
            acc += a[k] * b[i - k];
        }
        *y = acc;
    }
}

fn circular_into<T>(a: &[T], b: &[T], out: &mut [T])
where
    T: NumAssign + Copy,
{
    let len = out.len();
    for (n, y) in out.iter_mut().enumerate() {
        let mut acc = T::zero();
        for k in 0..len {
            if k >= a.len() {
                continue;
            }
            let h_index = (n + len - k) % len;
            if h_index < b.len() {
                acc += a[k] * b[h_index];
            }
        }
        *y = acc;
    }
}

fn spectral_into(a: &[f64], b: &[f64], out: &mut [f64]) -> Result<(), ExecInvariantViolation> {
    let conv_len = a.len() + b.len() - 1;
    let fft_len = conv_len.next_power_of_two();

    let mut fa = fourier::complex_buffer(a, fft_len);
    let mut fb = fourier::complex_buffer(b, fft_len);
    fourier::fft(&mut fa)?;
    fourier::fft(&mut fb)?;

    for (x, h) in fa.iter_mut().zip(fb.iter()) {
        *x *= *h;
    }
    fourier::ifft(&mut fa)?;

    // Zero-padding past conv_len makes this linear, not circular.
    for (y, v) in out.iter_mut().zip(fa.iter()) {
        *y = v.re;
    }
    Ok(())
}

/// Linear (direct) convolution of two signals.
pub fn convolve_linear(a: &Signal, b: &Signal) -> Result<Signal, Error> {
    convolve_signals(a, b, ConvolveMethod::Direct, "Conv")
}

/// Circular convolution of two signals over `max(N, M)` points.
pub fn convolve_circular(a: &Signal, b: &Signal) -> Result<Signal, Error> {
    convolve_signals(a, b, ConvolveMethod::Circular, "CircConv")
}

/// Linear convolution computed in the frequency domain.
pub fn convolve_spectral(a: &Signal, b: &Signal) -> Result<Signal, Error> {
    convolve_signals(a, b, ConvolveMethod::Spectral, "FftConv")
}

fn convolve_signals(
    a: &Signal,
    b: &Signal,
    method: ConvolveMethod,
    tag: &str,
) -> Result<Signal, Error> {
    let kernel = ConvolveKernel::try_new(ConvolveConfig { method })?;
    let samples = kernel.run_alloc(a.samples(), b.samples())?;
    let mut result = Signal::from_samples(samples, a.sample_rate())?;
    result.set_label(format!("{tag}({} * {})", a.label(), b.label()));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::wave;
    use approx::assert_abs_diff_eq;
    use ndarray::Array1;

    fn kernel(method: ConvolveMethod) -> ConvolveKernel {
        ConvolveKernel::try_new(ConvolveConfig { method }).expect("valid config")
    }

    fn assert_samples_eq(actual: &[f64], expected: &[f64], epsilon: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*a, *e, epsilon = epsilon);
        }
    }

    #[test]
    fn direct_matches_the_hand_derived_expansion() {
        let a = [1.0, 2.0, 1.0, 0.0, 0.0];
        let b = [1.0, 0.5, 0.25];
        let y = kernel(ConvolveMethod::Direct)
            .run_alloc(&a, &b)
            .expect("valid inputs");
        assert_samples_eq(&y, &[1.0, 2.5, 2.25, 1.0, 0.25, 0.0, 0.0], 1e-12);
    }

    #[test]
    fn circular_wraps_the_linear_tail_around() {
        let a = [1.0, 2.0, 1.0, 0.0, 0.0];
        let b = [1.0, 0.5, 0.25];
        let y = kernel(ConvolveMethod::Circular)
            .run_alloc(&a, &b)
            .expect("valid inputs");
        // y[0] = a[0]b[0] + a[1]b[4] + a[2]b[3] + a[3]b[2] + a[4]b[1], with b
        // zero-padded past its 3 samples.
        assert_samples_eq(&y, &[1.0, 2.5, 2.25, 1.0, 0.25], 1e-12);
    }

    #[test]
    fn output_length_laws_hold() {
        let a = vec![1.0; 17];
        let b = vec![1.0; 5];
        assert_eq!(
            kernel(ConvolveMethod::Direct)
                .run_alloc(&a, &b)
                .expect("valid inputs")
                .len(),
            21
        );
        assert_eq!(
            kernel(ConvolveMethod::Spectral)
                .run_alloc(&a, &b)
                .expect("valid inputs")
                .len(),
            21
        );
        assert_eq!(
            kernel(ConvolveMethod::Circular)
                .run_alloc(&a, &b)
                .expect("valid inputs")
                .len(),
            17
        );
    }

    #[test]
    fn spectral_equals_direct_within_float_accumulation() {
        let a: Vec<f64> = (0..100)
            .map(|i| (i as f64 / 9.0).sin() + 0.3 * (i as f64 / 2.7).cos())
            .collect();
        let b: Vec<f64> = (0..37)
            .map(|i| {
                let x = (i as f64 - 18.0) / 6.0;
                (-x * x / 2.0).exp()
            })
            .collect();
        let direct = kernel(ConvolveMethod::Direct)
            .run_alloc(&a, &b)
            .expect("valid inputs");
        let spectral = kernel(ConvolveMethod::Spectral)
            .run_alloc(&a, &b)
            .expect("valid inputs");
        let max_err = direct
            .iter()
            .zip(spectral.iter())
            .map(|(d, s)| (d - s).abs())
            .fold(0.0f64, f64::max);
        assert!(max_err < 1e-9, "max error {max_err} exceeds 1e-9");
    }

    #[test]
    fn unit_impulse_is_the_identity() {
        let x: Vec<f64> = (0..24).map(|i| (i as f64 * 0.37).sin()).collect();
        let delta = [1.0];
        for method in [ConvolveMethod::Direct, ConvolveMethod::Spectral] {
            let y = kernel(method).run_alloc(&x, &delta).expect("valid inputs");
            assert_samples_eq(&y, &x, 1e-9);
        }
    }

    #[test]
    fn direct_convolution_commutes() {
        let a = [0.5, -1.0, 2.0, 0.25];
        let b = [1.0, 3.0, -0.5, 0.0, 1.5, 2.0];
        let ab = kernel(ConvolveMethod::Direct)
            .run_alloc(&a, &b)
            .expect("valid inputs");
        let ba = kernel(ConvolveMethod::Direct)
            .run_alloc(&b, &a)
            .expect("valid inputs");
        assert_samples_eq(&ab, &ba, 1e-12);
    }

    #[test]
    fn single_sample_inputs_square_the_sample() {
        let x = [3.0];
        for method in [
            ConvolveMethod::Direct,
            ConvolveMethod::Circular,
            ConvolveMethod::Spectral,
        ] {
            let y = kernel(method).run_alloc(&x, &x).expect("valid inputs");
            assert_eq!(y.len(), 1);
            assert_abs_diff_eq!(y[0], 9.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn empty_inputs_are_rejected_without_partial_output() {
        let empty: Vec<f64> = Vec::new();
        let x = [1.0, 2.0];
        for method in [
            ConvolveMethod::Direct,
            ConvolveMethod::Circular,
            ConvolveMethod::Spectral,
        ] {
            let err = kernel(method)
                .run_alloc(&empty, &x)
                .expect_err("empty input must fail");
            assert!(matches!(err, ExecInvariantViolation::InvalidState { .. }));
        }
    }

    #[test]
    fn run_into_validates_the_output_shape() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 1.0];
        let mut out = vec![0.0; 3];
        let err = kernel(ConvolveMethod::Direct)
            .run_into(&a, &b, out.as_mut_slice())
            .expect_err("short output must fail");
        assert!(matches!(
            err,
            ExecInvariantViolation::LengthMismatch {
                expected: 4,
                got: 3,
                ..
            }
        ));
    }

    #[test]
    fn ndarray_inputs_convolve_through_the_adapters() {
        let a = Array1::from(vec![1.0, 2.0, 1.0]);
        let b = Array1::from(vec![1.0, 1.0]);
        let y = kernel(ConvolveMethod::Direct)
            .run_alloc(&a, &b)
            .expect("valid inputs");
        assert_samples_eq(&y, &[1.0, 3.0, 3.0, 1.0], 1e-12);
    }

    #[test]
    fn generic_direct_helper_convolves_integers() {
        let y = direct(&[1i64, 2, 3], &[0, 1]);
        assert_eq!(y, vec![0, 1, 2, 3]);
    }

    #[test]
    fn generic_circular_helper_matches_the_kernel() {
        let a = [1.0, 2.0, 1.0, 0.0, 0.0];
        let b = [1.0, 0.5, 0.25];
        let helper = circular(&a, &b);
        let kern = kernel(ConvolveMethod::Circular)
            .run_alloc(&a, &b)
            .expect("valid inputs");
        assert_samples_eq(&helper, &kern, 1e-12);
    }

    #[test]
    fn signal_layer_inherits_rate_kind_and_label() {
        let mut a = wave::sine_wave(5.0, 1.0, 0.0, 0.05, 1000.0).expect("valid generator");
        a.set_label("x");
        let mut b = wave::impulse(1.0, 0.0, 0.01, 1000.0).expect("valid generator");
        b.set_label("h");

        let y = convolve_linear(&a, &b).expect("valid inputs");
        assert_eq!(y.len(), a.len() + b.len() - 1);
        assert_abs_diff_eq!(y.sample_rate(), 1000.0, epsilon = 1e-12);
        assert_eq!(y.kind(), crate::signal::SignalKind::Custom);
        assert_eq!(y.label(), "Conv(x * h)");

        let y = convolve_circular(&a, &b).expect("valid inputs");
        assert_eq!(y.len(), a.len().max(b.len()));
        assert_eq!(y.label(), "CircConv(x * h)");

        let y = convolve_spectral(&a, &b).expect("valid inputs");
        assert_eq!(y.len(), a.len() + b.len() - 1);
        assert_eq!(y.label(), "FftConv(x * h)");
    }
}
