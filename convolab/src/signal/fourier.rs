//! Recursive radix-2 Fourier transform over complex sample buffers.
//!
//! This is the numeric heart of the spectral convolution path and of
//! [`super::spectrum`]. Both entry points mutate their argument in place and
//! require a power-of-two length; callers are responsible for zero-padding
//! (the convolution engine and the spectrum kernel always do). A
//! non-power-of-two length reaching this module is a caller bug surfaced as
//! [`ExecInvariantViolation::InvalidState`], never a panic.

use crate::kernel::ExecInvariantViolation;
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;
use num_complex::Complex;

/// In-place forward transform of a power-of-two-length buffer.
pub fn fft(data: &mut [Complex<f64>]) -> Result<(), ExecInvariantViolation> {
    ensure_radix2_len(data.len())?;
    radix2(data);
    Ok(())
}

/// In-place inverse transform of a power-of-two-length buffer.
///
/// Implemented as conjugate, forward transform, conjugate, scale by `1/n`.
pub fn ifft(data: &mut [Complex<f64>]) -> Result<(), ExecInvariantViolation> {
    ensure_radix2_len(data.len())?;
    for v in data.iter_mut() {
        *v = v.conj();
    }
    radix2(data);
    let scale = 1.0 / data.len() as f64;
    for v in data.iter_mut() {
        *v = v.conj().scale(scale);
    }
    Ok(())
}

/// Build a zero-padded complex buffer of `len` samples from a real sequence.
pub fn complex_buffer(samples: &[f64], len: usize) -> Vec<Complex<f64>> {
    let mut buf = vec![Complex::new(0.0, 0.0); len];
    for (dst, src) in buf.iter_mut().zip(samples.iter().copied()) {
        *dst = Complex::new(src, 0.0);
    }
    buf
}

fn ensure_radix2_len(len: usize) -> Result<(), ExecInvariantViolation> {
    if len.is_power_of_two() {
        Ok(())
    } else {
        Err(ExecInvariantViolation::InvalidState {
            reason: "transform length must be a power of two",
        })
    }
}

/// Cooley-Tukey decimation in time. Length is a power of two by the time we
/// get here; lengths 0 and 1 fall through the base case untouched.
fn radix2(data: &mut [Complex<f64>]) {
    let n = data.len();
    if n <= 1 {
        return;
    }
    let half = n / 2;

    let mut even = Vec::with_capacity(half);
    let mut odd = Vec::with_capacity(half);
    for pair in data.chunks_exact(2) {
        even.push(pair[0]);
        odd.push(pair[1]);
    }

    radix2(&mut even);
    radix2(&mut odd);

    for k in 0..half {
        let angle = -2.0 * PI * k as f64 / n as f64;
        let twiddle = Complex::new(angle.cos(), angle.sin());
        let t = twiddle * odd[k];
        data[k] = even[k] + t;
        data[k + half] = even[k] - t;
    }
}
