//! Window functions and windowed-signal construction.

use crate::error::Error;
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Write1D};
use crate::signal::traits::WindowGenerate1D;
use crate::signal::Signal;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::TAU;
use core::fmt;

/// Supported window families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Rectangular window; all coefficients 1.
    Boxcar,
    /// Hann window.
    Hann,
    /// Hamming window.
    Hamming,
    /// Blackman window.
    Blackman,
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowKind::Boxcar => "boxcar",
            WindowKind::Hann => "hann",
            WindowKind::Hamming => "hamming",
            WindowKind::Blackman => "blackman",
        };
        f.write_str(name)
    }
}

/// Constructor config for [`WindowKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window family.
    pub kind: WindowKind,
    /// Number of coefficients.
    pub len: usize,
}

/// Trait-first symmetric window coefficient kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowKernel {
    kind: WindowKind,
    len: usize,
}

impl WindowKernel {
    /// Number of coefficients the kernel produces.
    pub fn output_len(&self) -> usize {
        self.len
    }

    fn coefficient(&self, i: usize) -> f64 {
        // Symmetric windows; a single-coefficient window degenerates to 1.
        if self.len == 1 {
            return 1.0;
        }
        let x = TAU * i as f64 / (self.len - 1) as f64;
        match self.kind {
            WindowKind::Boxcar => 1.0,
            WindowKind::Hann => 0.5 * (1.0 - x.cos()),
            WindowKind::Hamming => 0.54 - 0.46 * x.cos(),
            WindowKind::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
        }
    }
}

impl KernelLifecycle for WindowKernel {
    type Config = WindowConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.len == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "len",
                reason: "window length must be > 0",
            });
        }
        Ok(Self {
            kind: config.kind,
            len: config.len,
        })
    }
}

impl WindowGenerate1D<f64> for WindowKernel {
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<f64> + ?Sized,
    {
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out.len() != self.len {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: self.len,
                got: out.len(),
            });
        }
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.coefficient(i);
        }
        Ok(())
    }

    fn run_alloc(&self) -> Result<Vec<f64>, ExecInvariantViolation> {
        let mut out = vec![0.0; self.len];
        self.run_into(out.as_mut_slice())?;
        Ok(out)
    }
}

/// Return a fresh copy of `signal` with the window applied sample-wise.
///
/// The input is untouched; the copy keeps its kind and gains a derived label.
pub fn window_signal(signal: &Signal, kind: WindowKind) -> Result<Signal, Error> {
    let kernel = WindowKernel::try_new(WindowConfig {
        kind,
        len: signal.len(),
    })?;
    let coefficients = kernel.run_alloc()?;

    let mut windowed = signal.clone();
    for (v, w) in windowed.samples_mut().iter_mut().zip(coefficients.iter()) {
        *v *= w;
    }
    windowed.set_label(format!("{} ({kind} windowed)", signal.label()));
    Ok(windowed)
}
