//! Teaching-oriented discrete convolution for 1D real signals.
//!
//! convolab demonstrates discrete convolution and its frequency-domain
//! equivalent. The numeric core is the [`signal::Signal`] data model, three
//! convolution algorithms (direct, circular, spectral) in
//! [`signal::convolve`], and the recursive radix-2 transform in
//! [`signal::fourier`] that the spectral path and [`signal::spectrum`] build
//! on. Around the core sit the classic demo collaborators: waveform
//! generators ([`signal::wave`]), window functions ([`signal::windows`]),
//! ASCII rendering ([`render`]), and CSV persistence ([`export`]).
//!
//! Everything is single-threaded and deterministic; operations allocate
//! fresh outputs and never mutate their inputs, and noise generation takes
//! an explicit seed.
//!
//! ```
//! use convolab::signal::{convolve_linear, convolve_spectral, wave};
//!
//! let x = wave::sine_wave(5.0, 1.0, 0.0, 0.1, 1000.0).unwrap();
//! let h = wave::gaussian_pulse(1.0, 0.002, 0.01, 0.02, 1000.0).unwrap();
//!
//! let direct = convolve_linear(&x, &h).unwrap();
//! let spectral = convolve_spectral(&x, &h).unwrap();
//! assert_eq!(direct.len(), x.len() + h.len() - 1);
//! assert_eq!(spectral.len(), direct.len());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod kernel;

mod error;
pub use error::Error;

pub mod signal;

pub mod render;

#[cfg(feature = "std")]
pub mod export;
