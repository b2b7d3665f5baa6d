//! Shared substrate for trait-first kernels.
//!
//! Every numeric capability in this crate is packaged as a kernel: a small
//! struct built through [`KernelLifecycle::try_new`] with a validated config,
//! exposing checked `run_into`/`run_alloc` entry points over the 1D buffer
//! adapters defined here.

mod contract;
mod io;

pub use contract::*;
pub use io::*;
