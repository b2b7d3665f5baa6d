use crate::kernel::{ConfigError, ExecInvariantViolation};
use alloc::format;
use alloc::string::String;
use core::{error, fmt};

/// Errors surfaced by the signal-level API.
///
/// Kernel-level failures ([`ConfigError`], [`ExecInvariantViolation`]) convert
/// into this type at the [`crate::signal::Signal`] boundary so callers deal
/// with a single error surface.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// An argument passed into a signal operation was invalid.
    InvalidArg {
        /// The invalid argument.
        arg: String,
        /// Why the argument is invalid.
        reason: String,
    },
    /// Execution was attempted with a violated invariant.
    Exec {
        /// Why execution could not proceed.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArg { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            Error::Exec { reason } => write!(f, "Execution invariant violation: {reason}"),
        }
    }
}

impl error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::InvalidArgument { arg, reason } => Error::InvalidArg {
                arg: arg.into(),
                reason: reason.into(),
            },
            ConfigError::LengthMismatch { arg, expected, got } => Error::InvalidArg {
                arg: arg.into(),
                reason: format!("expected length {expected}, got {got}"),
            },
            ConfigError::NonContiguous { arg } => Error::InvalidArg {
                arg: arg.into(),
                reason: "buffer is not contiguous in memory".into(),
            },
        }
    }
}

impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::InvalidState { reason } => Error::Exec {
                reason: reason.into(),
            },
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => Error::Exec {
                reason: format!("length mismatch on `{arg}`: expected {expected}, got {got}"),
            },
            ExecInvariantViolation::Config(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_errors_convert_into_the_signal_surface() {
        let err: Error = ConfigError::InvalidArgument {
            arg: "sample_rate",
            reason: "sample rate must be finite and > 0",
        }
        .into();
        assert!(matches!(err, Error::InvalidArg { .. }));

        let err: Error = ExecInvariantViolation::InvalidState {
            reason: "convolution inputs must be non-empty",
        }
        .into();
        assert_eq!(
            alloc::format!("{err}"),
            "Execution invariant violation: convolution inputs must be non-empty"
        );
    }
}
