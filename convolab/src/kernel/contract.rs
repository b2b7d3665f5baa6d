use core::fmt;

/// Validation errors raised while constructing a kernel or binding an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field holds a value the kernel cannot work with.
    InvalidArgument {
        /// Name of the offending argument.
        arg: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A buffer length does not match the shape the kernel requires.
    LengthMismatch {
        /// Name of the offending argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// A contiguous 1D view could not be borrowed from the container.
    NonContiguous {
        /// Name of the offending argument.
        arg: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            ConfigError::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
            ConfigError::NonContiguous { arg } => {
                write!(f, "Argument `{arg}` is not contiguous in memory.")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Runtime invariant violations surfaced by checked kernel entry points.
///
/// These cover conditions that are only detectable once input data is seen:
/// empty inputs, output buffers of the wrong shape, or a precondition the
/// caller was contractually required to uphold (such as the power-of-two
/// length of the spectral transform).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecInvariantViolation {
    /// An execution precondition does not hold for the supplied data.
    InvalidState {
        /// Why execution cannot proceed.
        reason: &'static str,
    },
    /// An output buffer length does not match the runtime shape.
    LengthMismatch {
        /// Name of the offending argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// An adapter failed to bind while executing.
    Config(ConfigError),
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::InvalidState { reason } => {
                write!(f, "Execution invariant violation: {reason}")
            }
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Execution length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for ExecInvariantViolation {}

/// Constructor lifecycle shared by every kernel in the crate.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct DelayConfig {
        taps: usize,
    }

    #[derive(Debug, Clone, Copy)]
    struct DelayKernel {
        taps: usize,
    }

    impl KernelLifecycle for DelayKernel {
        type Config = DelayConfig;

        fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
            if config.taps == 0 {
                return Err(ConfigError::InvalidArgument {
                    arg: "taps",
                    reason: "at least one tap is required",
                });
            }
            Ok(Self { taps: config.taps })
        }
    }

    #[test]
    fn lifecycle_accepts_valid_and_rejects_invalid_config() {
        let kernel = DelayKernel::try_new(DelayConfig { taps: 3 }).expect("valid config");
        assert_eq!(kernel.taps, 3);
        assert!(DelayKernel::try_new(DelayConfig { taps: 0 }).is_err());
    }

    #[test]
    fn config_errors_format_the_offending_argument() {
        let err = ConfigError::LengthMismatch {
            arg: "out",
            expected: 8,
            got: 4,
        };
        assert_eq!(
            alloc::format!("{err}"),
            "Length mismatch on `out`. Expected 8, got 4."
        );
    }

    #[test]
    fn exec_violations_wrap_config_errors() {
        let err: ExecInvariantViolation = ConfigError::NonContiguous { arg: "array" }.into();
        assert!(matches!(err, ExecInvariantViolation::Config(_)));
    }
}
