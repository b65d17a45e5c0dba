//! Error types for stepper-hbridge.
//!
//! Provides unified error handling across configuration, hardware readiness,
//! and driver operation.

use core::fmt;

use crate::config::motor::StepMode;
use crate::hal::Peripheral;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-hbridge operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Hardware precondition or peripheral error
    Hardware(HardwareError),
    /// Driver operation error
    Driver(DriverError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Steps per revolution is zero
    ZeroStepsPerRevolution,
    /// Maximum speed is zero RPM
    ZeroMaxSpeed,
    /// The per-step time budget truncates to zero (step rate above 1 MHz)
    StepRateTooHigh {
        /// Steps per revolution from the profile
        steps_per_revolution: u16,
        /// Maximum speed from the profile
        max_speed_rpm: u16,
    },
    /// The step mode has no tick geometry (Micro stepping)
    UnsupportedStepMode(StepMode),
    /// Wire count the H-bridge driver cannot serve (must be 4)
    UnsupportedWireCount(u8),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Hardware precondition and peripheral errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    /// A required peripheral clock was not enabled at initialization time
    ClockDisabled(Peripheral),
    /// The tick timer refused to start or stop
    TimerFault,
    /// GPIO pin operation failed
    PinFault,
}

/// Driver operation errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Step command issued before a successful initialization
    NotInitialized,
    /// Step mode the driver does not implement (Micro stepping)
    UnsupportedMode(StepMode),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroStepsPerRevolution => {
                write!(f, "steps_per_revolution must be > 0")
            }
            ConfigError::ZeroMaxSpeed => write!(f, "max_speed_rpm must be > 0"),
            ConfigError::StepRateTooHigh {
                steps_per_revolution,
                max_speed_rpm,
            } => write!(
                f,
                "{} steps/rev at {} RPM exceeds the 1 MHz step budget",
                steps_per_revolution, max_speed_rpm
            ),
            ConfigError::UnsupportedStepMode(mode) => {
                write!(f, "step mode {:?} has no tick geometry", mode)
            }
            ConfigError::UnsupportedWireCount(n) => {
                write!(f, "unsupported wire count {} (expected 4)", n)
            }
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::ClockDisabled(p) => {
                write!(f, "peripheral clock for {:?} is not enabled", p)
            }
            HardwareError::TimerFault => write!(f, "tick timer operation failed"),
            HardwareError::PinFault => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::NotInitialized => write!(f, "driver not initialized"),
            DriverError::UnsupportedMode(mode) => {
                write!(f, "step mode {:?} is not implemented by this driver", mode)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}
