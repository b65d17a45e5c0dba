//! Configuration module for stepper-hbridge.
//!
//! Provides types for loading and validating motor profiles from TOML files
//! (with `std` feature) or pre-parsed data, plus the timing budget derived
//! from a profile at initialization.

pub mod motor;
mod system;
pub mod timing;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::{MotorProfile, StepMode};
pub use system::SystemConfig;
pub use timing::StepTiming;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, DegreesPerSec, SpeedRatio};
