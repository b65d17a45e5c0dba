//! # stepper-hbridge
//!
//! Interrupt-driven stepper motor control for discrete H-bridge drivers with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Interrupt-driven**: step commands return immediately; a periodic timer
//!   interrupt walks the phase table
//! - **embedded-hal 1.0**: four `OutputPin`s, one per H-bridge leg
//! - **no_std compatible**: core library works without the standard library
//! - **Configuration-driven**: define motors in TOML files
//! - **Wave, full and half stepping**: table-driven phase sequencing
//! - **Polled fault counters**: interrupt-context faults surface without an
//!   error channel
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_hbridge::{HBridgeBuilder, MotorProfile, StepperDriver, UnitExt};
//!
//! // Bind the four H-bridge legs and the tick timer
//! let mut driver = HBridgeBuilder::new()
//!     .phase_a_positive(pa0)
//!     .phase_a_negative(pa1)
//!     .phase_b_positive(pa2)
//!     .phase_b_negative(pa3)
//!     .timer(tim6)
//!     .build()?;
//!
//! // Bind a motor profile; the periodic timer starts here
//! driver.initialize(&MotorProfile::byj48(), &clocks)?;
//!
//! // Deferred: motion happens on subsequent timer interrupts
//! driver.step_by_angle(90.0f32.degrees())?;
//!
//! // From the timer interrupt handler:
//! // driver.on_timer_tick();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing, and the host
//!   critical-section implementation
//! - `defmt`: Enables defmt formatting for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod hal;
pub mod scheduler;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorProfile, StepMode, StepTiming, SystemConfig};
pub use driver::{DriverStatus, HBridgeBuilder, HBridgeDriver, PhasePattern, StepperDriver};
pub use error::{Error, Result};
pub use hal::{ClockMonitor, Peripheral, TickTimer};
pub use scheduler::{Direction, Motion, TickScheduler};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, DegreesPerSec, SpeedRatio, UnitExt};
