//! Driver module for stepper-hbridge.
//!
//! Provides the chip-driver capability trait, the concrete H-bridge phase
//! sequencer, and the per-mode excitation tables.

mod builder;
mod hbridge;
mod interface;
pub mod phase;

pub use builder::{HBridgeBuilder, DEFAULT_INTERRUPT_PERIOD_US, DEFAULT_INTERRUPT_PRIORITY};
pub use hbridge::HBridgeDriver;
pub use interface::{DriverStatus, StepperDriver};
pub use phase::{PhasePattern, FULL_TABLE, HALF_TABLE, WAVE_TABLE};
