//! Tick scheduling for stepper-hbridge.
//!
//! Hosts the interrupt-driven state machine that turns a periodic timer into
//! phase-table traversal.

mod tick;

pub use tick::{Direction, Motion, TickScheduler};
