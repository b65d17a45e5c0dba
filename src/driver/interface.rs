//! The driver capability set.
//!
//! Any concrete chip driver implements [`StepperDriver`]; callers program
//! against the trait and pick the concrete type at configuration time, so
//! step modes and driver chips share one calling convention.

use crate::config::motor::MotorProfile;
use crate::config::units::{Degrees, DegreesPerSec, SpeedRatio};
use crate::error::Result;
use crate::hal::ClockMonitor;
use crate::scheduler::{Direction, Motion};

/// Polled snapshot of driver state.
///
/// The interrupt handler has no channel to report errors synchronously, so
/// faults accumulate in counters the foreground reads from here.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverStatus {
    /// Current position in the phase table.
    pub current_tick: u8,
    /// Commanded motion.
    pub motion: Motion,
    /// Commanded fraction of the maximum step rate.
    pub speed_ratio: SpeedRatio,
    /// Traversal direction of the phase table.
    pub direction: Direction,
    /// Interrupts that arrived with more than one tick period of lag.
    pub overruns: u16,
    /// Output-line writes that failed inside the interrupt handler.
    pub pin_faults: u16,
}

/// A stepper motor chip driver.
///
/// Contract: [`initialize`](StepperDriver::initialize) must complete
/// successfully before any step command; commands issued earlier are rejected
/// with [`DriverError::NotInitialized`](crate::error::DriverError::NotInitialized)
/// and produce no output-line changes. Step commands record the request and
/// return immediately - motion is carried out by the tick scheduler on
/// subsequent timer interrupts, not by the calling thread.
pub trait StepperDriver {
    /// Bind the driver to a motor profile.
    ///
    /// Verifies peripheral-clock readiness, derives the timing budget,
    /// de-energizes the outputs, and starts the periodic tick timer.
    fn initialize(&mut self, profile: &MotorProfile, clocks: &dyn ClockMonitor) -> Result<()>;

    /// Rotate by `angle` at maximum speed. The sign selects the direction.
    fn step_by_angle(&mut self, angle: Degrees) -> Result<()>;

    /// Rotate continuously at `speed`. The sign selects the direction; a
    /// magnitude above the profile maximum is clamped to it, and zero holds
    /// the current pattern.
    fn step_by_angular_speed(&mut self, speed: DegreesPerSec) -> Result<()>;

    /// Service one timer-update event. Invoke from the timer interrupt
    /// handler; never blocks and reports faults only through
    /// [`status`](StepperDriver::status) counters.
    fn on_timer_tick(&mut self);

    /// Stop the tick timer, de-energize all output lines, and drop the
    /// derived state. Step commands are rejected again until the next
    /// successful [`initialize`](StepperDriver::initialize).
    fn shutdown(&mut self) -> Result<()>;

    /// Snapshot the scheduler state and fault counters.
    fn status(&self) -> DriverStatus;
}
