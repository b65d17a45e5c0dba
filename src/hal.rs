//! Hardware collaborator traits.
//!
//! The core consumes three narrow interfaces and assumes them correct: digital
//! output control (embedded-hal 1.0 [`OutputPin`]s, one per H-bridge leg),
//! periodic timer control, and a peripheral-clock readiness query. Enabling
//! clocks and wiring the interrupt vector stay with the board support code.
//!
//! [`OutputPin`]: embedded_hal::digital::OutputPin

/// Peripherals whose clock must be running before the driver initializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    /// The GPIO bank carrying the four output lines.
    Gpio,
    /// The hardware timer driving the tick interrupt.
    Timer,
}

/// A hardware timer that fires a periodic update interrupt.
///
/// Implementations wrap a chip timer (e.g. a basic STM32 timer) already
/// clocked by the board support code; the driver only sets the cadence and
/// services the update flag from the interrupt handler.
pub trait TickTimer {
    /// Error raised by timer operations.
    type Error: core::fmt::Debug;

    /// Start firing update interrupts every `period_us` microseconds at the
    /// given interrupt priority.
    fn start_periodic(&mut self, period_us: u32, priority: u8) -> Result<(), Self::Error>;

    /// Stop firing update interrupts.
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Whether an unserviced update event is pending.
    fn is_update_pending(&self) -> bool;

    /// Clear the pending update event.
    fn acknowledge(&mut self);
}

/// Query whether required peripheral clocks are enabled.
///
/// Consulted once during initialization; this is a precondition check, not an
/// enabling action.
pub trait ClockMonitor {
    /// Whether the clock feeding `peripheral` is running.
    fn is_clock_enabled(&self, peripheral: Peripheral) -> bool;
}
