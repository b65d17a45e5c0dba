//! H-bridge phase sequencer - the concrete driver for 4-line driver chips
//! (L293D class).
//!
//! Generic over four embedded-hal 1.0 output pins (one per bridge leg) and a
//! [`TickTimer`]. The driver is an explicit context object owned by the
//! caller: the foreground issues step commands, the timer interrupt is
//! forwarded to [`on_timer_tick`](StepperDriver::on_timer_tick), and the two
//! contexts meet only inside the tick scheduler.

use embedded_hal::digital::OutputPin;

use crate::config::motor::{MotorProfile, StepMode};
use crate::config::timing::StepTiming;
use crate::config::units::{Degrees, DegreesPerSec, SpeedRatio};
use crate::error::{ConfigError, DriverError, Error, HardwareError, Result};
use crate::hal::{ClockMonitor, Peripheral, TickTimer};
use crate::scheduler::{Direction, Motion, TickScheduler};

use super::interface::{DriverStatus, StepperDriver};
use super::phase::{table_for, PhasePattern};

/// State derived by a successful initialization.
///
/// Dropped on shutdown, which is what turns step commands back into
/// [`DriverError::NotInitialized`] rejections.
#[derive(Debug)]
struct BoundProfile {
    timing: StepTiming,
    table: &'static [PhasePattern],
    steps_per_revolution: u16,
    max_speed_deg_per_sec: f32,
    scheduler: TickScheduler,
}

/// Stepper driver for a discrete 4-line H-bridge chip.
pub struct HBridgeDriver<APOS, ANEG, BPOS, BNEG, TIM>
where
    APOS: OutputPin,
    ANEG: OutputPin,
    BPOS: OutputPin,
    BNEG: OutputPin,
    TIM: TickTimer,
{
    /// A+ leg.
    a_pos: APOS,

    /// A− leg.
    a_neg: ANEG,

    /// B+ leg.
    b_pos: BPOS,

    /// B− leg.
    b_neg: BNEG,

    /// Timer firing the tick interrupt.
    timer: TIM,

    /// Cadence of the tick interrupt in microseconds.
    interrupt_period_us: u32,

    /// Interrupt priority handed to the timer.
    interrupt_priority: u8,

    /// Driver name for logging/debugging.
    name: heapless::String<32>,

    /// Present after a successful initialization.
    bound: Option<BoundProfile>,

    /// Output-line writes that failed inside the interrupt handler.
    pin_faults: u16,
}

impl<APOS, ANEG, BPOS, BNEG, TIM> HBridgeDriver<APOS, ANEG, BPOS, BNEG, TIM>
where
    APOS: OutputPin,
    ANEG: OutputPin,
    BPOS: OutputPin,
    BNEG: OutputPin,
    TIM: TickTimer,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        a_pos: APOS,
        a_neg: ANEG,
        b_pos: BPOS,
        b_neg: BNEG,
        timer: TIM,
        interrupt_period_us: u32,
        interrupt_priority: u8,
        name: heapless::String<32>,
    ) -> Self {
        Self {
            a_pos,
            a_neg,
            b_pos,
            b_neg,
            timer,
            interrupt_period_us,
            interrupt_priority,
            name,
            bound: None,
            pin_faults: 0,
        }
    }

    /// Get the driver name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether a successful initialization has bound a profile.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.bound.is_some()
    }

    /// Timing budget bound at initialization.
    pub fn timing(&self) -> Option<StepTiming> {
        self.bound.as_ref().map(|b| b.timing)
    }

    /// Write one pattern to the four legs.
    fn drive_lines(
        a_pos: &mut APOS,
        a_neg: &mut ANEG,
        b_pos: &mut BPOS,
        b_neg: &mut BNEG,
        pattern: PhasePattern,
    ) -> core::result::Result<(), ()> {
        set_level(a_pos, pattern.a_positive())?;
        set_level(a_neg, pattern.a_negative())?;
        set_level(b_pos, pattern.b_positive())?;
        set_level(b_neg, pattern.b_negative())?;
        Ok(())
    }

    fn release_lines(&mut self) -> Result<()> {
        Self::drive_lines(
            &mut self.a_pos,
            &mut self.a_neg,
            &mut self.b_pos,
            &mut self.b_neg,
            PhasePattern::RELEASED,
        )
        .map_err(|_| Error::Hardware(HardwareError::PinFault))
    }
}

impl<APOS, ANEG, BPOS, BNEG, TIM> StepperDriver for HBridgeDriver<APOS, ANEG, BPOS, BNEG, TIM>
where
    APOS: OutputPin,
    ANEG: OutputPin,
    BPOS: OutputPin,
    BNEG: OutputPin,
    TIM: TickTimer,
{
    fn initialize(&mut self, profile: &MotorProfile, clocks: &dyn ClockMonitor) -> Result<()> {
        // Precondition checks only: enabling clocks is the board's job.
        for peripheral in [Peripheral::Gpio, Peripheral::Timer] {
            if !clocks.is_clock_enabled(peripheral) {
                return Err(Error::Hardware(HardwareError::ClockDisabled(peripheral)));
            }
        }

        if profile.wire_count != 4 {
            return Err(Error::Config(ConfigError::UnsupportedWireCount(
                profile.wire_count,
            )));
        }

        if profile.step_mode == StepMode::Micro {
            return Err(Error::Driver(DriverError::UnsupportedMode(StepMode::Micro)));
        }

        let timing = StepTiming::from_profile(profile)?;
        let table = table_for(profile.step_mode)
            .ok_or(Error::Driver(DriverError::UnsupportedMode(profile.step_mode)))?;

        // Known de-energized state before the first tick fires. The pins
        // arrive already configured push-pull by the caller's HAL.
        self.release_lines()?;

        self.timer
            .start_periodic(self.interrupt_period_us, self.interrupt_priority)
            .map_err(|_| Error::Hardware(HardwareError::TimerFault))?;

        // Re-initialization halts any motion in progress and rebinds.
        self.bound = Some(BoundProfile {
            timing,
            table,
            steps_per_revolution: profile.steps_per_revolution,
            max_speed_deg_per_sec: profile.max_speed_deg_per_sec(),
            scheduler: TickScheduler::new(
                timing.ticks_per_cycle,
                timing.us_per_tick,
                self.interrupt_period_us,
            ),
        });
        self.pin_faults = 0;

        Ok(())
    }

    fn step_by_angle(&mut self, angle: Degrees) -> Result<()> {
        let bound = self
            .bound
            .as_mut()
            .ok_or(Error::Driver(DriverError::NotInitialized))?;

        // One cycle of ticks covers one whole step of angle. Round to the
        // nearest tick so exact multiples survive f32 arithmetic.
        let ticks_per_degree = bound.steps_per_revolution as f32
            * bound.timing.ticks_per_cycle as f32
            / 360.0;
        let ticks = libm::roundf(angle.abs() * ticks_per_degree) as u32;
        let direction = Direction::from_sign(angle.value());

        // Multi-field update the interrupt handler also reads.
        critical_section::with(|_| {
            bound
                .scheduler
                .command_finite(ticks, SpeedRatio::FULL, direction);
        });

        Ok(())
    }

    fn step_by_angular_speed(&mut self, speed: DegreesPerSec) -> Result<()> {
        let bound = self
            .bound
            .as_mut()
            .ok_or(Error::Driver(DriverError::NotInitialized))?;

        let ratio = SpeedRatio::clamped(speed.abs() / bound.max_speed_deg_per_sec);
        let direction = Direction::from_sign(speed.value());

        critical_section::with(|_| {
            bound.scheduler.command_continuous(ratio, direction);
        });

        Ok(())
    }

    fn on_timer_tick(&mut self) {
        let Some(bound) = self.bound.as_mut() else {
            return;
        };

        if !self.timer.is_update_pending() {
            return;
        }
        self.timer.acknowledge();

        let Some(tick) = bound.scheduler.on_interrupt() else {
            return;
        };

        let pattern = bound.table[tick as usize % bound.table.len()];
        if Self::drive_lines(
            &mut self.a_pos,
            &mut self.a_neg,
            &mut self.b_pos,
            &mut self.b_neg,
            pattern,
        )
        .is_err()
        {
            // No error channel out of the interrupt context; the foreground
            // polls this through status().
            self.pin_faults = self.pin_faults.saturating_add(1);
        }
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.bound.is_none() {
            return Ok(());
        }

        self.timer
            .stop()
            .map_err(|_| Error::Hardware(HardwareError::TimerFault))?;

        if let Some(bound) = self.bound.as_mut() {
            bound.scheduler.reset();
        }
        self.release_lines()?;
        self.bound = None;

        Ok(())
    }

    fn status(&self) -> DriverStatus {
        match &self.bound {
            Some(bound) => critical_section::with(|_| DriverStatus {
                current_tick: bound.scheduler.current_tick(),
                motion: bound.scheduler.motion(),
                speed_ratio: bound.scheduler.speed_ratio(),
                direction: bound.scheduler.direction(),
                overruns: bound.scheduler.overruns(),
                pin_faults: self.pin_faults,
            }),
            None => DriverStatus {
                current_tick: 0,
                motion: Motion::Idle,
                speed_ratio: SpeedRatio::HOLD,
                direction: Direction::Clockwise,
                overruns: 0,
                pin_faults: self.pin_faults,
            },
        }
    }
}

#[inline]
fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> core::result::Result<(), ()> {
    if high {
        pin.set_high().map_err(|_| ())
    } else {
        pin.set_low().map_err(|_| ())
    }
}
