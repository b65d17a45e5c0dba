//! Tick scheduling - the interrupt-driven phase state machine.
//!
//! The scheduler owns everything the timer interrupt mutates: the current
//! tick, the elapsed-time accumulator, and the commanded motion. It is pure
//! state with no pin or timer access, so the whole transition rule is testable
//! on the host; the driver applies the resulting phase pattern.

use crate::config::units::SpeedRatio;

/// Direction of motor rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise, facing the motor: forward traversal of the phase table.
    Clockwise,
    /// Counter-clockwise: reverse traversal of the phase table.
    CounterClockwise,
}

impl Direction {
    /// Direction selected by the sign of an angle or angular speed.
    #[inline]
    pub fn from_sign(value: f32) -> Self {
        if value >= 0.0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }
}

/// What the scheduler is currently carrying out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motion {
    /// No motion pending; the current pattern holds.
    Idle,
    /// A bounded move with this many tick advances left.
    Finite {
        /// Tick advances remaining before the move completes.
        remaining_ticks: u32,
    },
    /// Run until commanded otherwise.
    Continuous,
}

impl Motion {
    /// Whether any motion is pending.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, Motion::Idle)
    }
}

/// Effective tick period for a ratio of zero: never reached, so the
/// accumulator saturates and the pattern holds.
const HOLD_PERIOD_US: u32 = u32::MAX;

/// Periodic-interrupt tick state machine.
///
/// Once per timer-update event the driver calls [`TickScheduler::on_interrupt`];
/// the scheduler accumulates the elapsed interval and reports `Some(tick)`
/// when a phase transition must be applied. The accumulator rule compares
/// elapsed deltas against the period - never absolute counter values - and
/// saturates, so long holds cannot misfire on counter wraparound.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    /// Current position in the phase table, always in `[0, ticks_per_cycle)`.
    current_tick: u8,

    /// Ticks per electrical cycle for the active step mode.
    ticks_per_cycle: u8,

    /// Microseconds per tick at full speed.
    tick_period_us: u32,

    /// Tick period scaled by the commanded speed ratio.
    effective_period_us: u32,

    /// Cadence of the driving timer interrupt.
    interrupt_period_us: u32,

    /// Microseconds accumulated since the last tick advance.
    accumulator_us: u32,

    /// Commanded fraction of the maximum step rate.
    speed_ratio: SpeedRatio,

    /// Traversal direction of the phase table.
    direction: Direction,

    /// Commanded motion.
    motion: Motion,

    /// Interrupts where the accumulator had overshot by a full extra period.
    /// Single-advance catch-up policy: the lag is counted, not consumed.
    overruns: u16,
}

impl TickScheduler {
    /// Create a scheduler for the given tick geometry and interrupt cadence.
    ///
    /// `ticks_per_cycle` must be non-zero; the driver derives it from a step
    /// mode, which guarantees that.
    pub fn new(ticks_per_cycle: u8, tick_period_us: u32, interrupt_period_us: u32) -> Self {
        debug_assert!(ticks_per_cycle > 0);
        Self {
            current_tick: 0,
            ticks_per_cycle,
            tick_period_us,
            effective_period_us: HOLD_PERIOD_US,
            interrupt_period_us,
            accumulator_us: 0,
            speed_ratio: SpeedRatio::HOLD,
            direction: Direction::Clockwise,
            motion: Motion::Idle,
            overruns: 0,
        }
    }

    /// Current position in the phase table.
    #[inline]
    pub fn current_tick(&self) -> u8 {
        self.current_tick
    }

    /// Ticks per electrical cycle.
    #[inline]
    pub fn ticks_per_cycle(&self) -> u8 {
        self.ticks_per_cycle
    }

    /// Commanded motion.
    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Commanded speed ratio.
    #[inline]
    pub fn speed_ratio(&self) -> SpeedRatio {
        self.speed_ratio
    }

    /// Traversal direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Interrupts that arrived with more than one tick period accumulated.
    #[inline]
    pub fn overruns(&self) -> u16 {
        self.overruns
    }

    /// Command a bounded move of `ticks` tick advances.
    ///
    /// Callers must wrap this in a critical section when the interrupt
    /// handler can preempt: it writes multiple fields the handler reads.
    pub fn command_finite(&mut self, ticks: u32, ratio: SpeedRatio, direction: Direction) {
        self.motion = if ticks == 0 {
            Motion::Idle
        } else {
            Motion::Finite {
                remaining_ticks: ticks,
            }
        };
        self.direction = direction;
        self.set_ratio(ratio);
    }

    /// Command continuous rotation at the given ratio.
    ///
    /// Same critical-section requirement as [`TickScheduler::command_finite`].
    pub fn command_continuous(&mut self, ratio: SpeedRatio, direction: Direction) {
        self.motion = Motion::Continuous;
        self.direction = direction;
        self.set_ratio(ratio);
    }

    /// Request a stop. Takes effect at the next tick boundary, never
    /// mid-pattern: the in-flight interrupt completes its transition rule
    /// before observing the idle state.
    pub fn stop(&mut self) {
        self.motion = Motion::Idle;
        self.set_ratio(SpeedRatio::HOLD);
    }

    /// Zero the accumulator and halt motion, for driver shutdown.
    pub fn reset(&mut self) {
        self.stop();
        self.accumulator_us = 0;
        self.current_tick = 0;
    }

    fn set_ratio(&mut self, ratio: SpeedRatio) {
        self.speed_ratio = ratio;
        // Division happens here, in the foreground command path; the
        // interrupt path below is integer compare-and-add only.
        self.effective_period_us = if ratio.is_hold() {
            HOLD_PERIOD_US
        } else {
            (self.tick_period_us as f32 / ratio.value()) as u32
        };
    }

    /// Advance the state machine by one timer-update event.
    ///
    /// Returns `Some(tick)` when a phase transition must be applied this
    /// interrupt, `None` otherwise. Invoked from the interrupt context; does
    /// not block, allocate, or divide.
    pub fn on_interrupt(&mut self) -> Option<u8> {
        if !self.motion.is_active() || self.speed_ratio.is_hold() {
            return None;
        }

        self.accumulator_us = self.accumulator_us.saturating_add(self.interrupt_period_us);
        if self.accumulator_us < self.effective_period_us {
            return None;
        }

        // Lag beyond one extra period is surfaced, not silently absorbed.
        if self.accumulator_us - self.effective_period_us >= self.effective_period_us {
            self.overruns = self.overruns.saturating_add(1);
        }
        self.accumulator_us = 0;

        self.current_tick = match self.direction {
            Direction::Clockwise => {
                if self.current_tick + 1 >= self.ticks_per_cycle {
                    0
                } else {
                    self.current_tick + 1
                }
            }
            Direction::CounterClockwise => {
                if self.current_tick == 0 {
                    self.ticks_per_cycle - 1
                } else {
                    self.current_tick - 1
                }
            }
        };

        if let Motion::Finite { remaining_ticks } = &mut self.motion {
            *remaining_ticks -= 1;
            if *remaining_ticks == 0 {
                self.motion = Motion::Idle;
                self.speed_ratio = SpeedRatio::HOLD;
                self.effective_period_us = HOLD_PERIOD_US;
            }
        }

        Some(self.current_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_speed(ticks_per_cycle: u8, tick_period_us: u32, interrupt_us: u32) -> TickScheduler {
        let mut sched = TickScheduler::new(ticks_per_cycle, tick_period_us, interrupt_us);
        sched.command_continuous(SpeedRatio::FULL, Direction::Clockwise);
        sched
    }

    #[test]
    fn test_accumulator_threshold() {
        // us_per_step = 10000, full mode: 4 ticks -> 2500 us/tick, 1000 us cadence
        let mut sched = full_speed(4, 2500, 1000);

        // Interrupts 1 and 2: 1000, 2000 accumulated, below threshold
        assert_eq!(sched.on_interrupt(), None);
        assert_eq!(sched.on_interrupt(), None);

        // Interrupt 3: 3000 >= 2500, exactly one advance, accumulator resets
        assert_eq!(sched.on_interrupt(), Some(1));

        // Interrupt 4: accumulator back at 1000, no advance
        assert_eq!(sched.on_interrupt(), None);
    }

    #[test]
    fn test_idle_scheduler_never_advances() {
        let mut sched = TickScheduler::new(4, 2500, 1000);
        for _ in 0..100 {
            assert_eq!(sched.on_interrupt(), None);
        }
        assert_eq!(sched.current_tick(), 0);
    }

    #[test]
    fn test_hold_ratio_skips_phase_function() {
        let mut sched = TickScheduler::new(4, 2500, 1000);
        sched.command_continuous(SpeedRatio::HOLD, Direction::Clockwise);

        for _ in 0..100 {
            assert_eq!(sched.on_interrupt(), None);
        }
        // Pattern holds; the tick never moved
        assert_eq!(sched.current_tick(), 0);
    }

    #[test]
    fn test_forward_wraparound() {
        let mut sched = full_speed(4, 1000, 1000);

        let ticks: Vec<_> = (0..8).filter_map(|_| sched.on_interrupt()).collect();
        assert_eq!(ticks, [1, 2, 3, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_reverse_wraparound() {
        let mut sched = TickScheduler::new(8, 1000, 1000);
        sched.command_continuous(SpeedRatio::FULL, Direction::CounterClockwise);

        let ticks: Vec<_> = (0..9).filter_map(|_| sched.on_interrupt()).collect();
        assert_eq!(ticks, [7, 6, 5, 4, 3, 2, 1, 0, 7]);
    }

    #[test]
    fn test_half_speed_doubles_period() {
        let mut sched = TickScheduler::new(4, 1000, 1000);
        sched.command_continuous(SpeedRatio::clamped(0.5), Direction::Clockwise);

        // Effective period 2000 us: every second interrupt advances
        assert_eq!(sched.on_interrupt(), None);
        assert_eq!(sched.on_interrupt(), Some(1));
        assert_eq!(sched.on_interrupt(), None);
        assert_eq!(sched.on_interrupt(), Some(2));
    }

    #[test]
    fn test_finite_move_completes_and_idles() {
        let mut sched = TickScheduler::new(4, 1000, 1000);
        sched.command_finite(3, SpeedRatio::FULL, Direction::Clockwise);

        assert_eq!(sched.on_interrupt(), Some(1));
        assert_eq!(sched.on_interrupt(), Some(2));
        assert_eq!(sched.on_interrupt(), Some(3));
        assert_eq!(sched.motion(), Motion::Idle);

        // Move done: further interrupts leave the pattern in place
        for _ in 0..10 {
            assert_eq!(sched.on_interrupt(), None);
        }
        assert_eq!(sched.current_tick(), 3);
    }

    #[test]
    fn test_zero_tick_command_is_idle() {
        let mut sched = TickScheduler::new(4, 1000, 1000);
        sched.command_finite(0, SpeedRatio::FULL, Direction::Clockwise);
        assert_eq!(sched.motion(), Motion::Idle);
        assert_eq!(sched.on_interrupt(), None);
    }

    #[test]
    fn test_stop_takes_effect_at_tick_boundary() {
        let mut sched = full_speed(4, 2500, 1000);
        sched.on_interrupt();
        sched.on_interrupt();

        sched.stop();

        // The pattern is never abandoned mid-cycle; the tick merely freezes
        let frozen = sched.current_tick();
        for _ in 0..10 {
            assert_eq!(sched.on_interrupt(), None);
        }
        assert_eq!(sched.current_tick(), frozen);
    }

    #[test]
    fn test_overrun_counted_not_consumed() {
        // Cadence far coarser than the tick period: every interrupt lags
        let mut sched = full_speed(4, 1000, 5000);

        assert_eq!(sched.on_interrupt(), Some(1));
        assert_eq!(sched.overruns(), 1);

        // Single-advance policy: one tick per interrupt despite the lag
        assert_eq!(sched.on_interrupt(), Some(2));
        assert_eq!(sched.overruns(), 2);
    }

    #[test]
    fn test_long_hold_cannot_misfire() {
        // A held motor accumulates nothing, so no interrupt count can wrap
        // the accumulator into a spurious advance
        let mut sched = TickScheduler::new(4, 2500, u32::MAX / 2);
        sched.command_continuous(SpeedRatio::HOLD, Direction::Clockwise);

        for _ in 0..16 {
            assert_eq!(sched.on_interrupt(), None);
        }
        assert_eq!(sched.current_tick(), 0);
    }

    #[test]
    fn test_reset_zeroes_accumulator() {
        let mut sched = full_speed(4, 2500, 1000);
        sched.on_interrupt();

        sched.reset();
        assert_eq!(sched.current_tick(), 0);
        assert_eq!(sched.motion(), Motion::Idle);
        assert_eq!(sched.on_interrupt(), None);
    }

    proptest! {
        #[test]
        fn prop_tick_stays_in_range(
            ticks_per_cycle in 1u8..=8,
            interrupts in 1usize..2000,
            reverse: bool,
        ) {
            let mut sched = TickScheduler::new(ticks_per_cycle, 100, 100);
            let direction = if reverse {
                Direction::CounterClockwise
            } else {
                Direction::Clockwise
            };
            sched.command_continuous(SpeedRatio::FULL, direction);

            for _ in 0..interrupts {
                sched.on_interrupt();
                prop_assert!(sched.current_tick() < ticks_per_cycle);
            }
        }

        #[test]
        fn prop_full_cycles_return_to_origin(
            ticks_per_cycle in 1u8..=8,
            cycles in 1u32..50,
        ) {
            let mut sched = TickScheduler::new(ticks_per_cycle, 100, 100);
            sched.command_continuous(SpeedRatio::FULL, Direction::Clockwise);

            let origin = sched.current_tick();
            let mut advances = 0u32;
            while advances < cycles * ticks_per_cycle as u32 {
                if sched.on_interrupt().is_some() {
                    advances += 1;
                }
            }
            prop_assert_eq!(sched.current_tick(), origin);
        }
    }
}
