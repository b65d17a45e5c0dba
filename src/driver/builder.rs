//! Builder pattern for HBridgeDriver.

use embedded_hal::digital::OutputPin;

use crate::error::{ConfigError, Error, Result};
use crate::hal::TickTimer;

use super::hbridge::HBridgeDriver;

/// Default tick-interrupt cadence in microseconds.
pub const DEFAULT_INTERRUPT_PERIOD_US: u32 = 1_000;

/// Default interrupt priority for the tick timer.
pub const DEFAULT_INTERRUPT_PRIORITY: u8 = 2;

/// Builder for creating [`HBridgeDriver`] instances.
pub struct HBridgeBuilder<APOS, ANEG, BPOS, BNEG, TIM>
where
    APOS: OutputPin,
    ANEG: OutputPin,
    BPOS: OutputPin,
    BNEG: OutputPin,
    TIM: TickTimer,
{
    a_pos: Option<APOS>,
    a_neg: Option<ANEG>,
    b_pos: Option<BPOS>,
    b_neg: Option<BNEG>,
    timer: Option<TIM>,
    interrupt_period_us: u32,
    interrupt_priority: u8,
    name: Option<heapless::String<32>>,
}

impl<APOS, ANEG, BPOS, BNEG, TIM> Default for HBridgeBuilder<APOS, ANEG, BPOS, BNEG, TIM>
where
    APOS: OutputPin,
    ANEG: OutputPin,
    BPOS: OutputPin,
    BNEG: OutputPin,
    TIM: TickTimer,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<APOS, ANEG, BPOS, BNEG, TIM> HBridgeBuilder<APOS, ANEG, BPOS, BNEG, TIM>
where
    APOS: OutputPin,
    ANEG: OutputPin,
    BPOS: OutputPin,
    BNEG: OutputPin,
    TIM: TickTimer,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            a_pos: None,
            a_neg: None,
            b_pos: None,
            b_neg: None,
            timer: None,
            interrupt_period_us: DEFAULT_INTERRUPT_PERIOD_US,
            interrupt_priority: DEFAULT_INTERRUPT_PRIORITY,
            name: None,
        }
    }

    /// Set the A+ output line.
    pub fn phase_a_positive(mut self, pin: APOS) -> Self {
        self.a_pos = Some(pin);
        self
    }

    /// Set the A− output line.
    pub fn phase_a_negative(mut self, pin: ANEG) -> Self {
        self.a_neg = Some(pin);
        self
    }

    /// Set the B+ output line.
    pub fn phase_b_positive(mut self, pin: BPOS) -> Self {
        self.b_pos = Some(pin);
        self
    }

    /// Set the B− output line.
    pub fn phase_b_negative(mut self, pin: BNEG) -> Self {
        self.b_neg = Some(pin);
        self
    }

    /// Set the tick timer.
    pub fn timer(mut self, timer: TIM) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Set the tick-interrupt cadence in microseconds.
    pub fn interrupt_period_us(mut self, period_us: u32) -> Self {
        self.interrupt_period_us = period_us;
        self
    }

    /// Set the interrupt priority passed to the timer.
    pub fn interrupt_priority(mut self, priority: u8) -> Self {
        self.interrupt_priority = priority;
        self
    }

    /// Set the driver name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Build the driver.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin, the timer, or the interrupt cadence is
    /// missing or zero.
    pub fn build(self) -> Result<HBridgeDriver<APOS, ANEG, BPOS, BNEG, TIM>> {
        let a_pos = self.a_pos.ok_or_else(|| missing("phase_a_positive"))?;
        let a_neg = self.a_neg.ok_or_else(|| missing("phase_a_negative"))?;
        let b_pos = self.b_pos.ok_or_else(|| missing("phase_b_positive"))?;
        let b_neg = self.b_neg.ok_or_else(|| missing("phase_b_negative"))?;
        let timer = self.timer.ok_or_else(|| missing("timer"))?;

        if self.interrupt_period_us == 0 {
            return Err(missing("interrupt_period_us"));
        }

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("stepper").unwrap_or_default());

        Ok(HBridgeDriver::new(
            a_pos,
            a_neg,
            b_pos,
            b_neg,
            timer,
            self.interrupt_period_us,
            self.interrupt_priority,
            name,
        ))
    }
}

fn missing(field: &str) -> Error {
    let mut msg: heapless::String<128> = heapless::String::new();
    let _ = msg.push_str(field);
    let _ = msg.push_str(" is required");
    Error::Config(ConfigError::ParseError(msg))
}
