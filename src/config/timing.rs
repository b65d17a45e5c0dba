//! Step timing derived from a motor profile.
//!
//! Computed once at initialization and never mutated afterward.

use crate::error::ConfigError;

use super::motor::MotorProfile;

/// Per-step and per-tick time budget for a motor at maximum speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepTiming {
    /// Microseconds one whole step takes at maximum speed.
    pub us_per_step: u32,

    /// Ticks per electrical cycle for the profile's step mode.
    pub ticks_per_cycle: u8,

    /// Microseconds per tick at maximum speed (`us_per_step / ticks_per_cycle`).
    pub us_per_tick: u32,
}

impl StepTiming {
    /// Derive the timing budget from a motor profile.
    ///
    /// `us_per_step = 60_000_000 / (steps_per_revolution * max_speed_rpm)`,
    /// truncating. The truncation costs at most one tick width of speed
    /// accuracy at the maximum rate.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either factor is zero, if the step mode
    /// has no tick geometry (Micro), or if the per-step budget truncates to
    /// zero.
    pub fn from_profile(profile: &MotorProfile) -> Result<Self, ConfigError> {
        if profile.steps_per_revolution == 0 {
            return Err(ConfigError::ZeroStepsPerRevolution);
        }
        if profile.max_speed_rpm == 0 {
            return Err(ConfigError::ZeroMaxSpeed);
        }

        let ticks_per_cycle = profile
            .step_mode
            .ticks_per_cycle()
            .ok_or(ConfigError::UnsupportedStepMode(profile.step_mode))?;

        let steps_per_minute =
            profile.steps_per_revolution as u64 * profile.max_speed_rpm as u64;
        let us_per_step = (60_000_000u64 / steps_per_minute) as u32;
        let us_per_tick = us_per_step / ticks_per_cycle as u32;

        if us_per_tick == 0 {
            return Err(ConfigError::StepRateTooHigh {
                steps_per_revolution: profile.steps_per_revolution,
                max_speed_rpm: profile.max_speed_rpm,
            });
        }

        Ok(Self {
            us_per_step,
            ticks_per_cycle,
            us_per_tick,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::motor::StepMode;
    use heapless::String;

    fn profile(steps: u16, rpm: u16, mode: StepMode) -> MotorProfile {
        MotorProfile {
            name: String::try_from("test").unwrap(),
            steps_per_revolution: steps,
            max_speed_rpm: rpm,
            step_mode: mode,
            wire_count: 4,
            unipolar: false,
        }
    }

    #[test]
    fn test_byj48_timing() {
        // 60_000_000 / (513 * 240) = 487 us/step, truncated
        let timing = StepTiming::from_profile(&MotorProfile::byj48()).unwrap();
        assert_eq!(timing.us_per_step, 487);
        assert_eq!(timing.ticks_per_cycle, 4);
        assert_eq!(timing.us_per_tick, 121);
    }

    #[test]
    fn test_half_mode_tick_split() {
        // 60_000_000 / (200 * 600) = 500 us/step, 8 ticks -> 62 us/tick
        let timing = StepTiming::from_profile(&profile(200, 600, StepMode::Half)).unwrap();
        assert_eq!(timing.us_per_step, 500);
        assert_eq!(timing.ticks_per_cycle, 8);
        assert_eq!(timing.us_per_tick, 62);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let result = StepTiming::from_profile(&profile(0, 240, StepMode::Full));
        assert_eq!(result, Err(ConfigError::ZeroStepsPerRevolution));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let result = StepTiming::from_profile(&profile(200, 0, StepMode::Full));
        assert_eq!(result, Err(ConfigError::ZeroMaxSpeed));
    }

    #[test]
    fn test_micro_mode_rejected() {
        let result = StepTiming::from_profile(&profile(200, 600, StepMode::Micro));
        assert_eq!(
            result,
            Err(ConfigError::UnsupportedStepMode(StepMode::Micro))
        );
    }

    #[test]
    fn test_step_rate_too_high() {
        // 65535 steps * 60000 RPM overflows the 1 MHz budget
        let result = StepTiming::from_profile(&profile(65535, 60000, StepMode::Full));
        assert!(matches!(result, Err(ConfigError::StepRateTooHigh { .. })));
    }
}
