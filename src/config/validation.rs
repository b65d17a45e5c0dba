//! Configuration validation.

use crate::error::{Error, Result};

use super::timing::StepTiming;
use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks that every motor profile has non-zero steps and speed, a wiring the
/// H-bridge driver can serve, and an achievable step rate. Micro stepping is
/// accepted here (a profile may be declared before a driver that implements
/// it exists) and is refused at driver initialization instead.
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, profile) in config.motors.iter() {
        validate_motor(name.as_str(), profile)?;
    }

    Ok(())
}

fn validate_motor(_name: &str, profile: &super::MotorProfile) -> Result<()> {
    if profile.steps_per_revolution == 0 {
        return Err(Error::Config(
            crate::error::ConfigError::ZeroStepsPerRevolution,
        ));
    }

    if profile.max_speed_rpm == 0 {
        return Err(Error::Config(crate::error::ConfigError::ZeroMaxSpeed));
    }

    if profile.wire_count != 4 {
        return Err(Error::Config(
            crate::error::ConfigError::UnsupportedWireCount(profile.wire_count),
        ));
    }

    // Micro has no timing; every other mode must fit the tick budget.
    if profile.step_mode.ticks_per_cycle().is_some() {
        StepTiming::from_profile(profile)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::motor::{MotorProfile, StepMode};
    use crate::error::ConfigError;

    #[test]
    fn test_zero_speed_rejected() {
        let profile = MotorProfile {
            name: heapless::String::try_from("test").unwrap(),
            steps_per_revolution: 200,
            max_speed_rpm: 0,
            step_mode: StepMode::Full,
            wire_count: 4,
            unipolar: false,
        };

        let result = validate_motor("test", &profile);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ZeroMaxSpeed))
        ));
    }

    #[test]
    fn test_wire_count_rejected() {
        let profile = MotorProfile {
            name: heapless::String::try_from("test").unwrap(),
            steps_per_revolution: 200,
            max_speed_rpm: 240,
            step_mode: StepMode::Full,
            wire_count: 5,
            unipolar: false,
        };

        let result = validate_motor("test", &profile);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnsupportedWireCount(5)))
        ));
    }

    #[test]
    fn test_presets_validate() {
        assert!(validate_motor("byj48", &MotorProfile::byj48()).is_ok());
        assert!(validate_motor("nema17", &MotorProfile::nema17_59ncm()).is_ok());
    }
}
