//! Motor profile configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Stepping mode for the motor.
///
/// The mode determines how many ticks make up one electrical cycle and which
/// phase table the driver walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// One winding energized per tick; 4 ticks per cycle.
    Wave,
    /// Two adjacent windings energized per tick; 4 ticks per cycle.
    Full,
    /// Interleaved wave/full patterns; 8 ticks per cycle.
    Half,
    /// PWM sub-stepping. Not implemented; initialization refuses it.
    Micro,
}

impl StepMode {
    /// Ticks needed to complete one electrical cycle in this mode.
    ///
    /// Returns `None` for [`StepMode::Micro`], which has no fixed tick
    /// geometry.
    pub const fn ticks_per_cycle(self) -> Option<u8> {
        match self {
            StepMode::Wave | StepMode::Full => Some(4),
            StepMode::Half => Some(8),
            StepMode::Micro => None,
        }
    }
}

/// Complete motor profile from TOML.
///
/// Immutable once the driver has been initialized from it.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorProfile {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Steps per revolution, after the gearbox if one is fitted.
    pub steps_per_revolution: u16,

    /// Maximum speed in RPM, after the gearbox if one is fitted.
    pub max_speed_rpm: u16,

    /// Stepping mode.
    pub step_mode: StepMode,

    /// Number of motor wires; the H-bridge driver serves 4-wire motors.
    #[serde(default = "default_wire_count")]
    pub wire_count: u8,

    /// Whether the motor is wired unipolar rather than bipolar.
    #[serde(default)]
    pub unipolar: bool,
}

fn default_wire_count() -> u8 {
    4
}

impl MotorProfile {
    /// Maximum angular velocity in degrees per second.
    ///
    /// One RPM is 6 degrees per second.
    #[inline]
    pub fn max_speed_deg_per_sec(&self) -> f32 {
        self.max_speed_rpm as f32 * 6.0
    }

    /// Bipolar profile for the 28BYJ-48 geared stepper.
    ///
    /// 513 steps per output revolution with the 1/16 reduction gearbox.
    pub fn byj48() -> Self {
        Self {
            name: String::try_from("28BYJ-48").unwrap_or_default(),
            steps_per_revolution: 513,
            max_speed_rpm: 240,
            step_mode: StepMode::Full,
            wire_count: 4,
            unipolar: false,
        }
    }

    /// Profile for the STEPPERONLINE NEMA 17 (59 Ncm), 1.8 degrees per step.
    pub fn nema17_59ncm() -> Self {
        Self {
            name: String::try_from("NEMA17-59Ncm").unwrap_or_default(),
            steps_per_revolution: 200,
            max_speed_rpm: 600,
            step_mode: StepMode::Half,
            wire_count: 4,
            unipolar: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_per_cycle() {
        assert_eq!(StepMode::Wave.ticks_per_cycle(), Some(4));
        assert_eq!(StepMode::Full.ticks_per_cycle(), Some(4));
        assert_eq!(StepMode::Half.ticks_per_cycle(), Some(8));
        assert_eq!(StepMode::Micro.ticks_per_cycle(), None);
    }

    #[test]
    fn test_max_speed_conversion() {
        let profile = MotorProfile::byj48();
        // 240 RPM * 6 = 1440 deg/s
        assert!((profile.max_speed_deg_per_sec() - 1440.0).abs() < 0.01);
    }

    #[test]
    fn test_presets() {
        let byj = MotorProfile::byj48();
        assert_eq!(byj.steps_per_revolution, 513);
        assert_eq!(byj.step_mode, StepMode::Full);
        assert!(!byj.unipolar);

        let nema = MotorProfile::nema17_59ncm();
        assert_eq!(nema.steps_per_revolution, 200);
        assert_eq!(nema.max_speed_rpm, 600);
        assert_eq!(nema.step_mode, StepMode::Half);
    }
}
