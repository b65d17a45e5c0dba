//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_hbridge::load_config;
///
/// let config = load_config("motors.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::motor::StepMode;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motors.tilt]
name = "Tilt"
steps_per_revolution = 200
max_speed_rpm = 600
step_mode = "half"
"#;

        let config = parse_config(toml).unwrap();
        let motor = config.motor("tilt").unwrap();
        assert_eq!(motor.step_mode, StepMode::Half);
        assert_eq!(motor.wire_count, 4);
        assert!(!motor.unipolar);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[motors.base]
name = "Base"
steps_per_revolution = 513
max_speed_rpm = 240
step_mode = "full"
wire_count = 4
unipolar = false
"#;

        let config = parse_config(toml).unwrap();
        let motor = config.motor("base").unwrap();
        assert_eq!(motor.steps_per_revolution, 513);
        assert_eq!(motor.max_speed_rpm, 240);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let toml = r#"
[motors.bad]
name = "Bad"
steps_per_revolution = 0
max_speed_rpm = 240
step_mode = "wave"
"#;

        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let toml = r#"
[motors.bad]
name = "Bad"
steps_per_revolution = 200
max_speed_rpm = 240
step_mode = "quarter"
"#;

        assert!(parse_config(toml).is_err());
    }
}
