//! Configuration-driven example.
//!
//! Parses a TOML system configuration, picks a motor profile by name, and
//! runs it at a commanded angular speed.

use stepper_hbridge::{
    ClockMonitor, HBridgeBuilder, Peripheral, StepperDriver, TickTimer, UnitExt,
};

const CONFIG: &str = r#"
[motors.pan]
name = "Pan Axis"
steps_per_revolution = 200
max_speed_rpm = 600
step_mode = "half"

[motors.tilt]
name = "Tilt Axis"
steps_per_revolution = 513
max_speed_rpm = 240
step_mode = "full"
"#;

struct SilentPin;

impl embedded_hal::digital::OutputPin for SilentPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for SilentPin {
    type Error = core::convert::Infallible;
}

struct SilentTimer;

impl TickTimer for SilentTimer {
    type Error = core::convert::Infallible;

    fn start_periodic(&mut self, _period_us: u32, _priority: u8) -> Result<(), Self::Error> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn is_update_pending(&self) -> bool {
        true
    }

    fn acknowledge(&mut self) {}
}

struct EnabledClocks;

impl ClockMonitor for EnabledClocks {
    fn is_clock_enabled(&self, _peripheral: Peripheral) -> bool {
        true
    }
}

fn main() {
    println!("=== Configuration-Driven Stepper ===\n");

    let config = stepper_hbridge::parse_config(CONFIG).expect("valid configuration");
    for name in config.motor_names() {
        println!("configured motor: {}", name);
    }

    let profile = config.motor("pan").expect("pan axis configured");

    let mut driver = HBridgeBuilder::new()
        .phase_a_positive(SilentPin)
        .phase_a_negative(SilentPin)
        .phase_b_positive(SilentPin)
        .phase_b_negative(SilentPin)
        .timer(SilentTimer)
        .interrupt_period_us(62)
        .name("pan")
        .build()
        .expect("all hardware bound");

    driver.initialize(profile, &EnabledClocks).expect("init");

    let timing = driver.timing().unwrap();
    println!(
        "\n{}: {} us/step over {} half-step ticks",
        driver.name(),
        timing.us_per_step,
        timing.ticks_per_cycle
    );

    // Continuous rotation at a quarter of the maximum rate
    let max = profile.max_speed_deg_per_sec();
    driver
        .step_by_angular_speed((max * 0.25).degrees_per_sec())
        .expect("driver initialized");

    // Simulate 2000 timer interrupts and watch the tick advance
    let mut advances = 0u32;
    let mut last_tick = driver.status().current_tick;
    for _ in 0..2000 {
        driver.on_timer_tick();
        let tick = driver.status().current_tick;
        if tick != last_tick {
            advances += 1;
            last_tick = tick;
        }
    }

    let status = driver.status();
    println!(
        "after 2000 interrupts at ratio {:.2}: {} advances, resting on tick {}",
        status.speed_ratio.value(),
        advances,
        status.current_tick
    );

    driver.shutdown().expect("shutdown");
}
