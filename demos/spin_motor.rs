//! Basic motor control example.
//!
//! Demonstrates binding an H-bridge driver to mock hardware, issuing a
//! deferred move, and pumping the timer interrupt by hand to watch the phase
//! table walk.
//!
//! On a real target the four pins come from your chip HAL, `TickTimer` wraps
//! a hardware timer, and `on_timer_tick` is called from its interrupt handler.

use stepper_hbridge::{
    ClockMonitor, HBridgeBuilder, MotorProfile, Peripheral, StepperDriver, TickTimer, UnitExt,
};

/// Mock output pin for demonstration.
struct MockPin {
    label: &'static str,
    state: bool,
}

impl MockPin {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            state: false,
        }
    }
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.state {
            println!("  {} -> HIGH", self.label);
        }
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.state {
            println!("  {} -> low", self.label);
        }
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

/// Mock periodic timer: always reports a pending update.
struct MockTimer;

impl TickTimer for MockTimer {
    type Error = core::convert::Infallible;

    fn start_periodic(&mut self, period_us: u32, priority: u8) -> Result<(), Self::Error> {
        println!("timer started: {} us cadence, priority {}", period_us, priority);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        println!("timer stopped");
        Ok(())
    }

    fn is_update_pending(&self) -> bool {
        true
    }

    fn acknowledge(&mut self) {}
}

/// Mock clock tree with everything running.
struct MockClocks;

impl ClockMonitor for MockClocks {
    fn is_clock_enabled(&self, _peripheral: Peripheral) -> bool {
        true
    }
}

fn main() {
    println!("=== H-Bridge Stepper Example ===\n");

    let mut driver = HBridgeBuilder::new()
        .phase_a_positive(MockPin::new("A+"))
        .phase_a_negative(MockPin::new("A-"))
        .phase_b_positive(MockPin::new("B+"))
        .phase_b_negative(MockPin::new("B-"))
        .timer(MockTimer)
        .interrupt_period_us(121)
        .name("demo")
        .build()
        .expect("all hardware bound");

    let profile = MotorProfile::byj48();
    println!(
        "profile: {} ({} steps/rev, {} RPM max)\n",
        profile.name, profile.steps_per_revolution, profile.max_speed_rpm
    );

    driver
        .initialize(&profile, &MockClocks)
        .expect("clocks are running");

    let timing = driver.timing().unwrap();
    println!(
        "\ntiming: {} us/step, {} ticks/cycle, {} us/tick\n",
        timing.us_per_step, timing.ticks_per_cycle, timing.us_per_tick
    );

    // Deferred command: returns immediately, motion happens per interrupt
    driver
        .step_by_angle(0.702f32.degrees())
        .expect("driver initialized");
    println!("commanded 0.702 degrees ({:?})\n", driver.status().motion);

    let mut interrupts = 0;
    while driver.status().motion.is_active() {
        driver.on_timer_tick();
        interrupts += 1;
    }

    let status = driver.status();
    println!(
        "\ndone after {} interrupts: tick {}, {} overruns, {} pin faults",
        interrupts, status.current_tick, status.overruns, status.pin_faults
    );

    driver.shutdown().expect("shutdown");
}
