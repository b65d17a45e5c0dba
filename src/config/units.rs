//! Unit types for physical quantities.
//!
//! Provides type-safe representations of angles, angular velocities, and the
//! commanded speed ratio to prevent unit confusion at compile time.

use core::ops::{Add, Mul, Neg, Sub};

use serde::Deserialize;

/// Angular position in degrees.
///
/// Positive values rotate clockwise facing the motor, negative values
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Magnitude of the angle.
    #[inline]
    pub fn abs(self) -> f32 {
        libm::fabsf(self.0)
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Degrees {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Angular velocity in degrees per second.
///
/// The sign selects the rotation direction, as with [`Degrees`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct DegreesPerSec(pub f32);

impl DegreesPerSec {
    /// Create a new DegreesPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Magnitude of the velocity.
    #[inline]
    pub fn abs(self) -> f32 {
        libm::fabsf(self.0)
    }
}

impl Mul<f32> for DegreesPerSec {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Fraction of the maximum step rate currently requested.
///
/// Clamped to `[0.0, 1.0]` at construction; a ratio of zero holds the motor
/// on its current phase pattern.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedRatio(f32);

impl SpeedRatio {
    /// Full speed (the motor's maximum step rate).
    pub const FULL: Self = Self(1.0);

    /// Zero speed: the scheduler runs but never advances.
    pub const HOLD: Self = Self(0.0);

    /// Create a ratio, clamping out-of-range values into `[0.0, 1.0]`.
    ///
    /// NaN clamps to zero.
    pub fn clamped(value: f32) -> Self {
        if value >= 1.0 {
            Self::FULL
        } else if value > 0.0 {
            Self(value)
        } else {
            Self::HOLD
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Whether this ratio holds the motor in place.
    #[inline]
    pub fn is_hold(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for SpeedRatio {
    fn default() -> Self {
        Self::HOLD
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Degrees.
    fn degrees(self) -> Degrees;
    /// Convert to DegreesPerSec.
    fn degrees_per_sec(self) -> DegreesPerSec;
}

impl UnitExt for f32 {
    #[inline]
    fn degrees(self) -> Degrees {
        Degrees(self)
    }

    #[inline]
    fn degrees_per_sec(self) -> DegreesPerSec {
        DegreesPerSec(self)
    }
}
