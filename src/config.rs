use serde::{Deserialize, Serialize};

use crate::geometry::{DEFAULT_NATIVE_HEIGHT, DEFAULT_NATIVE_WIDTH};

/// Raw reading bounds considered a valid touch on one axis
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationRange {
    pub min: u16,
    pub max: u16,
}

impl CalibrationRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// Strictly inside the range; values equal to a bound are rejected
    pub const fn contains(&self, raw: u16) -> bool {
        raw > self.min && raw < self.max
    }
}

/// Per-axis raw bounds for a resistive panel
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub x: CalibrationRange,
    pub y: CalibrationRange,
    pub z: CalibrationRange,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            x: CalibrationRange::new(100, 900),
            y: CalibrationRange::new(100, 900),
            z: CalibrationRange::new(1, 1023),
        }
    }
}

impl Calibration {
    /// Whether all three raw values fall strictly inside their ranges
    pub const fn accepts(&self, x: u16, y: u16, z: u16) -> bool {
        self.z.contains(z) && self.x.contains(x) && self.y.contains(y)
    }
}

/// FT62xx default touch threshold
pub const DEFAULT_THRESHOLD: u8 = 128;
/// FT62xx default I2C address
pub const DEFAULT_I2C_ADDR: u8 = 0x38;
/// Default resistance across the X plate in ohms
pub const DEFAULT_X_PLATE_OHMS: u16 = 300;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitiveConfig {
    pub threshold: u8,
    pub address: u8,
}

impl Default for CapacitiveConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            address: DEFAULT_I2C_ADDR,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResistiveConfig {
    pub x_plate_ohms: u16,
    pub native_width: u16,
    pub native_height: u16,
    pub calibration: Calibration,
}

impl Default for ResistiveConfig {
    fn default() -> Self {
        Self {
            x_plate_ohms: DEFAULT_X_PLATE_OHMS,
            native_width: DEFAULT_NATIVE_WIDTH,
            native_height: DEFAULT_NATIVE_HEIGHT,
            calibration: Calibration::default(),
        }
    }
}
