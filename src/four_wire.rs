//! Pressure estimation for four-wire resistive panels.
//!
//! A four-wire panel is read by driving one plate and sampling the other with
//! an ADC. Besides X and Y, two cross-plate readings (`z1`, `z2`) give the
//! touch resistance, which is what the resistive adapter treats as raw Z:
//! a firmer press means lower resistance.
//!
//! Pin sequencing and ADC access are platform specific, so they live behind
//! [`FourWirePanel`]; [`FourWire`] turns its readings into a
//! [`ResistiveDriver`].

use crate::config::{DEFAULT_X_PLATE_OHMS, ResistiveConfig};
use crate::point::TouchPoint;
use crate::resistive::ResistiveDriver;

/// Full-scale count of the 10-bit ADC the plate readings come from
pub const ADC_FULL_SCALE: u32 = 1024;

/// One set of plate readings, each on a 10-bit scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FourWireReading {
    pub x: u16,
    pub y: u16,
    pub z1: u16,
    pub z2: u16,
}

/// Platform access to the four panel pins
pub trait FourWirePanel {
    type Error: core::fmt::Debug;

    fn sample(&mut self) -> Result<FourWireReading, Self::Error>;
}

/// Touch resistance from a plate reading.
///
/// `ohms · x / 1024 · (z2 / z1 − 1)`. With no known plate resistance the
/// cross-plate difference is inverted instead. `z1 == 0` means no contact.
pub fn touch_resistance(reading: &FourWireReading, x_plate_ohms: u16) -> u16 {
    if reading.z1 == 0 {
        return 0;
    }

    let z1 = reading.z1 as u64;
    let z2 = reading.z2 as u64;

    if x_plate_ohms == 0 {
        let span = z2.saturating_sub(z1);
        return (ADC_FULL_SCALE as u64 - 1).saturating_sub(span) as u16;
    }

    // z2 / z1 - 1 == (z2 - z1) / z1; kept in integers to avoid floats on MCUs.
    let resistance = x_plate_ohms as u64 * reading.x as u64 * z2.saturating_sub(z1)
        / (ADC_FULL_SCALE as u64 * z1);
    resistance.min(u16::MAX as u64) as u16
}

/// [`ResistiveDriver`] over a [`FourWirePanel`]
pub struct FourWire<P> {
    panel: P,
    x_plate_ohms: u16,
}

impl<P> FourWire<P>
where
    P: FourWirePanel,
{
    /// `x_plate_ohms` is the resistance measured across the X plate.
    pub fn new(panel: P, x_plate_ohms: u16) -> Self {
        Self {
            panel,
            x_plate_ohms,
        }
    }

    pub fn with_default_plate(panel: P) -> Self {
        Self::new(panel, DEFAULT_X_PLATE_OHMS)
    }

    pub fn from_config(panel: P, config: &ResistiveConfig) -> Self {
        Self::new(panel, config.x_plate_ohms)
    }

    pub fn x_plate_ohms(&self) -> u16 {
        self.x_plate_ohms
    }

    pub fn release(self) -> P {
        self.panel
    }
}

impl<P> ResistiveDriver for FourWire<P>
where
    P: FourWirePanel,
{
    type Error = P::Error;

    fn read_point(&mut self) -> Result<TouchPoint, P::Error> {
        let reading = self.panel.sample()?;
        let z = touch_resistance(&reading, self.x_plate_ohms);
        Ok(TouchPoint::new(reading.x, reading.y, z))
    }
}
