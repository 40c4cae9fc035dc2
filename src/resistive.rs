//! Adapter for resistive panels that report raw analog readings.
//!
//! Raw X/Y/Z values are checked against a [`Calibration`] and then linearly
//! mapped to display pixels. The calibration has to be tuned for each screen
//! and MCU combination: poll `touch_point_raw()`, note the extremes at the
//! panel edges and feed them to the `set_min_raw_*`/`set_max_raw_*` setters
//! (or collect them with a [`CalibrationTracker`](crate::calibration::CalibrationTracker)).
//!
//! Pressure is mapped too, but the Z readings of resistive membranes are not
//! very repeatable.

use core::fmt::Debug;

use log::{debug, trace, warn};

use crate::adapter::TouchScreen;
use crate::config::{Calibration, ResistiveConfig};
use crate::error::{TouchError, TouchResult};
use crate::geometry::{DEFAULT_NATIVE_HEIGHT, DEFAULT_NATIVE_WIDTH, Geometry};
use crate::mapping::{map_pressure, map_to_pixel};
use crate::point::TouchPoint;

/// A resistive touch driver returning raw readings.
pub trait ResistiveDriver {
    type Error: Debug;

    /// Sample the panel once.
    fn read_point(&mut self) -> Result<TouchPoint, Self::Error>;
}

/// Outcome of a single resistive sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// No pressure on the panel
    Released,
    /// Raw values fell outside the calibration ranges
    Rejected(TouchPoint),
    /// Accepted and mapped to display pixels
    Touched(TouchPoint),
}

impl Sample {
    /// Collapse to a point, reporting rejected noise as no-touch
    pub fn point(self) -> TouchPoint {
        match self {
            Sample::Touched(point) => point,
            Sample::Released | Sample::Rejected(_) => TouchPoint::NONE,
        }
    }
}

/// Touch screen adapter for a [`ResistiveDriver`].
pub struct ResistiveTouchScreen<D> {
    driver: D,
    calibration: Calibration,
    geometry: Geometry,
}

impl<D> ResistiveTouchScreen<D>
where
    D: ResistiveDriver,
{
    /// Create an adapter for a 240x320 display with default calibration.
    pub fn new(driver: D) -> Self {
        Self::with_display_size(driver, DEFAULT_NATIVE_WIDTH, DEFAULT_NATIVE_HEIGHT)
    }

    /// Create an adapter for a display of the given native size.
    pub fn with_display_size(driver: D, native_width: u16, native_height: u16) -> Self {
        Self {
            driver,
            calibration: Calibration::default(),
            geometry: Geometry::new(native_width, native_height),
        }
    }

    /// Create an adapter with the display size and calibration in `config`.
    pub fn from_config(driver: D, config: &ResistiveConfig) -> Self {
        let mut screen = Self::with_display_size(driver, config.native_width, config.native_height);
        screen.calibration = config.calibration;
        screen
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn set_calibration(&mut self, calibration: Calibration) {
        debug!("Resistive calibration set to {:?}", calibration);
        self.calibration = calibration;
    }

    /// Set the minimum raw X value as reported by `touch_point_raw()`
    pub fn set_min_raw_x(&mut self, limit: u16) {
        self.calibration.x.min = limit;
    }

    /// Set the maximum raw X value as reported by `touch_point_raw()`
    pub fn set_max_raw_x(&mut self, limit: u16) {
        self.calibration.x.max = limit;
    }

    /// Set the minimum raw Y value as reported by `touch_point_raw()`
    pub fn set_min_raw_y(&mut self, limit: u16) {
        self.calibration.y.min = limit;
    }

    /// Set the maximum raw Y value as reported by `touch_point_raw()`
    pub fn set_max_raw_y(&mut self, limit: u16) {
        self.calibration.y.max = limit;
    }

    /// Set the minimum raw Z value as reported by `touch_point_raw()`
    pub fn set_min_raw_z(&mut self, limit: u16) {
        self.calibration.z.min = limit;
    }

    /// Set the maximum raw Z value as reported by `touch_point_raw()`
    pub fn set_max_raw_z(&mut self, limit: u16) {
        self.calibration.z.max = limit;
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give back the driver, consuming the adapter.
    pub fn release(self) -> D {
        self.driver
    }

    /// Read one sample and say whether it was accepted, rejected or released.
    pub fn sample(&mut self) -> TouchResult<Sample> {
        let raw = self.read()?;
        Ok(self.classify(raw))
    }

    fn read(&mut self) -> TouchResult<TouchPoint> {
        self.driver.read_point().map_err(|e| {
            warn!("Resistive touch read failed: {:?}", e);
            TouchError::Bus
        })
    }

    fn classify(&self, raw: TouchPoint) -> Sample {
        // Resistive membranes irregularly report a touch while at rest, so
        // all three axes have to sit inside the expected resistance range.
        if !self.calibration.accepts(raw.x, raw.y, raw.z) {
            if raw.is_touched() {
                trace!("Rejected resistive sample {:?}", raw);
                return Sample::Rejected(raw);
            }
            return Sample::Released;
        }
        Sample::Touched(self.map(raw))
    }

    fn map(&self, raw: TouchPoint) -> TouchPoint {
        let calibration = &self.calibration;
        let rotation = self.geometry.rotation();

        let z = map_pressure(raw.z, calibration.z.min, calibration.z.max);

        // Output axes keep their own ranges even when the inputs are swapped.
        let (x, y) = self.geometry.orient(raw.x, raw.y);

        let x = map_to_pixel(
            x,
            calibration.x.min,
            calibration.x.max,
            self.geometry.display_width(),
            rotation.reverses_x(),
        );
        let y = map_to_pixel(
            y,
            calibration.y.min,
            calibration.y.max,
            self.geometry.display_height(),
            rotation.reverses_y(),
        );

        TouchPoint::new(x, y, z)
    }
}

impl<D> TouchScreen for ResistiveTouchScreen<D>
where
    D: ResistiveDriver,
{
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    /// Resistive panels need no initialization.
    fn begin(&mut self) -> TouchResult<()> {
        Ok(())
    }

    fn touch_point(&mut self) -> TouchResult<TouchPoint> {
        Ok(self.sample()?.point())
    }

    fn touch_point_raw(&mut self) -> TouchResult<TouchPoint> {
        self.read()
    }
}
