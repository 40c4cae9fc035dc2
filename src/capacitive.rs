//! Adapter for capacitive controllers that report pixel coordinates directly.
//!
//! Controllers in the FT62xx family report X and Y in pixels, but with both
//! axes running backwards relative to the display (higher numbers are up and
//! left). The adapter only has to transpose the axes for odd rotations and
//! mirror them back, so the native display size *must* be set when it is not
//! the default 240x320.

use core::fmt::Debug;

use log::{error, info, warn};

use crate::adapter::TouchScreen;
use crate::config::CapacitiveConfig;
use crate::error::{TouchError, TouchResult};
use crate::geometry::Geometry;
use crate::point::TouchPoint;

/// A capacitive touch controller driver.
///
/// The driver owns its bus handle and address.
pub trait CapacitiveDriver {
    type Error: Debug;

    /// Initialize the controller with the given touch threshold.
    fn begin(&mut self, threshold: u8) -> Result<(), Self::Error>;

    /// Read the primary touch point in sensor pixel coordinates.
    fn read_point(&mut self) -> Result<TouchPoint, Self::Error>;

    /// Classify a driver error for the adapter layer.
    ///
    /// Defaults to a bus failure.
    fn classify(_error: &Self::Error) -> TouchError {
        TouchError::Bus
    }
}

/// Touch screen adapter for a [`CapacitiveDriver`].
pub struct CapacitiveTouchScreen<D> {
    driver: D,
    threshold: u8,
    geometry: Geometry,
}

impl<D> CapacitiveTouchScreen<D>
where
    D: CapacitiveDriver,
{
    /// Create an adapter for a 240x320 display in native orientation.
    ///
    /// Call `set_display_width()`/`set_display_height()` for any other size.
    pub fn new(driver: D, threshold: u8) -> Self {
        Self {
            driver,
            threshold,
            geometry: Geometry::default(),
        }
    }

    /// Create an adapter using the threshold from `config`.
    ///
    /// The address in `config` is for constructing the driver itself.
    pub fn from_config(driver: D, config: &CapacitiveConfig) -> Self {
        Self::new(driver, config.threshold)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Takes effect on the next `begin()`
    pub fn set_threshold(&mut self, threshold: u8) {
        self.threshold = threshold;
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Give back the driver, consuming the adapter.
    pub fn release(self) -> D {
        self.driver
    }

    fn read(&mut self) -> TouchResult<TouchPoint> {
        self.driver.read_point().map_err(|e| {
            warn!("Capacitive touch read failed: {:?}", e);
            D::classify(&e)
        })
    }

    /// Undo the sensor's transposition and mirroring for the current rotation.
    fn map(&self, raw: TouchPoint) -> TouchPoint {
        let rotation = self.geometry.rotation();
        let (x, y) = self.geometry.orient(raw.x, raw.y);

        // Both axes are reported backwards.
        let x = if rotation.reverses_x() {
            x
        } else {
            self.geometry.display_width().saturating_sub(x)
        };
        let y = if rotation.reverses_y() {
            y
        } else {
            self.geometry.display_height().saturating_sub(y)
        };

        TouchPoint::new(x, y, raw.z)
    }
}

impl<D> TouchScreen for CapacitiveTouchScreen<D>
where
    D: CapacitiveDriver,
{
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    fn begin(&mut self) -> TouchResult<()> {
        match self.driver.begin(self.threshold) {
            Ok(()) => {
                info!("Capacitive touch ready (threshold {})", self.threshold);
                Ok(())
            }
            Err(e) => {
                error!("Capacitive touch init failed: {:?}", e);
                Err(D::classify(&e))
            }
        }
    }

    fn touch_point(&mut self) -> TouchResult<TouchPoint> {
        let raw = self.read()?;
        Ok(self.map(raw))
    }

    /// For FT62xx panels X and Y come back reversed: low values are bottom
    /// and right.
    fn touch_point_raw(&mut self) -> TouchResult<TouchPoint> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCapacitive;

    fn screen(x: u16, y: u16, z: u16) -> CapacitiveTouchScreen<FakeCapacitive> {
        CapacitiveTouchScreen::new(FakeCapacitive::new(x, y, z), 128)
    }

    #[test]
    fn test_rotation_0_mirrors_both_axes() {
        let mut screen = screen(10, 20, 5);
        assert_eq!(screen.touch_point().unwrap(), TouchPoint::new(230, 300, 5));
    }

    #[test]
    fn test_rotation_1_swaps_then_mirrors_x() {
        let mut screen = screen(10, 20, 5);
        screen.set_rotation(1);
        assert_eq!(screen.display_width(), 320);
        assert_eq!(screen.display_height(), 240);
        // Swapped to (20, 10); x mirrored against 320, y kept.
        assert_eq!(screen.touch_point().unwrap(), TouchPoint::new(300, 10, 5));
    }

    #[test]
    fn test_rotation_2_keeps_both_axes() {
        let mut screen = screen(10, 20, 5);
        screen.set_rotation(2);
        assert_eq!(screen.touch_point().unwrap(), TouchPoint::new(10, 20, 5));
    }

    #[test]
    fn test_rotation_3_swaps_then_mirrors_y() {
        let mut screen = screen(10, 20, 5);
        screen.set_rotation(3);
        // Swapped to (20, 10); x kept, y mirrored against 240.
        assert_eq!(screen.touch_point().unwrap(), TouchPoint::new(20, 230, 5));
    }

    #[test]
    fn test_custom_native_size() {
        let mut screen = screen(10, 20, 1);
        screen.set_display_width(320);
        screen.set_display_height(480);
        assert_eq!(screen.touch_point().unwrap(), TouchPoint::new(310, 460, 1));
    }

    #[test]
    fn test_reading_beyond_display_saturates() {
        let mut screen = screen(300, 400, 1);
        assert_eq!(screen.touch_point().unwrap(), TouchPoint::new(0, 0, 1));
    }

    #[test]
    fn test_raw_is_untransformed() {
        let mut screen = screen(10, 20, 5);
        screen.set_rotation(1);
        assert_eq!(screen.touch_point_raw().unwrap(), TouchPoint::new(10, 20, 5));
    }

    #[test]
    fn test_begin_passes_threshold() {
        let mut screen = screen(0, 0, 0);
        screen.set_threshold(40);
        assert!(screen.begin().is_ok());
        assert_eq!(screen.driver().begun_with, Some(40));
    }

    #[test]
    fn test_begin_failure_is_reported() {
        let mut screen = CapacitiveTouchScreen::new(FakeCapacitive::failing(), 128);
        assert_eq!(screen.begin(), Err(TouchError::Bus));
    }

    #[test]
    fn test_read_failure_is_reported() {
        let mut screen = CapacitiveTouchScreen::new(FakeCapacitive::failing(), 128);
        assert_eq!(screen.touch_point(), Err(TouchError::Bus));
        assert_eq!(screen.touch_point_raw(), Err(TouchError::Bus));
    }

    #[test]
    fn test_from_config() {
        let config = CapacitiveConfig {
            threshold: 64,
            ..Default::default()
        };
        let screen = CapacitiveTouchScreen::from_config(FakeCapacitive::new(0, 0, 0), &config);
        assert_eq!(screen.threshold(), 64);
    }
}
