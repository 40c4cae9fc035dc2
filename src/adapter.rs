//! The contract every touch screen adapter implements, and a closed wrapper
//! over the concrete adapters.
//!
//! # TouchScreen trait
//!
//! [`TouchScreen`] owns the rotation/geometry state machine and the polling
//! operations. Applications hold `&mut dyn TouchScreen` (or a generic `T:
//! TouchScreen`) and never depend on which panel is fitted:
//!
//! 1. **`begin`**: once, before the first poll.
//! 2. **`set_display_width` / `set_display_height`**: once, to the native
//!    size of the display.
//! 3. **`set_rotation`**: whenever the display rotation changes.
//! 4. **`touch_point`**: once per loop iteration.
//!
//! # TouchScreenWrapper
//!
//! [`TouchScreenWrapper`] stores either concrete adapter in one type so the
//! panel can be picked at configuration time without trait objects.

use log::debug;

use crate::capacitive::{CapacitiveDriver, CapacitiveTouchScreen};
use crate::error::TouchResult;
use crate::geometry::{Geometry, Rotation};
use crate::point::TouchPoint;
use crate::resistive::{ResistiveDriver, ResistiveTouchScreen};

// ---------------------------------------------------------------------------
// TouchScreen trait
// ---------------------------------------------------------------------------

/// A touch panel that reports points in display pixel coordinates.
pub trait TouchScreen {
    /// Current native size and rotation.
    fn geometry(&self) -> &Geometry;

    /// Mutable access for the provided geometry setters.
    fn geometry_mut(&mut self) -> &mut Geometry;

    /// Initialize the underlying driver.
    ///
    /// Adapters whose driver needs no initialization always return `Ok`.
    fn begin(&mut self) -> TouchResult<()>;

    /// Read one sample mapped to display pixels for the current rotation.
    ///
    /// `z == 0` means not touched.
    fn touch_point(&mut self) -> TouchResult<TouchPoint>;

    /// Read one sample exactly as the driver reports it.
    ///
    /// Unrotated and uncalibrated, returned whatever the pressure. Used to
    /// work out calibration bounds and to debug axis orientation.
    fn touch_point_raw(&mut self) -> TouchResult<TouchPoint>;

    /// Set the native (unrotated) display width in pixels.
    fn set_display_width(&mut self, width: u16) {
        let geometry = self.geometry_mut();
        geometry.set_native_width(width);
        debug!(
            "Touch display width set to {} ({}x{} rotated)",
            width,
            geometry.display_width(),
            geometry.display_height()
        );
    }

    /// Set the native (unrotated) display height in pixels.
    fn set_display_height(&mut self, height: u16) {
        let geometry = self.geometry_mut();
        geometry.set_native_height(height);
        debug!(
            "Touch display height set to {} ({}x{} rotated)",
            height,
            geometry.display_width(),
            geometry.display_height()
        );
    }

    /// Set the rotation, following the display convention:
    ///
    /// - 0 = native orientation
    /// - 1 = 90 degrees from native
    /// - 2 = 180 degrees from native
    /// - 3 = 270 degrees from native
    ///
    /// Only the low two bits of `r` are used.
    fn set_rotation(&mut self, r: u8) {
        let geometry = self.geometry_mut();
        geometry.set_rotation(Rotation::from_index(r));
        debug!(
            "Touch rotation set to {:?} ({}x{})",
            geometry.rotation(),
            geometry.display_width(),
            geometry.display_height()
        );
    }

    fn rotation(&self) -> Rotation {
        self.geometry().rotation()
    }

    /// Rotated display width in pixels.
    fn display_width(&self) -> u16 {
        self.geometry().display_width()
    }

    /// Rotated display height in pixels.
    fn display_height(&self) -> u16 {
        self.geometry().display_height()
    }
}

// ---------------------------------------------------------------------------
// Blanket impl: &mut T where T: TouchScreen
// ---------------------------------------------------------------------------

/// Lets a borrowed adapter be passed anywhere a `TouchScreen` is expected.
impl<T: TouchScreen + ?Sized> TouchScreen for &mut T {
    fn geometry(&self) -> &Geometry {
        (**self).geometry()
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        (**self).geometry_mut()
    }

    fn begin(&mut self) -> TouchResult<()> {
        (**self).begin()
    }

    fn touch_point(&mut self) -> TouchResult<TouchPoint> {
        (**self).touch_point()
    }

    fn touch_point_raw(&mut self) -> TouchResult<TouchPoint> {
        (**self).touch_point_raw()
    }
}

// ---------------------------------------------------------------------------
// TouchScreenWrapper
// ---------------------------------------------------------------------------

/// One of the concrete adapters, chosen at configuration time.
pub enum TouchScreenWrapper<C, R> {
    Capacitive(CapacitiveTouchScreen<C>),
    Resistive(ResistiveTouchScreen<R>),
}

impl<C, R> From<CapacitiveTouchScreen<C>> for TouchScreenWrapper<C, R> {
    fn from(value: CapacitiveTouchScreen<C>) -> Self {
        Self::Capacitive(value)
    }
}

impl<C, R> From<ResistiveTouchScreen<R>> for TouchScreenWrapper<C, R> {
    fn from(value: ResistiveTouchScreen<R>) -> Self {
        Self::Resistive(value)
    }
}

impl<C, R> TouchScreen for TouchScreenWrapper<C, R>
where
    C: CapacitiveDriver,
    R: ResistiveDriver,
{
    fn geometry(&self) -> &Geometry {
        match self {
            TouchScreenWrapper::Capacitive(screen) => screen.geometry(),
            TouchScreenWrapper::Resistive(screen) => screen.geometry(),
        }
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        match self {
            TouchScreenWrapper::Capacitive(screen) => screen.geometry_mut(),
            TouchScreenWrapper::Resistive(screen) => screen.geometry_mut(),
        }
    }

    fn begin(&mut self) -> TouchResult<()> {
        match self {
            TouchScreenWrapper::Capacitive(screen) => screen.begin(),
            TouchScreenWrapper::Resistive(screen) => screen.begin(),
        }
    }

    fn touch_point(&mut self) -> TouchResult<TouchPoint> {
        match self {
            TouchScreenWrapper::Capacitive(screen) => screen.touch_point(),
            TouchScreenWrapper::Resistive(screen) => screen.touch_point(),
        }
    }

    fn touch_point_raw(&mut self) -> TouchResult<TouchPoint> {
        match self {
            TouchScreenWrapper::Capacitive(screen) => screen.touch_point_raw(),
            TouchScreenWrapper::Resistive(screen) => screen.touch_point_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCapacitive, FakeResistive};

    type Wrapper = TouchScreenWrapper<FakeCapacitive, FakeResistive>;

    fn poll(screen: &mut dyn TouchScreen) -> TouchPoint {
        screen.touch_point().unwrap()
    }

    #[test]
    fn test_dyn_dispatch_over_both_variants() {
        let mut capacitive = CapacitiveTouchScreen::new(FakeCapacitive::new(10, 20, 5), 128);
        let mut resistive = ResistiveTouchScreen::new(FakeResistive::new(500, 500, 500));

        assert_eq!(poll(&mut capacitive), TouchPoint::new(230, 300, 5));
        assert_eq!(poll(&mut resistive).x, 120);
    }

    #[test]
    fn test_wrapper_delegates_geometry() {
        let mut screen: Wrapper = CapacitiveTouchScreen::new(FakeCapacitive::new(0, 0, 0), 128).into();
        screen.set_display_width(480);
        screen.set_rotation(1);

        assert_eq!(screen.rotation(), Rotation::Deg90);
        assert_eq!(screen.display_width(), 320);
        assert_eq!(screen.display_height(), 480);
    }

    #[test]
    fn test_wrapper_delegates_polling() {
        let mut screen: Wrapper = ResistiveTouchScreen::new(FakeResistive::new(50, 500, 500)).into();
        assert!(screen.begin().is_ok());
        assert_eq!(screen.touch_point().unwrap(), TouchPoint::NONE);
        assert_eq!(screen.touch_point_raw().unwrap(), TouchPoint::new(50, 500, 500));
    }

    #[test]
    fn test_borrowed_adapter_is_a_touch_screen() {
        fn rotate<T: TouchScreen>(mut screen: T) {
            screen.set_rotation(6);
        }

        let mut screen = CapacitiveTouchScreen::new(FakeCapacitive::new(0, 0, 0), 128);
        rotate(&mut screen);
        assert_eq!(screen.rotation(), Rotation::Deg180);
    }
}
