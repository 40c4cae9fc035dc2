//! The touch sample handed back to applications

use embedded_graphics::geometry::Point;

/// A touch sample: `x`/`y` in display pixels plus `z` as pressure.
///
/// `z == 0` means the panel is not touched, in which case `x` and `y` are
/// zero. Mapped points carry pressure in `1..=255`; raw points carry whatever
/// the driver reported, which is why `z` is wider than a byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TouchPoint {
    /// Mapped 0 to display width - 1
    pub x: u16,
    /// Mapped 0 to display height - 1
    pub y: u16,
    /// Pressure, 0 = not touched
    pub z: u16,
}

impl TouchPoint {
    /// The no-touch sample
    pub const NONE: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }

    /// Whether this sample reports contact with the panel
    pub const fn is_touched(&self) -> bool {
        self.z != 0
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

impl From<TouchPoint> for Point {
    fn from(value: TouchPoint) -> Self {
        value.to_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_not_touched() {
        assert!(!TouchPoint::NONE.is_touched());
        assert_eq!(TouchPoint::default(), TouchPoint::NONE);
    }

    #[test]
    fn test_pressure_marks_touch() {
        let point = TouchPoint::new(12, 34, 1);
        assert!(point.is_touched());
    }

    #[test]
    fn test_into_graphics_point() {
        let point: Point = TouchPoint::new(239, 319, 80).into();
        assert_eq!(point, Point::new(239, 319));
    }
}
