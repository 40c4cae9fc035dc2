//! Display geometry and rotation state shared by all adapters
//!
//! A [`Geometry`] holds the native (unrotated) display size and the current
//! [`Rotation`]. The rotated width/height are never stored; they are derived
//! from those two values on every read, so they cannot drift out of sync.

use embedded_graphics::geometry::Size;
use serde::{Deserialize, Serialize};

/// Default native display width in pixels
pub const DEFAULT_NATIVE_WIDTH: u16 = 240;
/// Default native display height in pixels
pub const DEFAULT_NATIVE_HEIGHT: u16 = 320;

/// Quarter-turn rotation of the display relative to its native orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rotation {
    /// Native orientation
    #[default]
    Deg0 = 0,
    /// 90 degrees from native
    Deg90 = 1,
    /// 180 degrees from native
    Deg180 = 2,
    /// 270 degrees from native
    Deg270 = 3,
}

impl Rotation {
    /// Convert from the conventional 0..=3 index.
    ///
    /// Only the low two bits are significant, so any input is accepted.
    pub const fn from_index(r: u8) -> Self {
        match r & 0b11 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// The conventional 0..=3 index
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Odd rotations transpose the X and Y axes
    pub const fn swaps_axes(self) -> bool {
        self.index() % 2 == 1
    }

    /// Rotations that run the X axis in the sensor's direction (2 and 3)
    pub const fn reverses_x(self) -> bool {
        matches!(self, Self::Deg180 | Self::Deg270)
    }

    /// Rotations that run the Y axis in the sensor's direction (1 and 2)
    pub const fn reverses_y(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg180)
    }
}

impl From<u8> for Rotation {
    fn from(value: u8) -> Self {
        Self::from_index(value)
    }
}

/// Native display size plus rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    native_width: u16,
    native_height: u16,
    rotation: Rotation,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(DEFAULT_NATIVE_WIDTH, DEFAULT_NATIVE_HEIGHT)
    }
}

impl Geometry {
    /// Geometry for a display of the given native size, unrotated
    pub const fn new(native_width: u16, native_height: u16) -> Self {
        Self {
            native_width,
            native_height,
            rotation: Rotation::Deg0,
        }
    }

    pub fn set_native_width(&mut self, width: u16) {
        self.native_width = width;
    }

    pub fn set_native_height(&mut self, height: u16) {
        self.native_height = height;
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub const fn native_width(&self) -> u16 {
        self.native_width
    }

    pub const fn native_height(&self) -> u16 {
        self.native_height
    }

    /// Width of the display as the application sees it after rotation
    pub const fn display_width(&self) -> u16 {
        if self.rotation.swaps_axes() {
            self.native_height
        } else {
            self.native_width
        }
    }

    /// Height of the display as the application sees it after rotation
    pub const fn display_height(&self) -> u16 {
        if self.rotation.swaps_axes() {
            self.native_width
        } else {
            self.native_height
        }
    }

    pub fn display_size(&self) -> Size {
        Size::new(self.display_width() as u32, self.display_height() as u32)
    }

    /// Transpose a sensor-frame pair into the rotated frame when needed
    pub const fn orient(&self, x: u16, y: u16) -> (u16, u16) {
        if self.rotation.swaps_axes() {
            (y, x)
        } else {
            (x, y)
        }
    }
}
