//! Fake drivers for unit tests

use crate::capacitive::CapacitiveDriver;
use crate::point::TouchPoint;
use crate::resistive::ResistiveDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError;

/// Capacitive driver that reports a fixed point
pub struct FakeCapacitive {
    pub point: TouchPoint,
    pub begun_with: Option<u8>,
    fail: bool,
}

impl FakeCapacitive {
    pub fn new(x: u16, y: u16, z: u16) -> Self {
        Self {
            point: TouchPoint::new(x, y, z),
            begun_with: None,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0, 0, 0)
        }
    }
}

impl CapacitiveDriver for FakeCapacitive {
    type Error = FakeBusError;

    fn begin(&mut self, threshold: u8) -> Result<(), FakeBusError> {
        if self.fail {
            return Err(FakeBusError);
        }
        self.begun_with = Some(threshold);
        Ok(())
    }

    fn read_point(&mut self) -> Result<TouchPoint, FakeBusError> {
        if self.fail {
            return Err(FakeBusError);
        }
        Ok(self.point)
    }
}

/// Resistive driver that reports a fixed raw reading
pub struct FakeResistive {
    pub point: TouchPoint,
    fail: bool,
}

impl FakeResistive {
    pub fn new(x: u16, y: u16, z: u16) -> Self {
        Self {
            point: TouchPoint::new(x, y, z),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0, 0, 0)
        }
    }
}

impl ResistiveDriver for FakeResistive {
    type Error = FakeBusError;

    fn read_point(&mut self) -> Result<TouchPoint, FakeBusError> {
        if self.fail {
            return Err(FakeBusError);
        }
        Ok(self.point)
    }
}
