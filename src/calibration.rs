//! Helper for the manual resistive calibration sweep.
//!
//! Drag a stylus along all four edges of the panel while feeding every
//! `touch_point_raw()` sample to a [`CalibrationTracker`], then apply the
//! resulting [`Calibration`] to the adapter:
//!
//! ```ignore
//! let mut tracker = CalibrationTracker::new();
//! while sweeping {
//!     tracker.record(screen.touch_point_raw()?);
//! }
//! if let Some(calibration) = tracker.calibration(10) {
//!     screen.set_calibration(calibration);
//! }
//! ```

use log::debug;

use crate::config::{Calibration, CalibrationRange};
use crate::point::TouchPoint;

/// Running extremes of one raw axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extent {
    min: u16,
    max: u16,
}

impl Extent {
    const fn at(value: u16) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    fn include(&mut self, value: u16) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Widen by `margin` on both sides so the observed extremes pass the
    /// strict range check.
    fn widened(&self, margin: u16) -> CalibrationRange {
        CalibrationRange::new(
            self.min.saturating_sub(margin),
            self.max.saturating_add(margin),
        )
    }
}

/// Collects raw extremes over touched samples
#[derive(Debug, Clone, Default)]
pub struct CalibrationTracker {
    extents: Option<[Extent; 3]>,
    samples: u32,
}

impl CalibrationTracker {
    pub const fn new() -> Self {
        Self {
            extents: None,
            samples: 0,
        }
    }

    /// Record a raw sample. Untouched samples (`z == 0`) are ignored.
    pub fn record(&mut self, raw: TouchPoint) {
        if !raw.is_touched() {
            return;
        }
        match &mut self.extents {
            Some([x, y, z]) => {
                x.include(raw.x);
                y.include(raw.y);
                z.include(raw.z);
            }
            None => {
                self.extents = Some([Extent::at(raw.x), Extent::at(raw.y), Extent::at(raw.z)]);
            }
        }
        self.samples += 1;
    }

    /// Number of touched samples recorded
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Calibration covering every recorded sample, widened by `margin`.
    ///
    /// `None` until at least one touched sample has been recorded.
    pub fn calibration(&self, margin: u16) -> Option<Calibration> {
        let [x, y, z] = self.extents?;
        let calibration = Calibration {
            x: x.widened(margin),
            y: y.widened(margin),
            z: z.widened(margin),
        };
        debug!(
            "Calibration from {} samples: {:?}",
            self.samples, calibration
        );
        Some(calibration)
    }
}
