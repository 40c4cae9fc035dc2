//! Hardware-agnostic touch screen adapters
//!
//! Normalizes capacitive and resistive touch panels into display pixel
//! coordinates that follow the display's rotation, so an application can swap
//! touch hardware without touching its input handling.
//!
//! # Architecture
//!
//! ```text
//! Application
//!     │  set_rotation / touch_point
//!     ▼
//! ┌──────────────────────────┐
//! │   TouchScreen (trait)    │  geometry + rotation
//! └──────┬────────────┬──────┘
//!        ▼            ▼
//! ┌────────────┐ ┌────────────┐
//! │ Capacitive │ │ Resistive  │  calibration + mapping
//! └─────┬──────┘ └─────┬──────┘
//!       ▼              ▼
//!   FT62xx (I2C)   four-wire panel
//! ```
//!
//! It is `no_std` so it builds for microcontrollers and for desktop hosts
//! (the simulator and tests).

#![cfg_attr(not(test), no_std)]

pub mod adapter;
pub mod calibration;
pub mod capacitive;
pub mod config;
pub mod error;
pub mod four_wire;
pub mod ft6206;
pub mod geometry;
pub mod mapping;
pub mod point;
pub mod resistive;

#[cfg(test)]
mod testing;

// Re-export main types
pub use adapter::{TouchScreen, TouchScreenWrapper};
pub use calibration::CalibrationTracker;
pub use capacitive::{CapacitiveDriver, CapacitiveTouchScreen};
pub use config::{Calibration, CalibrationRange, CapacitiveConfig, ResistiveConfig};
pub use error::{TouchError, TouchResult};
pub use geometry::{Geometry, Rotation};
pub use point::TouchPoint;
pub use resistive::{ResistiveDriver, ResistiveTouchScreen, Sample};
