//! Desktop simulator for the touch-adapter mapping.
//!
//! Mouse clicks stand in for a finger on the glass. Each click is turned into
//! the raw reading a real panel would produce (a reverse-mounted FT62xx or an
//! uncalibrated resistive membrane), fed through the adapter, and the mapped
//! point is drawn as a crosshair. If the adapter is right, the crosshair lands
//! under the cursor for every rotation.
//!
//! # Key bindings
//!
//! | Key   | Action                             |
//! |-------|------------------------------------|
//! | 0-3   | Set rotation                       |
//! | C     | Use the capacitive panel           |
//! | R     | Use the resistive panel            |
//! | P     | Print calibration from raw clicks  |
//! | A     | Apply that calibration (resistive) |
//! | Q     | Quit                               |

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{info, warn};

use touch_adapter::{
    Calibration, CalibrationTracker, CapacitiveDriver, CapacitiveTouchScreen, Geometry,
    ResistiveConfig, ResistiveDriver, ResistiveTouchScreen, Rotation, TouchPoint, TouchScreen,
    TouchScreenWrapper,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const NATIVE_WIDTH: u16 = 240;
const NATIVE_HEIGHT: u16 = 320;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Mapped points further than this from the cursor are reported.
const MAX_ERROR_PX: i32 = 3;

/// Finger position in native (unrotated) display pixels, shared with the mock panels.
type Finger = Rc<Cell<Option<(u16, u16)>>>;

// ---------------------------------------------------------------------------
// Mock panels
// ---------------------------------------------------------------------------

/// FT62xx mounted so both axes run backwards relative to the display.
struct MockCapacitive {
    finger: Finger,
}

impl CapacitiveDriver for MockCapacitive {
    type Error = Infallible;

    fn begin(&mut self, threshold: u8) -> Result<(), Infallible> {
        info!("Mock FT62xx initialized (threshold {})", threshold);
        Ok(())
    }

    fn read_point(&mut self) -> Result<TouchPoint, Infallible> {
        Ok(match self.finger.get() {
            Some((nx, ny)) => TouchPoint::new(
                NATIVE_WIDTH.saturating_sub(nx),
                NATIVE_HEIGHT.saturating_sub(ny),
                1,
            ),
            None => TouchPoint::NONE,
        })
    }
}

/// Resistive membrane whose raw span is wider than the default calibration.
struct MockResistive {
    finger: Finger,
    span: Calibration,
}

impl MockResistive {
    fn raw(position: u16, extent: u16, lo: u16, hi: u16) -> u16 {
        let usable = hi.saturating_sub(lo).saturating_sub(2) as u32;
        lo + 1 + (position as u32 * usable / extent.max(1) as u32) as u16
    }
}

impl ResistiveDriver for MockResistive {
    type Error = Infallible;

    fn read_point(&mut self) -> Result<TouchPoint, Infallible> {
        Ok(match self.finger.get() {
            Some((nx, ny)) => TouchPoint::new(
                Self::raw(nx, NATIVE_WIDTH, self.span.x.min, self.span.x.max),
                Self::raw(ny, NATIVE_HEIGHT, self.span.y.min, self.span.y.max),
                (self.span.z.min + self.span.z.max) / 2,
            ),
            None => TouchPoint::NONE,
        })
    }
}

type SimScreen = TouchScreenWrapper<MockCapacitive, MockResistive>;

fn resistive_span() -> Calibration {
    let mut span = Calibration::default();
    span.x.min = 80;
    span.x.max = 940;
    span.y.min = 60;
    span.y.max = 960;
    span
}

fn create_screen(capacitive: bool, finger: &Finger, rotation: Rotation) -> SimScreen {
    let mut screen: SimScreen = if capacitive {
        CapacitiveTouchScreen::new(
            MockCapacitive {
                finger: finger.clone(),
            },
            128,
        )
        .into()
    } else {
        let config = ResistiveConfig {
            native_width: NATIVE_WIDTH,
            native_height: NATIVE_HEIGHT,
            ..Default::default()
        };
        ResistiveTouchScreen::from_config(
            MockResistive {
                finger: finger.clone(),
                span: resistive_span(),
            },
            &config,
        )
        .into()
    };

    screen.set_display_width(NATIVE_WIDTH);
    screen.set_display_height(NATIVE_HEIGHT);
    screen.set_rotation(rotation.index());
    if let Err(e) = screen.begin() {
        warn!("Touch init failed: {}", e);
    }
    screen
}

// ---------------------------------------------------------------------------
// Coordinate helpers
// ---------------------------------------------------------------------------

/// Convert a point in the rotated display frame back to the native frame.
fn display_to_native(geometry: &Geometry, dx: u16, dy: u16) -> (u16, u16) {
    let nw = geometry.native_width();
    let nh = geometry.native_height();
    match geometry.rotation() {
        Rotation::Deg0 => (dx, dy),
        Rotation::Deg90 => (nw.saturating_sub(dy), dx),
        Rotation::Deg180 => (nw.saturating_sub(dx), nh.saturating_sub(dy)),
        Rotation::Deg270 => (dy, nh.saturating_sub(dx)),
    }
}

fn keycode_to_rotation(keycode: Keycode) -> Option<u8> {
    match keycode {
        Keycode::Num0 | Keycode::Kp0 => Some(0),
        Keycode::Num1 | Keycode::Kp1 => Some(1),
        Keycode::Num2 | Keycode::Kp2 => Some(2),
        Keycode::Num3 | Keycode::Kp3 => Some(3),
        _ => None,
    }
}

fn in_display(geometry: &Geometry, point: Point) -> Option<(u16, u16)> {
    let size = geometry.display_size();
    let inside = point.x >= 0
        && point.y >= 0
        && (point.x as u32) < size.width
        && (point.y as u32) < size.height;
    inside.then(|| (point.x as u16, point.y as u16))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(
    display: &mut SimulatorDisplay<Rgb565>,
    screen: &SimScreen,
    capacitive: bool,
    mapped: Option<TouchPoint>,
) -> Result<(), Infallible> {
    display.clear(Rgb565::BLACK)?;

    Rectangle::new(Point::zero(), screen.geometry().display_size())
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::CSS_DIM_GRAY, 1))
        .draw(display)?;

    let label = format!(
        "{} rot {}",
        if capacitive { "capacitive" } else { "resistive" },
        screen.rotation().index()
    );
    Text::new(&label, Point::new(4, 12), MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE))
        .draw(display)?;

    if let Some(point) = mapped {
        let center = point.to_point();
        let style = PrimitiveStyle::with_stroke(Rgb565::GREEN, 1);
        Line::new(center - Point::new(8, 0), center + Point::new(8, 0))
            .into_styled(style)
            .draw(display)?;
        Line::new(center - Point::new(0, 8), center + Point::new(0, 8))
            .into_styled(style)
            .draw(display)?;
        Circle::with_center(center, 11)
            .into_styled(style)
            .draw(display)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting touch-adapter simulator");
    info!("Keys: 0-3=Rotation  C=Capacitive  R=Resistive  P=Print  A=Apply calibration  Q=Quit");

    let side = NATIVE_WIDTH.max(NATIVE_HEIGHT) as u32;
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(side, side));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Touch Simulator", &output_settings);

    let finger: Finger = Rc::new(Cell::new(None));
    let mut capacitive = true;
    let mut screen = create_screen(capacitive, &finger, Rotation::Deg0);
    let mut tracker = CalibrationTracker::new();

    let mut cursor: Option<(u16, u16)> = None;
    let mut mapped: Option<TouchPoint> = None;

    // The SDL window must be updated once before `events()` is polled.
    let _ = draw(&mut display, &screen, capacitive, mapped);
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } if keycode_to_rotation(keycode).is_some() => {
                    screen.set_rotation(keycode_to_rotation(keycode).unwrap_or(0));
                    info!("Rotation → {:?}", screen.rotation());
                }

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::C | Keycode::R => {
                        capacitive = keycode == Keycode::C;
                        screen = create_screen(capacitive, &finger, screen.rotation());
                        tracker.reset();
                        info!("Panel → {}", if capacitive { "capacitive" } else { "resistive" });
                    }
                    Keycode::P => match tracker.calibration(2) {
                        Some(calibration) => info!(
                            "Raw X {}..{}  Y {}..{}  Z {}..{} ({} samples)",
                            calibration.x.min,
                            calibration.x.max,
                            calibration.y.min,
                            calibration.y.max,
                            calibration.z.min,
                            calibration.z.max,
                            tracker.samples()
                        ),
                        None => info!("No touches recorded yet"),
                    },
                    Keycode::A => match (&mut screen, tracker.calibration(2)) {
                        (TouchScreenWrapper::Resistive(resistive), Some(calibration)) => {
                            resistive.set_calibration(calibration);
                            info!("Applied calibration from {} samples", tracker.samples());
                        }
                        (TouchScreenWrapper::Resistive(_), None) => {
                            info!("No touches recorded yet")
                        }
                        _ => info!("Capacitive panels need no calibration"),
                    },
                    _ => {}
                },

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    cursor = in_display(screen.geometry(), point);
                }

                SimulatorEvent::MouseMove { point } if cursor.is_some() => {
                    cursor = in_display(screen.geometry(), point);
                }

                SimulatorEvent::MouseButtonUp { .. } => cursor = None,

                _ => {}
            }
        }

        finger.set(cursor.map(|(dx, dy)| display_to_native(screen.geometry(), dx, dy)));

        if finger.get().is_some() {
            match screen.touch_point_raw() {
                Ok(raw) => tracker.record(raw),
                Err(e) => warn!("Raw read failed: {}", e),
            }
        }

        mapped = match screen.touch_point() {
            Ok(point) if point.is_touched() => Some(point),
            Ok(_) => None,
            Err(e) => {
                warn!("Touch read failed: {}", e);
                None
            }
        };

        if let (Some((dx, dy)), Some(point)) = (cursor, mapped) {
            let error = (point.x as i32 - dx as i32)
                .abs()
                .max((point.y as i32 - dy as i32).abs());
            if error > MAX_ERROR_PX {
                warn!(
                    "Mapped ({}, {}) is {}px from cursor ({}, {})",
                    point.x, point.y, error, dx, dy
                );
            }
        }

        let _ = draw(&mut display, &screen, capacitive, mapped);
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
