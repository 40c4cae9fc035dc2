//! Blocking driver for FocalTech FT62xx capacitive touch controllers.
//!
//! Covers the FT6206, FT6236 and FT6336 found on common 2.8" and 3.5" TFT
//! breakouts. Only the primary touch point is reported; the second point the
//! controller tracks is ignored.

use embedded_hal::i2c::I2c;

use crate::capacitive::CapacitiveDriver;
use crate::config::{CapacitiveConfig, DEFAULT_I2C_ADDR};
use crate::error::TouchError;
use crate::point::TouchPoint;

// =============================================================================
// Identification
// =============================================================================

/// FocalTech vendor id
pub const VENDOR_ID: u8 = 0x11;
/// FT6206 chip id
pub const CHIP_ID_FT6206: u8 = 0x06;
/// FT6236 chip id
pub const CHIP_ID_FT6236: u8 = 0x36;
/// FT6336U chip id
pub const CHIP_ID_FT6336U: u8 = 0x64;

// =============================================================================
// Register Addresses
// =============================================================================

pub const ADDR_DEVICE_MODE: u8 = 0x00;
pub const ADDR_TD_STATUS: u8 = 0x02;
pub const ADDR_TOUCH1_X: u8 = 0x03;
pub const ADDR_TOUCH1_Y: u8 = 0x05;
pub const ADDR_THRESHOLD: u8 = 0x80;
pub const ADDR_ACTIVE_MODE_RATE: u8 = 0x88;
pub const ADDR_CHIP_ID: u8 = 0xA3;
pub const ADDR_FIRMWARE_ID: u8 = 0xA6;
pub const ADDR_VENDOR_ID: u8 = 0xA8;

/// Registers 0x00..=0x0F hold the status and both touch points
const POINT_BLOCK_LEN: usize = 16;

/// Most touches the controller tracks at once
pub const MAX_TOUCHES: u8 = 2;

// =============================================================================
// Driver Error Type
// =============================================================================

/// Errors that can occur during FT62xx operations
#[derive(Debug)]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// The vendor id register did not read as FocalTech
    InvalidVendor(u8),
    /// The chip id register named an unsupported part
    InvalidChip(u8),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Self::I2c(e)
    }
}

// =============================================================================
// Driver Implementation
// =============================================================================

/// FT62xx capacitive touch controller on a blocking I2C bus
pub struct Ft6206<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Ft6206<I2C>
where
    I2C: I2c,
{
    /// Create a driver at the default address (0x38)
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn from_config(i2c: I2C, config: &CapacitiveConfig) -> Self {
        Self::with_address(i2c, config.address)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    // =========================================================================
    // Private I2C Helper Methods
    // =========================================================================

    fn read_byte(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, reg: u8, data: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, &[reg, data])?;
        Ok(())
    }

    // =========================================================================
    // Register Methods
    // =========================================================================

    /// Read the touch detection threshold (lower = more sensitive)
    pub fn read_threshold(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_byte(ADDR_THRESHOLD)
    }

    pub fn write_threshold(&mut self, threshold: u8) -> Result<(), Error<I2C::Error>> {
        self.write_byte(ADDR_THRESHOLD, threshold)
    }

    pub fn read_vendor_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_byte(ADDR_VENDOR_ID)
    }

    pub fn read_chip_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_byte(ADDR_CHIP_ID)
    }

    pub fn read_firmware_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_byte(ADDR_FIRMWARE_ID)
    }

    /// Active mode report rate in Hz
    pub fn read_active_rate(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_byte(ADDR_ACTIVE_MODE_RATE)
    }

    /// Number of active touches (0-2)
    ///
    /// Out-of-range counts from a glitching controller read as zero.
    pub fn touched(&mut self) -> Result<u8, Error<I2C::Error>> {
        let count = self.read_byte(ADDR_TD_STATUS)? & 0x0F;
        Ok(if count > MAX_TOUCHES { 0 } else { count })
    }

    // =========================================================================
    // High-Level Methods
    // =========================================================================

    /// Program the threshold and verify the part is a supported FT62xx
    pub fn init(&mut self, threshold: u8) -> Result<(), Error<I2C::Error>> {
        self.write_threshold(threshold)?;

        let vendor = self.read_vendor_id()?;
        if vendor != VENDOR_ID {
            return Err(Error::InvalidVendor(vendor));
        }

        let chip = self.read_chip_id()?;
        if !matches!(chip, CHIP_ID_FT6206 | CHIP_ID_FT6236 | CHIP_ID_FT6336U) {
            return Err(Error::InvalidChip(chip));
        }
        Ok(())
    }

    /// Read the primary touch point
    ///
    /// Returns `(0, 0, 0)` when nothing touches the panel, otherwise the
    /// 12-bit sensor coordinates with `z = 1`; the FT62xx has no pressure
    /// output.
    pub fn read_touch(&mut self) -> Result<TouchPoint, Error<I2C::Error>> {
        let mut regs = [0u8; POINT_BLOCK_LEN];
        self.i2c
            .write_read(self.address, &[ADDR_DEVICE_MODE], &mut regs)?;

        let count = regs[ADDR_TD_STATUS as usize] & 0x0F;
        if count == 0 || count > MAX_TOUCHES {
            return Ok(TouchPoint::NONE);
        }

        let x = coordinate(&regs, ADDR_TOUCH1_X);
        let y = coordinate(&regs, ADDR_TOUCH1_Y);
        Ok(TouchPoint::new(x, y, 1))
    }
}

/// 12-bit coordinate: low nibble of the high register, then the low register
fn coordinate(regs: &[u8; POINT_BLOCK_LEN], high: u8) -> u16 {
    let high = high as usize;
    (((regs[high] & 0x0F) as u16) << 8) | (regs[high + 1] as u16)
}

impl<I2C> CapacitiveDriver for Ft6206<I2C>
where
    I2C: I2c,
{
    type Error = Error<I2C::Error>;

    fn begin(&mut self, threshold: u8) -> Result<(), Self::Error> {
        self.init(threshold)
    }

    fn read_point(&mut self) -> Result<TouchPoint, Self::Error> {
        self.read_touch()
    }

    fn classify(error: &Self::Error) -> TouchError {
        match error {
            Error::I2c(_) => TouchError::Bus,
            Error::InvalidVendor(id) => TouchError::InvalidVendor { id: *id },
            Error::InvalidChip(id) => TouchError::InvalidChip { id: *id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::TouchScreen;
    use crate::capacitive::CapacitiveTouchScreen;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// Register-map stand-in for an FT62xx on the bus
    struct FakeBus {
        address: u8,
        regs: [u8; 256],
        pointer: u8,
    }

    impl FakeBus {
        fn ft6206() -> Self {
            let mut regs = [0u8; 256];
            regs[ADDR_VENDOR_ID as usize] = VENDOR_ID;
            regs[ADDR_CHIP_ID as usize] = CHIP_ID_FT6206;
            Self {
                address: DEFAULT_I2C_ADDR,
                regs,
                pointer: 0,
            }
        }

        fn with_touch(mut self, count: u8, x: u16, y: u16) -> Self {
            self.regs[ADDR_TD_STATUS as usize] = count;
            self.regs[ADDR_TOUCH1_X as usize] = 0x80 | (x >> 8) as u8; // event flag in high bits
            self.regs[ADDR_TOUCH1_X as usize + 1] = x as u8;
            self.regs[ADDR_TOUCH1_Y as usize] = (y >> 8) as u8;
            self.regs[ADDR_TOUCH1_Y as usize + 1] = y as u8;
            self
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.address {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((reg, data)) = bytes.split_first() {
                            self.pointer = *reg;
                            for byte in data {
                                self.regs[self.pointer as usize] = *byte;
                                self.pointer = self.pointer.wrapping_add(1);
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for byte in buf.iter_mut() {
                            *byte = self.regs[self.pointer as usize];
                            self.pointer = self.pointer.wrapping_add(1);
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_writes_threshold() {
        let mut driver = Ft6206::new(FakeBus::ft6206());
        driver.init(40).unwrap();
        assert_eq!(driver.read_threshold().unwrap(), 40);
    }

    #[test]
    fn test_init_rejects_unknown_vendor() {
        let mut bus = FakeBus::ft6206();
        bus.regs[ADDR_VENDOR_ID as usize] = 0x42;
        let mut driver = Ft6206::new(bus);
        assert!(matches!(driver.init(128), Err(Error::InvalidVendor(0x42))));
    }

    #[test]
    fn test_init_rejects_unknown_chip() {
        let mut bus = FakeBus::ft6206();
        bus.regs[ADDR_CHIP_ID as usize] = 0x01;
        let mut driver = Ft6206::new(bus);
        assert!(matches!(driver.init(128), Err(Error::InvalidChip(0x01))));
    }

    #[test]
    fn test_accepts_ft6336u() {
        let mut bus = FakeBus::ft6206();
        bus.regs[ADDR_CHIP_ID as usize] = CHIP_ID_FT6336U;
        assert!(Ft6206::new(bus).init(128).is_ok());
    }

    #[test]
    fn test_wrong_address_is_bus_error() {
        let mut driver = Ft6206::with_address(FakeBus::ft6206(), 0x39);
        assert!(matches!(driver.init(128), Err(Error::I2c(_))));
    }

    #[test]
    fn test_no_touch_reads_zero() {
        let mut driver = Ft6206::new(FakeBus::ft6206());
        assert_eq!(driver.read_touch().unwrap(), TouchPoint::NONE);
    }

    #[test]
    fn test_single_touch_decodes_12_bit_coordinates() {
        let mut driver = Ft6206::new(FakeBus::ft6206().with_touch(1, 0x123, 0x0AB));
        assert_eq!(driver.touched().unwrap(), 1);
        assert_eq!(driver.read_touch().unwrap(), TouchPoint::new(0x123, 0x0AB, 1));
    }

    #[test]
    fn test_glitched_touch_count_reads_zero() {
        let mut driver = Ft6206::new(FakeBus::ft6206().with_touch(0x0F, 100, 100));
        assert_eq!(driver.touched().unwrap(), 0);
        assert_eq!(driver.read_touch().unwrap(), TouchPoint::NONE);
    }

    #[test]
    fn test_adapter_maps_driver_errors() {
        let mut bus = FakeBus::ft6206();
        bus.regs[ADDR_CHIP_ID as usize] = 0x01;
        let mut screen = CapacitiveTouchScreen::new(Ft6206::new(bus), 128);
        assert_eq!(screen.begin(), Err(TouchError::InvalidChip { id: 0x01 }));

        let mut screen = CapacitiveTouchScreen::new(Ft6206::with_address(FakeBus::ft6206(), 0x39), 128);
        assert_eq!(screen.touch_point(), Err(TouchError::Bus));
    }

    #[test]
    fn test_adapter_over_ft6206() {
        let mut screen = CapacitiveTouchScreen::new(Ft6206::new(FakeBus::ft6206().with_touch(1, 10, 20)), 128);
        screen.begin().unwrap();
        assert_eq!(screen.touch_point().unwrap(), TouchPoint::new(230, 300, 1));
        assert_eq!(screen.touch_point_raw().unwrap(), TouchPoint::new(10, 20, 1));
    }
}
