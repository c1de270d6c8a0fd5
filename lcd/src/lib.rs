//! Driver for HD44780 character LCDs (16x2, 20x4, ...) wired through a PCF8574 I2C expander.
//!
//! The bus and the delay source come from [embedded_hal]: any [I2c](embedded_hal::i2c::I2c)
//! and [DelayNs](embedded_hal::delay::DelayNs) implementation will do, e.g. `linux-embedded-hal`
//! on a Raspberry Pi.
//!
//! The crate is layered bottom-up:
//! - [hd44780]: the 4-bit protocol over the expander ([Pcf8574Driver](hd44780::driver::Pcf8574Driver)).
//! - [display]: the [CharLcd](display::CharLcd) handle with cursor addressing and text output.
//! - [effects]: scrolling, fading, progress bars and other compositions of the above.
pub mod display;
pub mod effects;
pub mod hd44780;

#[cfg(test)]
pub(crate) mod testing;

use embedded_hal::i2c::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    #[error("bus error: {0}")]
    Bus(ErrorKind),
    #[error("invalid I2C address {0:#04x}, expected a 7-bit address")]
    InvalidAddress(u8),
    #[error("unsupported display geometry {cols}x{rows}")]
    InvalidGeometry { cols: usize, rows: usize },
    #[error("column {col} is outside of the {cols}-column display")]
    ColumnOutOfRange { col: usize, cols: usize },
    #[error("DDRAM address {0:#04x} is out of range")]
    AddressOutOfRange(u8),
    #[error("character {0:?} is not in the controller's 8-bit character set")]
    UnsupportedCharacter(char),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type LcdResult<T> = Result<T, LcdError>;
