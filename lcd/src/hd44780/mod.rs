//! HD44780 LCD controller module.
//!
//! The HD44780 is driven in 4-bit mode: every byte is transferred as two nibbles on the D4-D7
//! lines, each latched on the falling edge of the E line. See [driver::HD44780Driver] for the
//! command interface and [driver::Pcf8574Driver] for the I2C expander implementation.
//!
//! # Sources
//!
//! - Hitachi, [“HD44780U (LCD-II) Dot Matrix Liquid Crystal Display Controller/Driver,”](https://www.sparkfun.com/datasheets/LCD/HD44780.pdf)
//!   Rev. 0.0, 1998.
//! - NXP Semiconductors, [“PCF8574; PCF8574A Remote 8-bit I/O expander for I2C-bus with interrupt,”](https://www.nxp.com/docs/en/data-sheet/PCF8574_PCF8574A.pdf)
//!   Rev. 5, 2013.
pub mod driver;

// Instructions

pub const CLEAR_DISPLAY: u8 = 0b00000001;
pub const RETURN_HOME: u8 = 0b00000010;
pub const ENTRY_MODE_SET: u8 = 0b00000100;
pub const DISPLAY_CONTROL: u8 = 0b00001000;
pub const CURSOR_SHIFT: u8 = 0b00010000;
pub const FUNCTION_SET: u8 = 0b00100000;
pub const SET_DDRAM_ADDRESS: u8 = 0b10000000;

// Entry mode set flags

/// Cursor moves right (address increments) after each character.
pub const ENTRY_INCREMENT: u8 = 0b00000010;
pub const ENTRY_SHIFT: u8 = 0b00000001;

// Display control flags

pub const DISPLAY_ON: u8 = 0b00000100;
pub const CURSOR_ON: u8 = 0b00000010;
pub const BLINK_ON: u8 = 0b00000001;

// Cursor shift flags

pub const SHIFT_DISPLAY: u8 = 0b00001000;
pub const SHIFT_RIGHT: u8 = 0b00000100;

// Function set flags

pub const EIGHT_BIT_MODE: u8 = 0b00010000;
pub const TWO_LINES: u8 = 0b00001000;
pub const FONT_5X10: u8 = 0b00000100;

/// Highest DDRAM address.
pub const MAX_DDRAM_ADDRESS: u8 = 0b01111111;
