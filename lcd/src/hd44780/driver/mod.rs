mod pcf8574;

use crate::hd44780::*;
use crate::{LcdError, LcdResult};
pub use pcf8574::*;
use std::fmt::Debug;
use std::time::Duration;

/// Low-level interface of an HD44780 controller.
///
/// The instruction methods are provided on top of [Self::send_command]; an implementation only has to
/// know how to get a byte to the controller and how to wait.
///
/// No method reads the busy flag. Instructions that take long to execute ([Self::clear_display],
/// [Self::return_home]) wait the time from [Self::timing] instead, every other instruction is
/// covered by the enable pulse timing of the implementation.
pub trait HD44780Driver: Debug {
    /// Runs the power-on initialization sequence.
    ///
    /// Afterwards the display is on and empty, the cursor is hidden, and the address increments
    /// after every character.
    fn init(&mut self, multiline: bool) -> LcdResult<()>;

    /// Clears the display and sets the cursor to the home position.
    fn clear_display(&mut self) -> LcdResult<()> {
        self.send_command(CLEAR_DISPLAY)?;
        let wait = self.timing().clear;
        self.delay(wait);
        Ok(())
    }

    /// Sets the cursor to the home position and undoes any display shift.
    fn return_home(&mut self) -> LcdResult<()> {
        self.send_command(RETURN_HOME)?;
        let wait = self.timing().home;
        self.delay(wait);
        Ok(())
    }

    /// Sets the cursor direction after each character, and whether the display shifts with it.
    fn set_entry_mode(&mut self, cursor_direction: CursorDirection, shift: bool) -> LcdResult<()> {
        let mut command = ENTRY_MODE_SET;
        if cursor_direction == CursorDirection::Right {
            command |= ENTRY_INCREMENT;
        }
        if shift {
            command |= ENTRY_SHIFT;
        }
        self.send_command(command)
    }

    /// Turns the display on or off, and controls the cursor and its blinking.
    fn set_display_control(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> LcdResult<()> {
        let mut command = DISPLAY_CONTROL;
        if display_on {
            command |= DISPLAY_ON;
        }
        if cursor_on {
            command |= CURSOR_ON;
        }
        if blink_on {
            command |= BLINK_ON;
        }
        self.send_command(command)
    }

    /// Moves the cursor or shifts the whole display by one position.
    fn cursor_shift(&mut self, display_shift: bool, direction: CursorDirection) -> LcdResult<()> {
        let mut command = CURSOR_SHIFT;
        if display_shift {
            command |= SHIFT_DISPLAY;
        }
        if direction == CursorDirection::Right {
            command |= SHIFT_RIGHT;
        }
        self.send_command(command)
    }

    /// Sets the interface data length, the number of display lines and the font.
    fn function_set(&mut self, eight_bit: bool, two_lines: bool, font_5x10: bool) -> LcdResult<()> {
        let mut command = FUNCTION_SET;
        if eight_bit {
            command |= EIGHT_BIT_MODE;
        }
        if two_lines {
            command |= TWO_LINES;
        }
        if font_5x10 {
            command |= FONT_5X10;
        }
        self.send_command(command)
    }

    /// Sets the DDRAM address, which moves the cursor.
    fn set_ddram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > MAX_DDRAM_ADDRESS {
            return Err(LcdError::AddressOutOfRange(address));
        }
        self.send_command(SET_DDRAM_ADDRESS | address)
    }

    // Low-level operations

    /// Sends an instruction (RS low).
    fn send_command(&mut self, command: u8) -> LcdResult<()>;

    /// Sends a character code to be written at the cursor (RS high).
    fn send_data(&mut self, data: u8) -> LcdResult<()>;

    /// Blocks for `duration`.
    fn delay(&mut self, duration: Duration);

    fn timing(&self) -> &Timing;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    /// Moves the cursor to the left after writing data.
    Left,
    /// Moves the cursor to the right after writing data.
    Right,
}

/// Which controller register a byte is written to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Register {
    /// Instruction register.
    Command,
    /// Data register, i.e. a character code.
    Data,
}

impl Register {
    /// Gets the expander bits selecting this register.
    pub fn mask(&self) -> u8 {
        match self {
            Register::Command => 0,
            Register::Data => REGISTER_SELECT,
        }
    }
}

/// State of the backlight LED, wired to one of the expander outputs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Backlight {
    #[default]
    On,
    Off,
}

impl Backlight {
    /// Gets the expander bits for this state. They are merged into every bus write.
    pub fn mask(&self) -> u8 {
        match self {
            Backlight::On => BACKLIGHT,
            Backlight::Off => 0,
        }
    }
}

impl From<bool> for Backlight {
    fn from(on: bool) -> Self {
        if on { Backlight::On } else { Backlight::Off }
    }
}

/// Every delay used by the driver.
///
/// The defaults are on the safe side of the HD44780 datasheet. The wake-up delays in particular
/// are convention rather than hard requirements, so they are kept configurable.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Timing {
    /// Wait before the first write, for the supply to stabilize.
    pub power_on: Duration,
    /// Waits after each of the three `0x30` wake-up nibbles.
    pub wake_up: [Duration; 3],
    /// Wait after switching the interface to 4 bits.
    pub four_bit_mode: Duration,
    /// Wait at the end of the initialization sequence.
    pub init_settle: Duration,
    /// How long E is held high.
    pub enable_hold: Duration,
    /// Wait after E goes low, while the controller executes.
    pub enable_settle: Duration,
    pub clear: Duration,
    pub home: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            power_on: Duration::from_millis(50),
            wake_up: [
                Duration::from_millis(5),
                Duration::from_micros(100),
                Duration::from_micros(100),
            ],
            four_bit_mode: Duration::from_micros(100),
            init_settle: Duration::from_millis(2),
            enable_hold: Duration::from_micros(500),
            enable_settle: Duration::from_micros(100),
            clear: Duration::from_millis(2),
            home: Duration::from_millis(2),
        }
    }
}
