use crate::hd44780::driver::{Backlight, CursorDirection, HD44780Driver, Register, Timing};
use crate::hd44780::{EIGHT_BIT_MODE, FUNCTION_SET};
use crate::{LcdError, LcdResult};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, I2c};
use log::{debug, trace};
use std::fmt::{Debug, Formatter};
use std::time::Duration;

// Expander outputs P0-P3. P4-P7 carry D4-D7 of the display.

pub const REGISTER_SELECT: u8 = 0b00000001;
/// Held low, the driver never reads from the controller.
pub const READ_WRITE: u8 = 0b00000010;
pub const ENABLE: u8 = 0b00000100;
pub const BACKLIGHT: u8 = 0b00001000;

/// Highest valid 7-bit device address.
pub const MAX_ADDRESS: u8 = 0x7F;

/// HD44780 driver for displays behind a PCF8574 I2C expander, the common "I2C backpack".
///
/// Each nibble costs three single-byte bus writes: the data lines are set up, E is raised and
/// held for [Timing::enable_hold], then E is dropped and the controller gets
/// [Timing::enable_settle] to latch it. The backlight bit is merged into every write.
pub struct Pcf8574Driver<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    backlight: Backlight,
    timing: Timing,
}

impl<I, D> Debug for Pcf8574Driver<I, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pcf8574Driver")
            .field("address", &format_args!("{:#04x}", self.address))
            .field("backlight", &self.backlight)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

impl<I: I2c, D: DelayNs> Pcf8574Driver<I, D> {
    /// Creates a new driver for the expander at `address`. Nothing is sent until [Self::init].
    ///
    /// The bus can be lent with `&mut i2c`, if it's shared with other devices.
    pub fn new(i2c: I, delay: D, address: u8) -> LcdResult<Self> {
        if address > MAX_ADDRESS {
            return Err(LcdError::InvalidAddress(address));
        }

        Ok(Pcf8574Driver {
            i2c,
            delay,
            address,
            backlight: Backlight::On,
            timing: Timing::default(),
        })
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_backlight(mut self, backlight: Backlight) -> Self {
        self.backlight = backlight;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn backlight(&self) -> Backlight {
        self.backlight
    }

    /// Switches the backlight. The new state is written right away and kept for every later write.
    pub fn set_backlight(&mut self, backlight: Backlight) -> LcdResult<()> {
        debug!("Backlight {:?}", backlight);
        self.backlight = backlight;
        self.expander_write(0)
    }

    fn expander_write(&mut self, byte: u8) -> LcdResult<()> {
        let byte = byte | self.backlight.mask();
        let address = self.address;
        self.i2c.write(address, &[byte]).map_err(|err| {
            debug!("Writing {:#04x} to {:#04x} failed: {:?}", byte, address, err);
            LcdError::Bus(err.kind())
        })
    }

    fn pulse_enable(&mut self, nibble: u8) -> LcdResult<()> {
        self.expander_write(nibble | ENABLE)?;
        self.wait(self.timing.enable_hold);
        // Data is latched on the falling edge
        self.expander_write(nibble & !ENABLE)?;
        self.wait(self.timing.enable_settle);
        Ok(())
    }

    /// Presents the upper four bits of `nibble` (plus the control bits in the lower four) and latches them.
    fn write_4bits(&mut self, nibble: u8) -> LcdResult<()> {
        trace!("Writing nibble: {:08b}", nibble);
        self.expander_write(nibble)?;
        self.pulse_enable(nibble)
    }

    fn send(&mut self, value: u8, register: Register) -> LcdResult<()> {
        trace!("Sending {:?}: {:08b}", register, value);
        let mode = register.mask();
        let high_nibble = value & 0xF0;
        let low_nibble = (value << 4) & 0xF0;
        self.write_4bits(high_nibble | mode)?;
        self.write_4bits(low_nibble | mode)
    }

    /// [DelayNs] takes at most `u32::MAX` nanoseconds (about 4.3 s) per call.
    fn wait(&mut self, duration: Duration) {
        let mut remaining = duration.as_nanos();
        while remaining > 0 {
            let step = u32::try_from(remaining).unwrap_or(u32::MAX);
            self.delay.delay_ns(step);
            remaining -= u128::from(step);
        }
    }
}

impl<I: I2c, D: DelayNs> HD44780Driver for Pcf8574Driver<I, D> {
    /// Initializes the controller by instruction, as described in figure 24 of the HD44780 datasheet.
    ///
    /// The controller may come up in 8-bit mode, or halfway through a 4-bit transfer if the host was
    /// restarted without power cycling the display. Three `0x30` nibbles bring it to 8-bit mode
    /// from any of those states, then `0x20` switches it to 4 bits. Only after that can full bytes
    /// be sent.
    fn init(&mut self, multiline: bool) -> LcdResult<()> {
        debug!("Initializing HD44780 at {:#04x}", self.address);
        self.wait(self.timing.power_on);

        // Synchronize
        let wake_up = self.timing.wake_up;
        for wait in wake_up {
            self.write_4bits(FUNCTION_SET | EIGHT_BIT_MODE)?;
            self.wait(wait);
        }
        self.write_4bits(FUNCTION_SET)?;
        self.wait(self.timing.four_bit_mode);

        self.function_set(false, multiline, false)?;
        self.set_display_control(true, false, false)?;
        self.clear_display()?;
        self.set_entry_mode(CursorDirection::Right, false)?;
        self.wait(self.timing.init_settle);

        debug!("HD44780 at {:#04x} initialized", self.address);
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        self.send(command, Register::Command)
    }

    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        self.send(data, Register::Data)
    }

    fn delay(&mut self, duration: Duration) {
        self.wait(duration);
    }

    fn timing(&self) -> &Timing {
        &self.timing
    }
}
