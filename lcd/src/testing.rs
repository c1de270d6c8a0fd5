//! Expected bus traffic and delays for the `embedded-hal-mock` based tests.
use crate::LcdResult;
use crate::hd44780::driver::{BACKLIGHT, ENABLE, HD44780Driver, REGISTER_SELECT, Register, Timing};
use crate::hd44780::*;
pub use embedded_hal_mock::eh1::delay::Transaction as DelayTransaction;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use std::time::Duration;

pub const ADDRESS: u8 = 0x27;

/// Expander bytes of one nibble with the backlight on: data set up, E high, E low.
pub fn nibble_bytes(nibble: u8) -> [u8; 3] {
    let byte = nibble | BACKLIGHT;
    [byte, byte | ENABLE, byte]
}

/// Expander bytes of one byte sent to `register`, high nibble first.
pub fn frame_bytes(register: Register, value: u8) -> Vec<u8> {
    let mode = register.mask();
    [value & 0xF0, value << 4]
        .into_iter()
        .flat_map(|nibble| nibble_bytes(nibble | mode))
        .collect()
}

pub fn command_bytes(commands: &[u8]) -> Vec<u8> {
    commands
        .iter()
        .flat_map(|&command| frame_bytes(Register::Command, command))
        .collect()
}

pub fn data_bytes(data: &[u8]) -> Vec<u8> {
    data.iter()
        .flat_map(|&code| frame_bytes(Register::Data, code))
        .collect()
}

/// Expander bytes of the power-on sequence in 2-line mode.
pub fn init_bytes() -> Vec<u8> {
    let mut bytes: Vec<u8> = [0x30, 0x30, 0x30, 0x20]
        .into_iter()
        .flat_map(nibble_bytes)
        .collect();
    bytes.extend(command_bytes(&[
        FUNCTION_SET | TWO_LINES,
        DISPLAY_CONTROL | DISPLAY_ON,
        CLEAR_DISPLAY,
        ENTRY_MODE_SET | ENTRY_INCREMENT,
    ]));
    bytes
}

/// The driver writes every expander byte in its own transaction.
pub fn writes(bytes: &[u8]) -> Vec<I2cTransaction> {
    bytes
        .iter()
        .map(|&byte| I2cTransaction::write(ADDRESS, vec![byte]))
        .collect()
}

/// A bus that expects no traffic at all.
pub fn idle_i2c() -> I2cMock {
    I2cMock::new(&Vec::<I2cTransaction>::new())
}

pub fn delay_of(duration: Duration) -> DelayTransaction {
    DelayTransaction::delay_ns(u32::try_from(duration.as_nanos()).unwrap())
}

/// Waits of one byte: two enable pulses.
fn frame_delays(timing: &Timing) -> [DelayTransaction; 4] {
    [
        delay_of(timing.enable_hold),
        delay_of(timing.enable_settle),
        delay_of(timing.enable_hold),
        delay_of(timing.enable_settle),
    ]
}

/// Waits of the power-on sequence, in order.
pub fn init_delays(timing: &Timing) -> Vec<DelayTransaction> {
    let mut delays = vec![delay_of(timing.power_on)];
    for wait in timing.wake_up.into_iter().chain([timing.four_bit_mode]) {
        delays.extend([
            delay_of(timing.enable_hold),
            delay_of(timing.enable_settle),
            delay_of(wait),
        ]);
    }
    // Function set, display control
    delays.extend(frame_delays(timing));
    delays.extend(frame_delays(timing));
    // Clear
    delays.extend(frame_delays(timing));
    delays.push(delay_of(timing.clear));
    // Entry mode
    delays.extend(frame_delays(timing));
    delays.push(delay_of(timing.init_settle));
    delays
}

/// Nibbles the controller latches from `bytes`, with the RS bit kept and the E and backlight bits
/// removed.
///
/// A nibble is latched once per enable pulse, so every byte with E high counts.
pub fn latched_nibbles(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .filter(|byte| *byte & ENABLE != 0)
        .map(|byte| byte & !(ENABLE | BACKLIGHT))
        .collect()
}

/// Reassembles nibble pairs into bytes, the way the controller does in 4-bit mode.
pub fn frames(nibbles: &[u8]) -> Vec<(Register, u8)> {
    nibbles
        .chunks(2)
        .map(|pair| {
            let register = if pair[0] & REGISTER_SELECT != 0 {
                Register::Data
            } else {
                Register::Command
            };
            let low = pair.get(1).copied().unwrap_or(0);
            (register, (pair[0] & 0xF0) | (low >> 4))
        })
        .collect()
}

/// Controller stand-in that keeps every byte it is sent, for tests above the bus level.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub sent: Vec<(Register, u8)>,
    pub waited: Duration,
    pub initialized: bool,
    timing: Timing,
}

impl RecordingDriver {
    pub fn reset(&mut self) {
        self.sent.clear();
        self.waited = Duration::ZERO;
    }

    /// Character codes sent to the data register.
    pub fn data(&self) -> Vec<u8> {
        self.sent_to(Register::Data)
    }

    /// Instructions sent to the command register.
    pub fn commands(&self) -> Vec<u8> {
        self.sent_to(Register::Command)
    }

    fn sent_to(&self, register: Register) -> Vec<u8> {
        self.sent
            .iter()
            .filter(|(to, _)| *to == register)
            .map(|(_, value)| *value)
            .collect()
    }
}

impl HD44780Driver for RecordingDriver {
    fn init(&mut self, _multiline: bool) -> LcdResult<()> {
        self.initialized = true;
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        self.sent.push((Register::Command, command));
        Ok(())
    }

    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        self.sent.push((Register::Data, data));
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.waited += duration;
    }

    fn timing(&self) -> &Timing {
        &self.timing
    }
}
