//! Character display handle.
//!
//! [CharLcd] owns one initialized display and exposes cursor addressing and text output on top of a
//! [HD44780Driver]. The cursor position is not tracked here, it only lives in the controller.
use crate::effects::{CharacterDisplay, TextEffects};
use crate::hd44780::driver::{Backlight, CursorDirection, HD44780Driver, Pcf8574Driver, Timing};
use crate::{LcdError, LcdResult};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, trace};
use std::time::Duration;

/// DDRAM address of the first column of each row, for the standard HD44780 memory layout.
///
/// Rows 2 and 3 of 4-row displays continue rows 0 and 1 in memory, 20 characters later.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Widest display the controller can address in one line.
pub const MAX_COLS: usize = 40;

const SPLASH_TITLE: &str = "I2C LCD driver";
const SPLASH_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
const SPLASH_HOLD: Duration = Duration::from_secs(2);

/// Construction parameters of a [CharLcd].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LcdConfig {
    /// 7-bit address of the expander. Usually `0x27`, or `0x3F` for PCF8574A based boards.
    pub address: u8,
    pub cols: u8,
    pub rows: u8,
    /// Skips the splash screen after initialization.
    pub boot_skip: bool,
    pub backlight: Backlight,
    pub timing: Timing,
}

impl Default for LcdConfig {
    fn default() -> Self {
        LcdConfig {
            address: 0x27,
            cols: 16,
            rows: 2,
            boot_skip: false,
            backlight: Backlight::On,
            timing: Timing::default(),
        }
    }
}

impl LcdConfig {
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_size(mut self, cols: u8, rows: u8) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn with_boot_skip(mut self, boot_skip: bool) -> Self {
        self.boot_skip = boot_skip;
        self
    }

    pub fn with_backlight(mut self, backlight: Backlight) -> Self {
        self.backlight = backlight;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    fn validate(&self) -> LcdResult<()> {
        let cols = self.cols as usize;
        let rows = self.rows as usize;
        if !(1..=MAX_COLS).contains(&cols) || !(1..=ROW_OFFSETS.len()).contains(&rows) {
            return Err(LcdError::InvalidGeometry { cols, rows });
        }
        Ok(())
    }
}

/// One physical display.
///
/// Every operation blocks until the display has processed it. Sharing the display between threads
/// requires wrapping the whole handle in a mutex, since interleaved transfers corrupt the controller
/// state.
#[derive(Debug)]
pub struct CharLcd<D> {
    driver: D,
    cols: usize,
    rows: usize,
}

impl<I: I2c, D: DelayNs> CharLcd<Pcf8574Driver<I, D>> {
    /// Initializes the display behind the PCF8574 expander at `config.address`.
    pub fn new(i2c: I, delay: D, config: LcdConfig) -> LcdResult<Self> {
        config.validate()?;
        let driver = Pcf8574Driver::new(i2c, delay, config.address)?
            .with_timing(config.timing)
            .with_backlight(config.backlight);
        Self::with_driver(driver, config)
    }

    pub fn backlight(&self) -> Backlight {
        self.driver.backlight()
    }

    pub fn set_backlight(&mut self, on: bool) -> LcdResult<()> {
        self.driver.set_backlight(Backlight::from(on))
    }
}

impl<D: HD44780Driver> CharLcd<D> {
    /// Runs the power-on sequence on `driver` and, unless `boot_skip` is set, shows the splash screen.
    pub fn with_driver(mut driver: D, config: LcdConfig) -> LcdResult<Self> {
        config.validate()?;
        // 1-line modules are usually wired as two half-lines, so they need the 2-line mode as well.
        driver.init(true)?;

        let mut lcd = CharLcd {
            driver,
            cols: config.cols as usize,
            rows: config.rows as usize,
        };
        debug!("{}x{} display ready", lcd.cols, lcd.rows);

        if !config.boot_skip {
            lcd.splash()?;
        }
        Ok(lcd)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Blanks the display and moves the cursor to (0, 0).
    pub fn clear(&mut self) -> LcdResult<()> {
        self.driver.clear_display()
    }

    /// Moves the cursor to (0, 0) and undoes any display shift.
    pub fn home(&mut self) -> LcdResult<()> {
        self.driver.return_home()
    }

    /// Moves the cursor to `col` of `row`.
    ///
    /// Rows past the last one are clamped to it. Columns past the last one are rejected with
    /// [LcdError::ColumnOutOfRange].
    pub fn move_to(&mut self, col: usize, row: usize) -> LcdResult<()> {
        if col >= self.cols {
            return Err(LcdError::ColumnOutOfRange {
                col,
                cols: self.cols,
            });
        }
        let last_row = self.rows - 1;
        if row > last_row {
            debug!("Row {} clamped to {}", row, last_row);
        }
        let row = row.min(last_row);

        self.driver.set_ddram_address(ROW_OFFSETS[row] + col as u8)
    }

    /// Writes `text` at the cursor.
    ///
    /// The controller only knows 8-bit character codes; characters from U+0000 to U+00FF are sent
    /// as their code point, which matches the ROM for ASCII. If `text` has any other character,
    /// nothing is sent and [LcdError::UnsupportedCharacter] is returned.
    pub fn put_str(&mut self, text: &str) -> LcdResult<()> {
        if let Some(c) = text.chars().find(|&c| u8::try_from(c).is_err()) {
            return Err(LcdError::UnsupportedCharacter(c));
        }
        trace!("Writing {:?}", text);
        for c in text.chars() {
            self.driver.send_data(c as u8)?;
        }
        Ok(())
    }

    /// Writes raw character codes at the cursor, e.g. the ROM's non-ASCII glyphs.
    pub fn put_bytes(&mut self, codes: &[u8]) -> LcdResult<()> {
        for &code in codes {
            self.driver.send_data(code)?;
        }
        Ok(())
    }

    pub fn put_char(&mut self, code: u8) -> LcdResult<()> {
        self.driver.send_data(code)
    }

    /// Shifts the whole display content by one position, without changing DDRAM.
    pub fn shift_display(&mut self, direction: CursorDirection) -> LcdResult<()> {
        self.driver.cursor_shift(true, direction)
    }

    fn splash(&mut self) -> LcdResult<()> {
        self.clear()?;
        self.print_top(SPLASH_TITLE)?;
        self.print_bottom(SPLASH_VERSION)?;
        self.pause(SPLASH_HOLD);
        self.fade_out()?;
        self.clear()
    }
}

impl<D: HD44780Driver> CharacterDisplay for CharLcd<D> {
    fn cols(&self) -> usize {
        self.cols
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn clear(&mut self) -> LcdResult<()> {
        CharLcd::clear(self)
    }

    fn move_to(&mut self, col: usize, row: usize) -> LcdResult<()> {
        CharLcd::move_to(self, col, row)
    }

    fn put_str(&mut self, text: &str) -> LcdResult<()> {
        CharLcd::put_str(self, text)
    }

    fn pause(&mut self, duration: Duration) {
        self.driver.delay(duration);
    }
}
