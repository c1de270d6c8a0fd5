//! Presentation effects built from clearing, cursor moves, text output and pauses.
//!
//! Nothing here talks to the controller directly: every effect is available on any
//! [CharacterDisplay] through the [TextEffects] extension trait.
//!
//! Animations that would otherwise never end (blinking, marquees) are exposed as lazy iterators of
//! [Frame]s. They can be cloned to restart them, and they stop whenever the caller stops pulling
//! frames, e.g. with [Iterator::take] or [Iterator::take_while].
use crate::{LcdError, LcdResult};
use std::iter::once;
use std::time::Duration;

const FADE_STEP: Duration = Duration::from_millis(100);
const LOADING_STEP: Duration = Duration::from_millis(500);
const LOADING_DOTS: usize = 3;

/// The primitives the effects are composed of.
pub trait CharacterDisplay {
    fn cols(&self) -> usize;
    fn rows(&self) -> usize;
    /// Blanks the display and moves the cursor to (0, 0).
    fn clear(&mut self) -> LcdResult<()>;
    fn move_to(&mut self, col: usize, row: usize) -> LcdResult<()>;
    fn put_str(&mut self, text: &str) -> LcdResult<()>;
    /// Blocks for `duration`, between the steps of an effect.
    fn pause(&mut self, duration: Duration);
}

/// One full screen of an animation, drawn from (0, 0) on a cleared display.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Frame {
    Blank,
    Text(String),
}

/// Alternates between `text` and a blank screen, forever.
pub fn blink_frames(text: &str) -> impl Iterator<Item = Frame> + Clone + use<> {
    [Frame::Text(text.to_owned()), Frame::Blank].into_iter().cycle()
}

/// Slides `text` in from the right edge of a `cols` wide display and out over the left edge.
pub fn scroll_frames(text: &str, cols: usize) -> ScrollFrames {
    ScrollFrames {
        chars: text.chars().collect(),
        cols,
        index: 0,
    }
}

/// [scroll_frames] followed by a frame with the tail of the text padded out with blanks.
pub fn marquee_frames(text: &str, cols: usize) -> impl Iterator<Item = Frame> + Clone + use<> {
    let chars: Vec<char> = text.chars().collect();
    let last = (chars.len() + cols).saturating_sub(1);
    let start = last.saturating_sub(cols).min(chars.len());
    let end = last.min(chars.len());
    let tail: String = chars[start..end]
        .iter()
        .copied()
        .chain(std::iter::repeat_n(' ', cols))
        .collect();
    scroll_frames(text, cols).chain(once(Frame::Text(tail)))
}

/// Iterator returned by [scroll_frames].
#[derive(Debug, Clone)]
pub struct ScrollFrames {
    chars: Vec<char>,
    cols: usize,
    index: usize,
}

impl Iterator for ScrollFrames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.index >= self.chars.len() + self.cols {
            return None;
        }
        let start = self.index.saturating_sub(self.cols).min(self.chars.len());
        let end = self.index.min(self.chars.len());
        self.index += 1;
        Some(Frame::Text(self.chars[start..end].iter().collect()))
    }
}

/// Splits `text` into display lines: at every `\n`, and every `cols` characters within a line.
pub fn split_lines(text: &str, cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(cols.max(1)) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}

/// Formats a progress bar filling a `cols` wide line, like `[#######-------] 50%`.
///
/// `progress` goes from `0.0` to `1.0`, values outside are clamped. The bar has `cols - 2` cells
/// between the brackets, the percentage follows the closing bracket and runs past the visible
/// width on narrow displays.
pub fn progress_bar_text(cols: usize, progress: f64) -> LcdResult<String> {
    if progress.is_nan() {
        return Err(LcdError::InvalidInput("progress is NaN".to_owned()));
    }
    let progress = progress.clamp(0.0, 1.0);
    let bar_length = cols.saturating_sub(2);
    let block = ((bar_length as f64 * progress).round_ties_even() as usize).min(bar_length);
    let percent = (progress * 100.0) as u32;
    Ok(format!(
        "[{}{}] {}%",
        "#".repeat(block),
        "-".repeat(bar_length - block),
        percent
    ))
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

pub trait TextEffects: CharacterDisplay {
    /// Draws a single animation frame.
    fn render_frame(&mut self, frame: &Frame) -> LcdResult<()> {
        self.clear()?;
        match frame {
            Frame::Blank => Ok(()),
            Frame::Text(text) => self.put_str(text),
        }
    }

    /// Draws every frame, holding each one for `interval`.
    ///
    /// Runs until `frames` ends, so infinite animations must be bounded by the caller.
    fn play<I>(&mut self, frames: I, interval: Duration) -> LcdResult<()>
    where
        I: IntoIterator<Item = Frame>,
    {
        for frame in frames {
            self.render_frame(&frame)?;
            self.pause(interval);
        }
        Ok(())
    }

    /// Writes `text` centered on `row`. Text wider than the display starts at column 0.
    fn print_centered(&mut self, text: &str, row: usize) -> LcdResult<()> {
        let start_col = self.cols().saturating_sub(char_count(text)) / 2;
        self.move_to(start_col, row)?;
        self.put_str(text)
    }

    fn print_top(&mut self, text: &str) -> LcdResult<()> {
        self.print_centered(text, 0)
    }

    fn print_bottom(&mut self, text: &str) -> LcdResult<()> {
        self.print_centered(text, 1)
    }

    fn print_left(&mut self, text: &str) -> LcdResult<()> {
        self.move_to(0, 0)?;
        self.put_str(text)
    }

    fn print_center(&mut self, text: &str) -> LcdResult<()> {
        self.print_centered(text, 0)
    }

    /// Writes `text` aligned to the right edge of the first row.
    fn print_right(&mut self, text: &str) -> LcdResult<()> {
        let start_col = self.cols().saturating_sub(char_count(text));
        self.move_to(start_col, 0)?;
        self.put_str(text)
    }

    /// Blanks the display column by column, from both edges towards the middle.
    fn fade_out(&mut self) -> LcdResult<()> {
        let cols = self.cols();
        for i in 0..cols / 2 {
            for row in 0..self.rows() {
                self.move_to(i, row)?;
                self.put_str(" ")?;
                let right_col = cols - 1 - i;
                if right_col != i {
                    self.move_to(right_col, row)?;
                    self.put_str(" ")?;
                }
            }
            self.pause(FADE_STEP);
        }
        Ok(())
    }

    /// Types `text` centered on `row`, one character every `speed`.
    fn fade_in(&mut self, text: &str, row: usize, speed: Duration) -> LcdResult<()> {
        let start_col = self.cols().saturating_sub(char_count(text)) / 2;
        self.move_to(start_col, row)?;
        let mut buffer = [0; 4];
        for c in text.chars() {
            self.put_str(c.encode_utf8(&mut buffer))?;
            self.pause(speed);
        }
        Ok(())
    }

    /// Writes `text` on `row` one character every `speed`, positioning the cursor for each.
    ///
    /// Characters past the last column are dropped.
    fn wipe_text(&mut self, text: &str, row: usize, speed: Duration) -> LcdResult<()> {
        let mut buffer = [0; 4];
        for (col, c) in text.chars().take(self.cols()).enumerate() {
            self.move_to(col, row)?;
            self.put_str(c.encode_utf8(&mut buffer))?;
            self.pause(speed);
        }
        Ok(())
    }

    /// Scrolls `text` across the first row, moving one column every `speed`.
    fn scroll_text(&mut self, text: &str, speed: Duration) -> LcdResult<()> {
        let frames = scroll_frames(text, self.cols());
        self.play(frames, speed)
    }

    /// Shows `text` blinking, `times` times.
    fn blink_text(&mut self, text: &str, interval: Duration, times: usize) -> LcdResult<()> {
        self.play(blink_frames(text).take(times * 2), interval)
    }

    /// Writes `text` from the top-left corner, breaking lines at `\n` and at the display width.
    ///
    /// Lines below the last row all end up on the last row.
    fn print_multiline(&mut self, text: &str) -> LcdResult<()> {
        for (row, line) in split_lines(text, self.cols()).iter().enumerate() {
            self.move_to(0, row)?;
            self.put_str(line)?;
        }
        Ok(())
    }

    fn wrap_text(&mut self, text: &str) -> LcdResult<()> {
        self.print_multiline(text)
    }

    /// Shows the lines of `text` a screenful at a time, advancing one line every `speed`.
    fn auto_scroll(&mut self, text: &str, speed: Duration) -> LcdResult<()> {
        let lines: Vec<&str> = text.split('\n').collect();
        for i in 0..lines.len() {
            let end = (i + self.rows()).min(lines.len());
            self.clear()?;
            self.print_multiline(&lines[i..end].join("\n"))?;
            self.pause(speed);
        }
        Ok(())
    }

    /// Replaces the display content with a progress bar, see [progress_bar_text].
    fn progress_bar(&mut self, progress: f64) -> LcdResult<()> {
        let text = progress_bar_text(self.cols(), progress)?;
        self.clear()?;
        self.move_to(0, 0)?;
        self.put_str(&text)
    }

    /// Shows zero to three dots, half a second each.
    fn loading_animation(&mut self) -> LcdResult<()> {
        for dots in 0..=LOADING_DOTS {
            self.clear()?;
            self.move_to(0, 0)?;
            self.put_str(&".".repeat(dots))?;
            self.pause(LOADING_STEP);
        }
        Ok(())
    }

    /// Scrolls `text` once if it is wider than the display, otherwise just writes it.
    ///
    /// Use [marquee_frames] with [Iterator::cycle] and [Self::play] to keep it scrolling.
    fn scroll_if_needed(&mut self, text: &str, speed: Duration) -> LcdResult<()> {
        if char_count(text) > self.cols() {
            let frames = marquee_frames(text, self.cols());
            self.play(frames, speed)
        } else {
            self.clear()?;
            self.put_str(text)
        }
    }
}

impl<T: ?Sized + CharacterDisplay> TextEffects for T {}
