use charlcd::display::LcdConfig;
use charlcd::hd44780::driver::Backlight;
use dotenv::var;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't access the config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Display settings, stored as JSON in `CONFIG_FILE` (`lcd.json` by default).
#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub address: u8,
    pub cols: u8,
    pub rows: u8,
    pub boot_skip: bool,
    pub backlight: bool,
}

impl Config {
    fn path() -> PathBuf {
        PathBuf::from(var("CONFIG_FILE").unwrap_or_else(|_| "lcd.json".to_string()))
    }

    /// Loads the config file, or returns `None` if there is none.
    pub fn try_load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::path();
        if !config_path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(config_path)?;
        let reader = std::io::BufReader::new(file);
        Ok(Some(serde_json::from_reader(reader)?))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let file = std::fs::File::create(Self::path())?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn lcd_config(&self) -> LcdConfig {
        LcdConfig::default()
            .with_address(self.address)
            .with_size(self.cols, self.rows)
            .with_boot_skip(self.boot_skip)
            .with_backlight(Backlight::from(self.backlight))
    }
}

impl Default for Config {
    fn default() -> Self {
        let lcd = LcdConfig::default();
        Config {
            address: lcd.address,
            cols: lcd.cols,
            rows: lcd.rows,
            boot_skip: lcd.boot_skip,
            backlight: true,
        }
    }
}
