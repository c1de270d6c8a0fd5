mod config;

use crate::config::Config;
use charlcd::display::CharLcd;
use charlcd::effects::TextEffects;
use dotenv::dotenv;
use linux_embedded_hal::{Delay, I2cdev};
use log::{debug, info, warn};
use std::env::var;
use std::thread::sleep;
use std::time::Duration;
use sysinfo::System;
use time::OffsetDateTime;

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    info!("charlcd demo starting...");

    // Get the bus device from env
    let bus_path = var("LCD_I2C_BUS").unwrap_or_else(|_| "/dev/i2c-1".to_string());

    info!("LCD bus @ {}", bus_path);

    debug!("Trying to load config...");
    let config = if let Some(config) = Config::try_load()? {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save()?;
        info!("Default config saved.");
        config
    };
    debug!("{:?}", config);

    debug!("Opening I2C bus...");
    let i2c = I2cdev::new(&bus_path)?;
    debug!("{} opened.", bus_path);

    debug!("Initializing LCD...");
    let mut lcd = CharLcd::new(i2c, Delay, config.lcd_config())?;
    info!("{}x{} LCD initialized.", lcd.cols(), lcd.rows());

    const UNKNOWN_STR: &str = "???";
    let host_name = System::host_name().unwrap_or_else(|| UNKNOWN_STR.to_string());
    // The character ROM has no glyphs past 8 bits
    let host_name: String = host_name
        .chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect();

    lcd.print_top(&host_name)?;
    lcd.print_bottom("Hello!")?;
    sleep(Duration::from_secs(2));

    info!("Progress bar...");
    for step in 0..=10 {
        lcd.progress_bar(step as f64 / 10.0)?;
        sleep(Duration::from_millis(300));
    }

    info!("Scrolling...");
    lcd.scroll_text("HD44780 over a PCF8574 expander", Duration::from_millis(250))?;

    info!("Blinking...");
    lcd.blink_text("Ready", Duration::from_millis(500), 3)?;

    info!("Starting clock...");
    lcd.clear()?;
    lcd.print_top(&host_name)?;
    loop {
        let now = OffsetDateTime::now_local().unwrap_or_else(|err| {
            warn!("Local offset unavailable ({}), using UTC", err);
            OffsetDateTime::now_utc()
        });
        let clock = format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second());
        lcd.print_bottom(&clock)?;

        sleep(Duration::from_secs(1));
    }
}
