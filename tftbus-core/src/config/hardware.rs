//! Display hardware configuration
//!
//! Describes how a display is wired to the microcontroller. A board picks
//! one of these at startup; the driver only ever sees the derived
//! [`LinePresence`] flags.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tftbus_hal::spi::{Mode, SpiConfig};

/// Optional lines that are physically wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinePresence {
    /// Controller reset line
    pub reset: bool,
    /// Backlight enable line
    pub backlight: bool,
    /// Bus data-input line (MISO), needed for register reads
    pub data_input: bool,
}

impl LinePresence {
    /// Every optional line wired
    pub const fn all() -> Self {
        Self {
            reset: true,
            backlight: true,
            data_input: true,
        }
    }

    /// Only chip-select, data/command and the write-only bus
    pub const fn none() -> Self {
        Self {
            reset: false,
            backlight: false,
            data_input: false,
        }
    }
}

/// SPI clock settings for the display bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusTiming {
    /// SCK frequency in Hz
    pub frequency_hz: u32,
    /// SPI mode number (0-3)
    pub mode: u8,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            frequency_hz: 16_000_000,
            mode: 0,
        }
    }
}

impl BusTiming {
    /// Convert to a HAL bus configuration
    pub fn spi_config(&self) -> Result<SpiConfig, ConfigError> {
        let mode = match self.mode {
            0 => Mode::Mode0,
            1 => Mode::Mode1,
            2 => Mode::Mode2,
            3 => Mode::Mode3,
            other => return Err(ConfigError::InvalidSpiMode(other)),
        };
        if self.frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        Ok(SpiConfig::new(self.frequency_hz, mode))
    }
}

/// SPI display wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TftHwConfig {
    /// Bus clock pin
    pub sck: u8,
    /// Bus data-out pin
    pub mosi: u8,
    /// Bus data-in pin, if wired
    pub miso: Option<u8>,
    /// Chip-select pin
    pub cs: u8,
    /// Data/command-select pin
    pub dc: u8,
    /// Reset pin, if wired
    pub reset: Option<u8>,
    /// Backlight pin, if wired
    pub backlight: Option<u8>,
    /// Clock settings
    pub bus: BusTiming,
}

impl TftHwConfig {
    /// Wiring with only the mandatory pins
    pub const fn new(sck: u8, mosi: u8, cs: u8, dc: u8) -> Self {
        Self {
            sck,
            mosi,
            miso: None,
            cs,
            dc,
            reset: None,
            backlight: None,
            bus: BusTiming {
                frequency_hz: 16_000_000,
                mode: 0,
            },
        }
    }

    /// Add a data-in pin
    pub const fn with_miso(mut self, pin: u8) -> Self {
        self.miso = Some(pin);
        self
    }

    /// Add a reset pin
    pub const fn with_reset(mut self, pin: u8) -> Self {
        self.reset = Some(pin);
        self
    }

    /// Add a backlight pin
    pub const fn with_backlight(mut self, pin: u8) -> Self {
        self.backlight = Some(pin);
        self
    }

    /// Override the bus clock
    pub const fn with_frequency(mut self, frequency_hz: u32) -> Self {
        self.bus.frequency_hz = frequency_hz;
        self
    }

    /// Which optional lines this wiring provides
    pub const fn presence(&self) -> LinePresence {
        LinePresence {
            reset: self.reset.is_some(),
            backlight: self.backlight.is_some(),
            data_input: self.miso.is_some(),
        }
    }

    /// Check pin numbers and bus settings for a chip with `gpio_count` pins
    pub fn validate(&self, gpio_count: u8) -> Result<(), ConfigError> {
        let pins = [
            Some(self.sck),
            Some(self.mosi),
            self.miso,
            Some(self.cs),
            Some(self.dc),
            self.reset,
            self.backlight,
        ];

        for (i, pin) in pins.iter().enumerate() {
            let Some(pin) = *pin else { continue };
            if pin >= gpio_count {
                return Err(ConfigError::InvalidPin(pin));
            }
            if pins[i + 1..].contains(&Some(pin)) {
                return Err(ConfigError::DuplicatePin(pin));
            }
        }

        self.bus.spi_config().map(|_| ())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number does not exist on this chip
    InvalidPin(u8),
    /// Pin assigned to more than one line
    DuplicatePin(u8),
    /// Bus clock of 0 Hz
    ZeroFrequency,
    /// SPI mode outside 0-3
    InvalidSpiMode(u8),
}
