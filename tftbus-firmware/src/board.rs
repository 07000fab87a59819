//! Board wiring
//!
//! Raspberry Pi Pico with a 2.8" ILI9341 module on SPI0.
//!
//! | Signal    | GPIO |
//! |-----------|------|
//! | MISO      | 16   |
//! | CS        | 17   |
//! | SCK       | 18   |
//! | MOSI      | 19   |
//! | DC        | 20   |
//! | RESET     | 21   |
//! | BACKLIGHT | 22   |

use embassy_rp::gpio::Pin;
use embassy_rp::peripherals::{PIN_16, PIN_17, PIN_18, PIN_19, PIN_20, PIN_21, PIN_22, SPI0};
use embassy_rp::{Peri, Peripherals};
use tftbus_core::config::TftHwConfig;

/// GPIO count of the RP2040
pub const GPIO_COUNT: u8 = 30;

/// SPI clock for the display
pub const SPI_FREQUENCY_HZ: u32 = 32_000_000;

/// Panel resolution in pixels (width, height)
pub const PANEL_SIZE: (u16, u16) = (240, 320);

/// Peripherals wired to the display
pub struct DisplayPins {
    pub spi: Peri<'static, SPI0>,
    pub miso: Peri<'static, PIN_16>,
    pub cs: Peri<'static, PIN_17>,
    pub sck: Peri<'static, PIN_18>,
    pub mosi: Peri<'static, PIN_19>,
    pub dc: Peri<'static, PIN_20>,
    pub reset: Peri<'static, PIN_21>,
    pub backlight: Peri<'static, PIN_22>,
}

impl DisplayPins {
    /// Claim the display peripherals
    pub fn take(p: Peripherals) -> Self {
        Self {
            spi: p.SPI0,
            miso: p.PIN_16,
            cs: p.PIN_17,
            sck: p.PIN_18,
            mosi: p.PIN_19,
            dc: p.PIN_20,
            reset: p.PIN_21,
            backlight: p.PIN_22,
        }
    }

    /// Hardware config read back from the claimed pins
    pub fn config(&self) -> TftHwConfig {
        TftHwConfig::new(self.sck.pin(), self.mosi.pin(), self.cs.pin(), self.dc.pin())
            .with_miso(self.miso.pin())
            .with_reset(self.reset.pin())
            .with_backlight(self.backlight.pin())
            .with_frequency(SPI_FREQUENCY_HZ)
    }
}
