//! tftbus bring-up firmware
//!
//! Wires an SPI TFT module to an RP2040, identifies the controller and
//! cycles full-screen color fills. Useful for checking wiring and bus speed
//! on a new board before a graphics stack goes on top.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level as PinLevel, Output};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use tftbus_core::traits::TftInterface;
use tftbus_drivers::tft::TftSpi;
use tftbus_hal::ehal::{EhOutputPin, EhSpiBus};
use tftbus_hal::spi::{Phase, Polarity};
use tftbus_hal::{Level, LineBank, WordSize};

mod board;

/// MIPI DCS commands used for bring-up
mod dcs {
    pub const SLEEP_OUT: u16 = 0x11;
    pub const DISPLAY_ON: u16 = 0x29;
    pub const COLUMN_ADDRESS_SET: u16 = 0x2A;
    pub const PAGE_ADDRESS_SET: u16 = 0x2B;
    pub const MEMORY_WRITE: u16 = 0x2C;
    pub const PIXEL_FORMAT_SET: u16 = 0x3A;
}

/// RGB565 test colors
const COLORS: [u16; 4] = [0xF800, 0x07E0, 0x001F, 0xFFFF];

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("tftbus firmware starting...");

    let p = embassy_rp::init(Default::default());
    let pins = board::DisplayPins::take(p);

    let hw = pins.config();
    if let Err(e) = hw.validate(board::GPIO_COUNT) {
        defmt::panic!("Invalid display wiring: {}", e);
    }

    let bus_config = match hw.bus.spi_config() {
        Ok(c) => c,
        Err(e) => defmt::panic!("Invalid bus timing: {}", e),
    };

    let mut config = spi::Config::default();
    config.frequency = bus_config.frequency;
    config.polarity = match bus_config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match bus_config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };

    let spi = Spi::new_blocking(pins.spi, pins.sck, pins.mosi, pins.miso, config);
    info!("SPI0 configured at {} Hz", bus_config.frequency);

    let lines = LineBank::new(
        EhOutputPin::new(Output::new(pins.cs, PinLevel::High), Level::High),
        EhOutputPin::new(Output::new(pins.dc, PinLevel::High), Level::High),
    )
    .with_reset(EhOutputPin::new(
        Output::new(pins.reset, PinLevel::Low),
        Level::Low,
    ))
    .with_backlight(EhOutputPin::new(
        Output::new(pins.backlight, PinLevel::Low),
        Level::Low,
    ));

    let mut tft = TftSpi::new(EhSpiBus::new(spi), lines, Delay, hw.presence());
    tft.init();
    info!("Display bus initialized");

    match tft.get_id() {
        Ok(0) => warn!("Display controller did not identify itself"),
        Ok(id) => info!("Display controller id: {=u32:#x}", id),
        Err(e) => error!("Identification failed: {}", e),
    }

    if let Err(e) = wake(&mut tft).await {
        error!("Display wake-up failed: {}", e);
    }

    let (width, height) = board::PANEL_SIZE;
    let pixels = usize::from(width) * usize::from(height);

    loop {
        for color in COLORS {
            let result = set_window(&mut tft, width, height)
                .and_then(|()| tft.write_multiple(color, pixels));
            match result {
                Ok(()) => trace!("Filled {=u16:#x}", color),
                Err(e) => warn!("Fill failed: {}", e),
            }
            Timer::after_millis(500).await;
        }
    }
}

/// Send one command with its parameter words
fn command<T: TftInterface>(tft: &mut T, reg: u16, params: &[u16]) -> Result<(), T::Error> {
    tft.data_transfer_begin(WordSize::Bits8);
    let result = tft
        .write_reg(reg)
        .and_then(|()| params.iter().try_for_each(|&word| tft.write_data(word)));
    tft.data_transfer_end();
    result
}

/// Minimal wake-up: leave sleep, select RGB565, display on
async fn wake<T: TftInterface>(tft: &mut T) -> Result<(), T::Error> {
    command(tft, dcs::SLEEP_OUT, &[])?;
    Timer::after_millis(120).await;
    command(tft, dcs::PIXEL_FORMAT_SET, &[0x55])?;
    command(tft, dcs::DISPLAY_ON, &[])?;
    Ok(())
}

/// Open a full-panel window and start a memory write
fn set_window<T: TftInterface>(tft: &mut T, width: u16, height: u16) -> Result<(), T::Error> {
    let [xh, xl] = (width - 1).to_be_bytes();
    let [yh, yl] = (height - 1).to_be_bytes();
    command(tft, dcs::COLUMN_ADDRESS_SET, &[0, 0, u16::from(xh), u16::from(xl)])?;
    command(tft, dcs::PAGE_ADDRESS_SET, &[0, 0, u16::from(yh), u16::from(yl)])?;
    command(tft, dcs::MEMORY_WRITE, &[])
}
