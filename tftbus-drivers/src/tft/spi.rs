//! SPI TFT bus transaction driver
//!
//! Drives a display controller through a 4-wire serial interface: SCK, MOSI,
//! optional MISO, plus chip-select (CS) and data/command-select (DC).
//!
//! # Bus protocol
//!
//! - CS low frames a transaction; the controller ignores the bus otherwise
//! - DC low marks the word on the bus as a command (register id)
//! - DC high marks the word as data; it is left high between commands
//! - Identification reads shift out the register id, then clock in four
//!   bytes on MISO
//!
//! # Usage
//!
//! ```ignore
//! let mut tft = TftSpi::new(bus, lines, delay, config.presence());
//! tft.init();
//!
//! let id = tft.get_id()?;
//!
//! tft.data_transfer_begin(WordSize::Bits16);
//! tft.write_reg(0x2C)?; // memory write
//! tft.data_transfer_end();
//! tft.write_multiple(0x0000, 320 * 240)?; // clear to black
//! ```

use embedded_hal::delay::DelayNs;
use tftbus_core::config::LinePresence;
use tftbus_core::regs::{READ_ID_SHIFT, RESET_SETTLE_MS};
use tftbus_core::traits::TftInterface;
use tftbus_core::BlockTransfer;
use tftbus_hal::{ControlLine, ControlLines, Level, SpiBus, WordSize};

/// Bytes clocked in by an identification read
const ID_BYTES: usize = 4;

/// SPI TFT bus driver
///
/// Owns the bus transport, the control lines and a delay provider for the
/// lifetime of the display. All operations block until the bus is idle again.
pub struct TftSpi<B, L, D> {
    bus: B,
    lines: L,
    delay: D,
    presence: LinePresence,
    /// CS currently asserted
    active: bool,
}

impl<B, L, D> TftSpi<B, L, D>
where
    B: SpiBus,
    L: ControlLines,
    D: DelayNs,
{
    /// Create a driver
    ///
    /// `presence` tells the driver which optional lines are wired; operations
    /// needing an absent line skip it.
    pub fn new(bus: B, lines: L, delay: D, presence: LinePresence) -> Self {
        Self {
            bus,
            lines,
            delay,
            presence,
            active: false,
        }
    }

    /// Optional lines this driver was configured with
    pub fn presence(&self) -> LinePresence {
        self.presence
    }

    /// True between `data_transfer_begin` and `data_transfer_end`
    pub fn in_transaction(&self) -> bool {
        self.active
    }

    /// Switch the backlight, if one is wired
    pub fn set_backlight(&mut self, on: bool) {
        if self.presence.backlight {
            self.lines.set_level(ControlLine::Backlight, Level::from(on));
        }
    }

    /// Give back the bus, lines and delay
    pub fn release(self) -> (B, L, D) {
        (self.bus, self.lines, self.delay)
    }

    fn select(&mut self) {
        debug_assert!(!self.active, "display transactions must not nest");
        self.lines.set_level(ControlLine::ChipSelect, Level::Low);
        self.active = true;
    }

    fn read_id_raw(&mut self, reg: u16) -> Result<u32, B::Error> {
        self.write_reg(reg)?;

        let mut data = 0u32;
        for _ in 0..ID_BYTES {
            data = (data << 8) | u32::from(self.bus.read_byte()?);
        }
        Ok(data)
    }
}

impl<B, L, D> TftInterface for TftSpi<B, L, D>
where
    B: SpiBus,
    L: ControlLines,
    D: DelayNs,
{
    type Error = B::Error;

    fn init(&mut self) {
        if self.presence.reset {
            self.lines.configure_output(ControlLine::Reset);
            self.lines.set_level(ControlLine::Reset, Level::High);
            self.delay.delay_ms(RESET_SETTLE_MS);
        }

        if self.presence.backlight {
            self.lines.configure_output(ControlLine::Backlight);
            self.lines.set_level(ControlLine::Backlight, Level::High);
        }

        self.lines.configure_output(ControlLine::DataCommand);
        self.lines.configure_output(ControlLine::ChipSelect);

        self.lines.set_level(ControlLine::DataCommand, Level::High);
        self.lines.set_level(ControlLine::ChipSelect, Level::High);
        self.active = false;

        #[cfg(feature = "defmt")]
        defmt::debug!("TFT bus initialized: {}", self.presence);
    }

    fn data_transfer_begin(&mut self, word_size: WordSize) {
        self.bus.set_word_size(word_size);
        self.select();
    }

    fn data_transfer_end(&mut self) {
        self.lines.set_level(ControlLine::ChipSelect, Level::High);
        self.active = false;
    }

    fn write_reg(&mut self, reg: u16) -> Result<(), Self::Error> {
        self.lines.set_level(ControlLine::DataCommand, Level::Low);
        let result = self
            .bus
            .write_word(reg)
            .and_then(|()| self.bus.flush());
        self.lines.set_level(ControlLine::DataCommand, Level::High);
        result
    }

    fn read_id(&mut self, reg: u16) -> Result<u32, Self::Error> {
        if !self.presence.data_input {
            return Ok(0);
        }

        self.data_transfer_begin(WordSize::Bits8);
        let result = self.read_id_raw(reg);
        self.data_transfer_end();

        let id = result? >> READ_ID_SHIFT;

        #[cfg(feature = "defmt")]
        defmt::debug!("TFT register {=u16:#x} id {=u32:#x}", reg, id);

        Ok(id)
    }

    fn transmit(&mut self, word: u16) -> Result<(), Self::Error> {
        self.bus.write_word(word)?;
        self.bus.flush()
    }

    fn transmit_dma(&mut self, transfer: BlockTransfer<'_>) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "TFT block transfer: {} words, {}",
            transfer.len(),
            transfer.memory_increment()
        );

        self.data_transfer_begin(WordSize::Bits16);
        self.lines.set_level(ControlLine::DataCommand, Level::High);

        let result = match transfer {
            BlockTransfer::Sequence(words) => self.bus.write_words(words),
            BlockTransfer::Fill { word, count } => self.bus.write_repeated(word, count),
        }
        .and_then(|()| self.bus.flush());

        self.data_transfer_end();
        result
    }
}
