//! Display bus call surface
//!
//! Graphics layers talk to the display controller exclusively through this
//! trait. It is deliberately raw: register ids and 16-bit words in, 32-bit
//! identification values out. Pixel formats and command tables live above.

use tftbus_hal::WordSize;

use crate::regs::{LCD_READ_ID, LCD_READ_ID4};
use crate::transfer::BlockTransfer;

/// Returns true if an identification read produced no usable answer
///
/// A floating or held input line reads back as all zeros or all ones in the
/// low 16 bits.
pub fn is_no_answer(id: u32) -> bool {
    let low = id & 0xFFFF;
    low == 0x0000 || low == 0xFFFF
}

/// Register and pixel transfer primitives of an SPI display controller
///
/// # Transactions
///
/// A transaction is bracketed by [`data_transfer_begin`](Self::data_transfer_begin)
/// and [`data_transfer_end`](Self::data_transfer_end) (or [`abort`](Self::abort)).
/// Register writes and single-word transmits must happen inside a bracket
/// opened by the caller. [`read_id`](Self::read_id) and
/// [`transmit_dma`](Self::transmit_dma) open and close their own.
/// Brackets never nest.
pub trait TftInterface {
    /// Transport error
    type Error;

    /// Configure the control lines and bring the controller out of reset
    ///
    /// Must be called once before any other operation.
    fn init(&mut self);

    /// Assert chip-select, starting a transaction
    ///
    /// `word_size` is handed to the transport; transports with a fixed frame
    /// width ignore it.
    fn data_transfer_begin(&mut self, word_size: WordSize);

    /// Release chip-select, ending the transaction
    fn data_transfer_end(&mut self);

    /// Cancel the current transaction
    ///
    /// Only the chip-select boundary is closed; no words are sent.
    fn abort(&mut self) {
        self.data_transfer_end();
    }

    /// Always false: every transfer completes before its call returns
    fn is_busy(&self) -> bool {
        false
    }

    /// Send a register id in command mode, leaving data/command high
    ///
    /// Returns once the id has left the transport, so data/command and
    /// chip-select may change right after.
    fn write_reg(&mut self, reg: u16) -> Result<(), Self::Error>;

    /// Read a 32-bit identification value from `reg`
    ///
    /// Runs its own transaction with 8-bit words, so the register id goes
    /// out as a single byte whatever width the previous transaction used.
    ///
    /// Returns the four response bytes big-endian, shifted right by
    /// [`READ_ID_SHIFT`](crate::regs::READ_ID_SHIFT). Returns 0 when the
    /// board has no data-input line.
    fn read_id(&mut self, reg: u16) -> Result<u32, Self::Error>;

    /// Identify the attached controller
    ///
    /// Queries [`LCD_READ_ID`] first and falls back to [`LCD_READ_ID4`] once
    /// if the first answer [`is_no_answer`]. Some controllers only respond to
    /// the second query because of how they handle the unsupported register,
    /// so treat the value as a hint. Zero means unknown controller.
    fn get_id(&mut self) -> Result<u32, Self::Error> {
        let id = self.read_id(LCD_READ_ID)?;
        if is_no_answer(id) {
            #[cfg(feature = "defmt")]
            defmt::debug!("TFT did not answer READ_ID, trying READ_ID4");

            return self.read_id(LCD_READ_ID4);
        }
        Ok(id)
    }

    /// Send one word, no chip-select handling
    ///
    /// Returns once the word has left the transport.
    fn transmit(&mut self, word: u16) -> Result<(), Self::Error>;

    /// Run one block transfer in data mode inside its own transaction
    ///
    /// Blocks until every word has been shifted out.
    fn transmit_dma(&mut self, transfer: BlockTransfer<'_>) -> Result<(), Self::Error>;

    /// Send one data word
    fn write_data(&mut self, word: u16) -> Result<(), Self::Error> {
        self.transmit(word)
    }

    /// Stream distinct words
    fn write_sequence(&mut self, words: &[u16]) -> Result<(), Self::Error> {
        self.transmit_dma(BlockTransfer::Sequence(words))
    }

    /// Write `word` `count` times
    fn write_multiple(&mut self, word: u16, count: usize) -> Result<(), Self::Error> {
        self.transmit_dma(BlockTransfer::fill(word, count))
    }
}
