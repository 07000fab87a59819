//! Adapters from `embedded-hal` 1.0 peripherals
//!
//! Most chip HALs already expose `embedded_hal::spi::SpiBus<u8>` and
//! `embedded_hal::digital::OutputPin`. These wrappers lift them into the
//! traits the display driver consumes.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin as EhOutputPinTrait;
use embedded_hal::spi::SpiBus as EhSpiBusTrait;

use crate::gpio::{Level, OutputPin};
use crate::spi::{SpiBus, WordSize};

/// Bytes staged per bus write during block transfers
pub const CHUNK_BYTES: usize = 64;

/// Byte clocked out on MOSI while reading
const READ_FILLER: u8 = 0x00;

/// [`SpiBus`] over a byte-oriented `embedded-hal` SPI bus
///
/// Words are serialized most significant byte first. Block transfers are
/// staged through a [`CHUNK_BYTES`] stack buffer so a whole-screen fill costs
/// one bus write per chunk rather than one per pixel.
pub struct EhSpiBus<SPI> {
    spi: SPI,
    word_size: WordSize,
}

impl<SPI> EhSpiBus<SPI>
where
    SPI: EhSpiBusTrait<u8>,
{
    /// Wrap a bus, starting with 16-bit words
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            word_size: WordSize::default(),
        }
    }

    /// Current frame width
    pub fn word_size(&self) -> WordSize {
        self.word_size
    }

    /// Give the underlying bus back
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Serialize one word into `out`, returning the byte count
    fn encode(&self, word: u16, out: &mut [u8]) -> usize {
        match self.word_size {
            WordSize::Bits8 => {
                out[0] = word as u8;
                1
            }
            WordSize::Bits16 => {
                out[..2].copy_from_slice(&word.to_be_bytes());
                2
            }
        }
    }

    fn words_per_chunk(&self) -> usize {
        CHUNK_BYTES / self.word_size.bytes()
    }
}

impl<SPI> SpiBus for EhSpiBus<SPI>
where
    SPI: EhSpiBusTrait<u8>,
{
    type Error = SPI::Error;

    fn set_word_size(&mut self, size: WordSize) {
        self.word_size = size;
    }

    fn write_word(&mut self, word: u16) -> Result<(), Self::Error> {
        let mut buf = [0u8; 2];
        let len = self.encode(word, &mut buf);
        self.spi.write(&buf[..len])
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.spi.transfer(&mut buf, &[READ_FILLER])?;
        Ok(buf[0])
    }

    fn write_words(&mut self, words: &[u16]) -> Result<(), Self::Error> {
        let mut chunk = [0u8; CHUNK_BYTES];

        for group in words.chunks(self.words_per_chunk()) {
            let mut len = 0;
            for &word in group {
                len += self.encode(word, &mut chunk[len..]);
            }
            self.spi.write(&chunk[..len])?;
        }

        Ok(())
    }

    fn write_repeated(&mut self, word: u16, count: usize) -> Result<(), Self::Error> {
        let per_chunk = self.words_per_chunk();
        let step = self.word_size.bytes();

        // Pattern is identical in every chunk, so stage it once
        let mut chunk = [0u8; CHUNK_BYTES];
        let mut offset = 0;
        for _ in 0..count.min(per_chunk) {
            offset += self.encode(word, &mut chunk[offset..]);
        }

        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(per_chunk);
            self.spi.write(&chunk[..n * step])?;
            remaining -= n;
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.spi.flush()
    }
}

/// [`OutputPin`] over an infallible `embedded-hal` output pin
///
/// Tracks the driven level so callers can query it without requiring
/// `StatefulOutputPin`.
pub struct EhOutputPin<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutputPin<P>
where
    P: EhOutputPinTrait<Error = Infallible>,
{
    /// Wrap a pin that is currently driven at `level`
    pub fn new(pin: P, level: Level) -> Self {
        Self {
            pin,
            high: level == Level::High,
        }
    }

    /// Give the underlying pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutputPin<P>
where
    P: EhOutputPinTrait<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(e) => match e {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(e) => match e {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
