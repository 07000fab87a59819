//! SPI bus abstractions
//!
//! The display driver never shifts bits itself. It hands single words and
//! whole blocks to an [`SpiBus`], which owns clocking, framing and any DMA.

/// Width of one bus word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WordSize {
    /// 8-bit frames
    Bits8,
    /// 16-bit frames, most significant byte first
    #[default]
    Bits16,
}

impl WordSize {
    /// Number of bytes one word occupies on the wire
    pub const fn bytes(self) -> usize {
        match self {
            WordSize::Bits8 => 1,
            WordSize::Bits16 => 2,
        }
    }
}

/// SPI bus master used as the display transport
///
/// Every call blocks until the words have been queued for shifting;
/// [`flush`](SpiBus::flush) blocks until they are physically on the wire.
/// Block methods must move the whole block in as few bus operations as the
/// hardware allows; callers rely on them not degrading to a per-word loop.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Select the frame width for subsequent word writes
    ///
    /// Transports with a fixed frame width ignore this.
    fn set_word_size(&mut self, _size: WordSize) {}

    /// Shift a single word out
    fn write_word(&mut self, word: u16) -> Result<(), Self::Error>;

    /// Shift a single byte in (clocking out filler)
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Block transfer that advances through `words`
    fn write_words(&mut self, words: &[u16]) -> Result<(), Self::Error>;

    /// Block transfer that re-sends `word` `count` times without advancing
    fn write_repeated(&mut self, word: u16, count: usize) -> Result<(), Self::Error>;

    /// Wait until all queued words have been shifted out
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    type Error = T::Error;

    fn set_word_size(&mut self, size: WordSize) {
        T::set_word_size(self, size)
    }

    fn write_word(&mut self, word: u16) -> Result<(), Self::Error> {
        T::write_word(self, word)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        T::read_byte(self)
    }

    fn write_words(&mut self, words: &[u16]) -> Result<(), Self::Error> {
        T::write_words(self, words)
    }

    fn write_repeated(&mut self, word: u16, count: usize) -> Result<(), Self::Error> {
        T::write_repeated(self, word, count)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 16_000_000, // 16 MHz, safe for most TFT controllers
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

impl SpiConfig {
    /// Build a config from a frequency and SPI mode
    pub fn new(frequency: u32, mode: Mode) -> Self {
        let (polarity, phase) = mode.into();
        Self {
            frequency,
            polarity,
            phase,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_size_bytes() {
        assert_eq!(WordSize::Bits8.bytes(), 1);
        assert_eq!(WordSize::Bits16.bytes(), 2);
        assert_eq!(WordSize::default(), WordSize::Bits16);
    }

    #[test]
    fn test_config_from_mode() {
        let config = SpiConfig::new(40_000_000, Mode::Mode3);
        assert_eq!(config.frequency, 40_000_000);
        assert_eq!(config.polarity, Polarity::IdleHigh);
        assert_eq!(config.phase, Phase::CaptureOnSecondTransition);

        let config = SpiConfig::new(1_000_000, Mode::Mode0);
        assert_eq!(config.polarity, Polarity::IdleLow);
        assert_eq!(config.phase, Phase::CaptureOnFirstTransition);
    }
}
