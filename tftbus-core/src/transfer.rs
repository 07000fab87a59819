//! Block transfer descriptors
//!
//! A descriptor is built for one bulk operation and consumed by it. The two
//! variants map onto the two addressing modes of a DMA-style transport:
//! advancing through a source buffer, or re-reading a single source word.

/// Source addressing mode of a block transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryIncrement {
    /// Advance through the source buffer, one word per bus word
    Enabled,
    /// Re-send the same source word for every bus word
    Disabled,
}

/// One bulk pixel transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlockTransfer<'a> {
    /// Stream distinct words in order
    Sequence(&'a [u16]),
    /// Write `word` `count` times (e.g. clear to one color)
    Fill {
        /// Word repeated for the whole transfer
        word: u16,
        /// Number of bus words
        count: usize,
    },
}

impl<'a> BlockTransfer<'a> {
    /// Create a fill transfer
    pub const fn fill(word: u16, count: usize) -> Self {
        BlockTransfer::Fill { word, count }
    }

    /// Addressing mode this transfer uses
    pub const fn memory_increment(&self) -> MemoryIncrement {
        match self {
            BlockTransfer::Sequence(_) => MemoryIncrement::Enabled,
            BlockTransfer::Fill { .. } => MemoryIncrement::Disabled,
        }
    }

    /// Number of words that will reach the bus
    pub const fn len(&self) -> usize {
        match self {
            BlockTransfer::Sequence(words) => words.len(),
            BlockTransfer::Fill { count, .. } => *count,
        }
    }

    /// True if no words will be sent
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [u16]> for BlockTransfer<'a> {
    fn from(words: &'a [u16]) -> Self {
        BlockTransfer::Sequence(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_descriptor() {
        let words = [0xF800, 0x07E0, 0x001F];
        let transfer = BlockTransfer::from(&words[..]);

        assert_eq!(transfer.memory_increment(), MemoryIncrement::Enabled);
        assert_eq!(transfer.len(), 3);
        assert!(!transfer.is_empty());
    }

    #[test]
    fn test_fill_descriptor() {
        let transfer = BlockTransfer::fill(0xFFFF, 320 * 240);

        assert_eq!(transfer.memory_increment(), MemoryIncrement::Disabled);
        assert_eq!(transfer.len(), 76_800);
    }

    #[test]
    fn test_empty_transfers() {
        assert!(BlockTransfer::fill(0x1234, 0).is_empty());
        assert!(BlockTransfer::Sequence(&[]).is_empty());
    }
}
