//! Property tests for the SPI TFT transaction protocol
//!
//! Runs the driver against a recording bus and checks the chip-select and
//! data/command invariants over arbitrary operation sequences.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use proptest::prelude::*;
use tftbus_core::config::LinePresence;
use tftbus_core::regs::{LCD_READ_ID, LCD_READ_ID4};
use tftbus_core::traits::TftInterface;
use tftbus_drivers::tft::TftSpi;
use tftbus_hal::{ControlLine, ControlLines, Level, SpiBus, WordSize};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Wire {
    Cs(Level),
    Dc(Level),
    Word(u16),
    Read,
    Block(Vec<u16>),
    Fill(u16, usize),
}

#[derive(Default)]
struct Log {
    wire: Vec<Wire>,
    replies: VecDeque<u8>,
    cs: Option<Level>,
    dc: Option<Level>,
    /// Bus activity seen while CS was not low
    stray: usize,
    /// Block words seen while DC was not high
    blocks_in_command_mode: usize,
    /// Bus writes not yet drained by a flush
    queued: usize,
    /// CS or DC changes made while writes were still queued
    early_line_changes: usize,
}

impl Log {
    fn bus_event(&mut self, wire: Wire) {
        if self.cs != Some(Level::Low) {
            self.stray += 1;
        }
        if matches!(wire, Wire::Block(_) | Wire::Fill(..)) && self.dc != Some(Level::High) {
            self.blocks_in_command_mode += 1;
        }
        if wire != Wire::Read {
            self.queued += 1;
        }
        self.wire.push(wire);
    }

    fn line_change(&mut self) {
        if self.queued > 0 {
            self.early_line_changes += 1;
        }
    }
}

type Shared = Rc<RefCell<Log>>;

struct Bus(Shared);

impl SpiBus for Bus {
    type Error = Infallible;

    fn write_word(&mut self, word: u16) -> Result<(), Infallible> {
        self.0.borrow_mut().bus_event(Wire::Word(word));
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, Infallible> {
        let mut log = self.0.borrow_mut();
        log.bus_event(Wire::Read);
        Ok(log.replies.pop_front().unwrap_or(0))
    }

    fn write_words(&mut self, words: &[u16]) -> Result<(), Infallible> {
        self.0.borrow_mut().bus_event(Wire::Block(words.to_vec()));
        Ok(())
    }

    fn write_repeated(&mut self, word: u16, count: usize) -> Result<(), Infallible> {
        self.0.borrow_mut().bus_event(Wire::Fill(word, count));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().queued = 0;
        Ok(())
    }
}

struct Lines(Shared);

impl ControlLines for Lines {
    fn configure_output(&mut self, _line: ControlLine) {}

    fn set_level(&mut self, line: ControlLine, level: Level) {
        let mut log = self.0.borrow_mut();
        match line {
            ControlLine::ChipSelect => {
                log.line_change();
                log.cs = Some(level);
                log.wire.push(Wire::Cs(level));
            }
            ControlLine::DataCommand => {
                log.line_change();
                log.dc = Some(level);
                log.wire.push(Wire::Dc(level));
            }
            _ => {}
        }
    }

    fn level(&self, line: ControlLine) -> Option<Level> {
        let log = self.0.borrow();
        match line {
            ControlLine::ChipSelect => log.cs,
            ControlLine::DataCommand => log.dc,
            _ => None,
        }
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn setup() -> (TftSpi<Bus, Lines, NoDelay>, Shared) {
    let log: Shared = Rc::default();
    let mut tft = TftSpi::new(
        Bus(log.clone()),
        Lines(log.clone()),
        NoDelay,
        LinePresence::all(),
    );
    tft.init();
    log.borrow_mut().wire.clear();
    (tft, log)
}

/// Register id writes: words sent between a DC low and the following DC high
fn register_writes(wire: &[Wire]) -> Vec<u16> {
    wire.windows(3)
        .filter_map(|w| match w {
            [Wire::Dc(Level::Low), Wire::Word(reg), Wire::Dc(Level::High)] => Some(*reg),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Command { reg: u16, data: Vec<u16> },
    Sequence(Vec<u16>),
    Fill(u16, usize),
    ReadId(u16),
    Abort,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u16>(), prop::collection::vec(any::<u16>(), 0..4))
            .prop_map(|(reg, data)| Op::Command { reg, data }),
        prop::collection::vec(any::<u16>(), 0..32).prop_map(Op::Sequence),
        (any::<u16>(), 0usize..100_000).prop_map(|(w, n)| Op::Fill(w, n)),
        any::<u16>().prop_map(Op::ReadId),
        Just(Op::Abort),
    ]
}

proptest! {
    #[test]
    fn read_id_is_shifted_big_endian(bytes in any::<[u8; 4]>(), reg in any::<u16>()) {
        let (mut tft, log) = setup();
        log.borrow_mut().replies.extend(bytes);

        let id = tft.read_id(reg).unwrap();

        prop_assert_eq!(id, u32::from_be_bytes(bytes) >> 7);
        let log = log.borrow();
        prop_assert_eq!(register_writes(&log.wire), vec![reg]);
        prop_assert_eq!(log.wire.iter().filter(|w| **w == Wire::Read).count(), 4);
        prop_assert_eq!(log.cs, Some(Level::High));
    }

    #[test]
    fn get_id_queries_fallback_only_without_answer(
        primary in any::<[u8; 4]>(),
        secondary in any::<[u8; 4]>(),
    ) {
        let (mut tft, log) = setup();
        log.borrow_mut().replies.extend(primary);
        log.borrow_mut().replies.extend(secondary);

        let id = tft.get_id().unwrap();

        let first = u32::from_be_bytes(primary) >> 7;
        let low = first & 0xFFFF;
        let regs = register_writes(&log.borrow().wire);
        if low == 0 || low == 0xFFFF {
            prop_assert_eq!(regs, vec![LCD_READ_ID, LCD_READ_ID4]);
            prop_assert_eq!(id, u32::from_be_bytes(secondary) >> 7);
        } else {
            prop_assert_eq!(regs, vec![LCD_READ_ID]);
            prop_assert_eq!(id, first);
        }
    }

    #[test]
    fn fill_reuses_one_word(color in any::<u16>(), count in 0usize..1_000_000) {
        let (mut tft, log) = setup();

        tft.write_multiple(color, count).unwrap();

        let log = log.borrow();
        let blocks: Vec<_> = log
            .wire
            .iter()
            .filter(|w| matches!(w, Wire::Block(_) | Wire::Fill(..)))
            .collect();
        let expected = Wire::Fill(color, count);
        prop_assert_eq!(blocks, vec![&expected]);
    }

    #[test]
    fn sequence_streams_in_order(words in prop::collection::vec(any::<u16>(), 0..256)) {
        let (mut tft, log) = setup();

        tft.write_sequence(&words).unwrap();

        let log = log.borrow();
        prop_assert_eq!(
            log.wire.as_slice(),
            &[
                Wire::Cs(Level::Low),
                Wire::Dc(Level::High),
                Wire::Block(words.clone()),
                Wire::Cs(Level::High),
            ]
        );
    }

    #[test]
    fn chip_select_brackets_every_transfer(ops in prop::collection::vec(op_strategy(), 0..16)) {
        let (mut tft, log) = setup();

        for op in ops {
            match op {
                Op::Command { reg, data } => {
                    tft.data_transfer_begin(WordSize::Bits16);
                    tft.write_reg(reg).unwrap();
                    prop_assert_eq!(log.borrow().dc, Some(Level::High));
                    for word in data {
                        tft.write_data(word).unwrap();
                    }
                    tft.data_transfer_end();
                }
                Op::Sequence(words) => tft.write_sequence(&words).unwrap(),
                Op::Fill(word, count) => tft.write_multiple(word, count).unwrap(),
                Op::ReadId(reg) => {
                    tft.read_id(reg).unwrap();
                }
                Op::Abort => {
                    tft.data_transfer_begin(WordSize::Bits16);
                    tft.abort();
                }
            }
            prop_assert!(!tft.in_transaction());
            prop_assert_eq!(log.borrow().cs, Some(Level::High));
            prop_assert!(!tft.is_busy());
        }

        let log = log.borrow();
        prop_assert_eq!(log.stray, 0);
        prop_assert_eq!(log.blocks_in_command_mode, 0);
        prop_assert_eq!(log.early_line_changes, 0);
    }
}
