//! Board-agnostic core of the SPI display bus driver
//!
//! This crate contains everything about the display bus that does not
//! depend on a concrete transport:
//!
//! - Hardware configuration types (pin assignment, optional lines)
//! - Register identifiers and timing constants
//! - Block transfer descriptors
//! - The [`traits::TftInterface`] call surface used by graphics layers

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod regs;
pub mod traits;
pub mod transfer;

pub use transfer::{BlockTransfer, MemoryIncrement};
