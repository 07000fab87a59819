//! tftbus Hardware Abstraction Layer
//!
//! This crate defines the two capabilities the display bus driver consumes:
//! a serial bus transport that shifts words to the controller, and discrete
//! output lines for chip-select, data/command-select, reset and backlight.
//! Chip-specific bindings implement these traits directly, or go through the
//! [`ehal`] adapters for anything that already speaks `embedded-hal` 1.0.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Graphics / UI layer                    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tftbus-drivers (TftSpi)                │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tftbus-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  board code / │
//! │   adapters    │       │  test doubles │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::ControlLines`] - Discrete control lines
//! - [`spi::SpiBus`] - Word and block transfers

#![no_std]
#![deny(unsafe_code)]

pub mod ehal;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{ControlLine, ControlLines, Level, LineBank, OutputPin};
pub use spi::{SpiBus, WordSize};
