//! TFT display bus drivers

mod spi;

pub use spi::TftSpi;
