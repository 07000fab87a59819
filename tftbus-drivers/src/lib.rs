//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tftbus-core:
//!
//! - SPI TFT bus transaction driver ([`tft::TftSpi`])

#![no_std]
#![deny(unsafe_code)]

pub mod tft;
