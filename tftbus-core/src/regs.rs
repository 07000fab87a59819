//! Display controller register identifiers and timing

/// Read display identification information (MIPI DCS RDDID)
pub const LCD_READ_ID: u16 = 0x04;

/// Read ID4, vendor extension on ILI93xx-family controllers
pub const LCD_READ_ID4: u16 = 0xD3;

/// Time the controller needs after reset is released, in milliseconds
pub const RESET_SETTLE_MS: u32 = 100;

/// Bits of read framing discarded from an identification response
pub const READ_ID_SHIFT: u32 = 7;
