//! Hardware abstraction traits
//!
//! These traits define the interface between graphics code and the
//! display bus driver.

pub mod display;

pub use display::{is_no_answer, TftInterface};
