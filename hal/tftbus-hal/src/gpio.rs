//! Discrete control line abstractions
//!
//! The display bus uses up to four output lines besides the SPI signals:
//! chip-select, data/command-select, reset and backlight. The first two are
//! always wired; reset and backlight are optional on many boards.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Switch the pin into push-pull output mode
    ///
    /// Pins that are already typed as outputs have nothing to do here.
    fn set_as_output(&mut self) {}

    /// Drive the pin to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Logic level of an output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Named control lines of an SPI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlLine {
    /// Chip-select, active low
    ChipSelect,
    /// Data/command-select: low = command, high = data
    DataCommand,
    /// Controller hardware reset, active low
    Reset,
    /// Backlight enable
    Backlight,
}

/// Named-line pin control
///
/// Gives the driver one place to address every control line by name instead
/// of carrying four pin types around.
pub trait ControlLines {
    /// Configure a line as an output. No-op for lines that are not wired.
    fn configure_output(&mut self, line: ControlLine);

    /// Drive a line. No-op for lines that are not wired.
    fn set_level(&mut self, line: ControlLine, level: Level);

    /// Current driven level, or `None` if the line is not wired
    fn level(&self, line: ControlLine) -> Option<Level>;
}

/// Control lines backed by individual output pins
///
/// Chip-select and data/command are mandatory; reset and backlight are
/// optional and silently ignored when absent.
pub struct LineBank<P> {
    cs: P,
    dc: P,
    reset: Option<P>,
    backlight: Option<P>,
}

impl<P: OutputPin> LineBank<P> {
    /// Create a line bank from the mandatory pins
    pub fn new(cs: P, dc: P) -> Self {
        Self {
            cs,
            dc,
            reset: None,
            backlight: None,
        }
    }

    /// Attach a reset pin
    pub fn with_reset(mut self, reset: P) -> Self {
        self.reset = Some(reset);
        self
    }

    /// Attach a backlight pin
    pub fn with_backlight(mut self, backlight: P) -> Self {
        self.backlight = Some(backlight);
        self
    }

    /// Give the pins back as (cs, dc, reset, backlight)
    pub fn release(self) -> (P, P, Option<P>, Option<P>) {
        (self.cs, self.dc, self.reset, self.backlight)
    }

    fn pin_mut(&mut self, line: ControlLine) -> Option<&mut P> {
        match line {
            ControlLine::ChipSelect => Some(&mut self.cs),
            ControlLine::DataCommand => Some(&mut self.dc),
            ControlLine::Reset => self.reset.as_mut(),
            ControlLine::Backlight => self.backlight.as_mut(),
        }
    }

    fn pin(&self, line: ControlLine) -> Option<&P> {
        match line {
            ControlLine::ChipSelect => Some(&self.cs),
            ControlLine::DataCommand => Some(&self.dc),
            ControlLine::Reset => self.reset.as_ref(),
            ControlLine::Backlight => self.backlight.as_ref(),
        }
    }
}

impl<P: OutputPin> ControlLines for LineBank<P> {
    fn configure_output(&mut self, line: ControlLine) {
        if let Some(pin) = self.pin_mut(line) {
            pin.set_as_output();
        }
    }

    fn set_level(&mut self, line: ControlLine, level: Level) {
        if let Some(pin) = self.pin_mut(line) {
            OutputPin::set_level(pin, level);
        }
    }

    fn level(&self, line: ControlLine) -> Option<Level> {
        self.pin(line).map(|pin| Level::from(pin.is_set_high()))
    }
}
