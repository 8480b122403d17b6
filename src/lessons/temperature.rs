//! Celsius to Fahrenheit conversion with a descriptive band.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Freezing,
    Cold,
    Pleasant,
    Hot,
    VeryHot,
}

impl TemperatureBand {
    pub fn for_celsius(celsius: f64) -> Self {
        if celsius <= 0.0 {
            TemperatureBand::Freezing
        } else if celsius <= 15.0 {
            TemperatureBand::Cold
        } else if celsius <= 25.0 {
            TemperatureBand::Pleasant
        } else if celsius <= 35.0 {
            TemperatureBand::Hot
        } else {
            TemperatureBand::VeryHot
        }
    }

    /// Emoji and label appended to the conversion line
    pub fn annotation(self) -> &'static str {
        match self {
            TemperatureBand::Freezing => "🥶 Freezing!",
            TemperatureBand::Cold => "🧥 Cold!",
            TemperatureBand::Pleasant => "😊 Pleasant!",
            TemperatureBand::Hot => "☀️ Hot!",
            TemperatureBand::VeryHot => "🔥 Very Hot!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub band: TemperatureBand,
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn convert(celsius: f64) -> Conversion {
    let fahrenheit = celsius_to_fahrenheit(celsius);
    tracing::debug!(celsius, fahrenheit, "temperature converted");
    Conversion {
        celsius,
        fahrenheit,
        band: TemperatureBand::for_celsius(celsius),
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°C = {:.1}°F {}",
            self.celsius,
            self.fahrenheit,
            self.band.annotation()
        )
    }
}
