//! Symbol tables for unit and weather modules
//!
//! Unit and weather pipes show a fixed set of symbols, selected by sending
//! the symbol's index as the pipe's digit.

use std::fmt;
use std::str::FromStr;

use crate::error::{PipeError, Result};

/// Uppercase the first character and leave the rest untouched
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Units
// =============================================================================

/// SI unit symbols on a unit pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Unit {
    Volts = 0,
    Amps = 1,
    Watts = 2,
    Grams = 3,
    Hertz = 4,
    Celsius = 5,
    Newtons = 6,
    Meters = 7,
    Seconds = 8,
    Ohm = 9,
}

const UNIT_NAMES: &[(&str, Unit)] = &[
    ("Volts", Unit::Volts),
    ("Amps", Unit::Amps),
    ("Watts", Unit::Watts),
    ("Grams", Unit::Grams),
    ("Hertz", Unit::Hertz),
    ("Celsius", Unit::Celsius),
    ("Newtons", Unit::Newtons),
    ("Meters", Unit::Meters),
    ("Seconds", Unit::Seconds),
    ("Ohm", Unit::Ohm),
];

impl Unit {
    /// Code sent to the pipe
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a unit by name (first letter case-insensitive)
    pub fn lookup(name: &str) -> Result<Self> {
        let key = capitalize_first(name.trim());
        UNIT_NAMES
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, unit)| *unit)
            .ok_or_else(|| PipeError::UnknownUnit(name.to_string()))
    }
}

impl FromStr for Unit {
    type Err = PipeError;

    fn from_str(s: &str) -> Result<Self> {
        Unit::lookup(s)
    }
}

// =============================================================================
// Unit prefixes
// =============================================================================

/// Magnitude and sign prefixes on a unit pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UnitPrefix {
    Pico = 0,
    Nano = 1,
    Micro = 2,
    Milli = 3,
    Kilo = 4,
    Mega = 5,
    Giga = 6,
    Tera = 7,
    Neg = 8,
    Pos = 9,
}

// "Kila" is the spelling the firmware docs use
const PREFIX_NAMES: &[(&str, UnitPrefix)] = &[
    ("Pico", UnitPrefix::Pico),
    ("Nano", UnitPrefix::Nano),
    ("Micro", UnitPrefix::Micro),
    ("Milli", UnitPrefix::Milli),
    ("Kila", UnitPrefix::Kilo),
    ("Kilo", UnitPrefix::Kilo),
    ("Mega", UnitPrefix::Mega),
    ("Giga", UnitPrefix::Giga),
    ("Tera", UnitPrefix::Tera),
    ("Neg", UnitPrefix::Neg),
    ("Pos", UnitPrefix::Pos),
];

impl UnitPrefix {
    /// Code sent to the pipe
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a prefix by name (first letter case-insensitive)
    pub fn lookup(name: &str) -> Result<Self> {
        let key = capitalize_first(name.trim());
        PREFIX_NAMES
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, prefix)| *prefix)
            .ok_or_else(|| PipeError::UnknownPrefix(name.to_string()))
    }
}

impl FromStr for UnitPrefix {
    type Err = PipeError;

    fn from_str(s: &str) -> Result<Self> {
        UnitPrefix::lookup(s)
    }
}

// =============================================================================
// Weather
// =============================================================================

/// Symbols on a weather pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WeatherSymbol {
    Sun = 0,
    Rain = 1,
    Cloud = 2,
    SunCloud = 3,
    Snow = 4,
    Wind = 5,
    Storm = 6,
    Fog = 7,
    Percent = 8,
    Pascal = 9,
}

/// Descriptions and OpenWeatherMap icon codes for each symbol
const WEATHER_ALIASES: &[(&str, WeatherSymbol)] = &[
    ("Sun", WeatherSymbol::Sun),
    ("Sunny", WeatherSymbol::Sun),
    ("01d", WeatherSymbol::Sun),
    ("01n", WeatherSymbol::Sun),
    ("Rain", WeatherSymbol::Rain),
    ("Rainy", WeatherSymbol::Rain),
    ("09d", WeatherSymbol::Rain),
    ("09n", WeatherSymbol::Rain),
    ("10d", WeatherSymbol::Rain),
    ("10n", WeatherSymbol::Rain),
    ("Cloud", WeatherSymbol::Cloud),
    ("Clouds", WeatherSymbol::Cloud),
    ("03d", WeatherSymbol::Cloud),
    ("03n", WeatherSymbol::Cloud),
    ("SunCloud", WeatherSymbol::SunCloud),
    ("Broken clouds", WeatherSymbol::SunCloud),
    ("02d", WeatherSymbol::SunCloud),
    ("02n", WeatherSymbol::SunCloud),
    ("04d", WeatherSymbol::SunCloud),
    ("04n", WeatherSymbol::SunCloud),
    ("Snow", WeatherSymbol::Snow),
    ("Snowy", WeatherSymbol::Snow),
    ("13d", WeatherSymbol::Snow),
    ("13n", WeatherSymbol::Snow),
    ("Wind", WeatherSymbol::Wind),
    ("Windy", WeatherSymbol::Wind),
    ("Storm", WeatherSymbol::Storm),
    ("Stormy", WeatherSymbol::Storm),
    ("11d", WeatherSymbol::Storm),
    ("11n", WeatherSymbol::Storm),
    ("Fog", WeatherSymbol::Fog),
    ("Haze", WeatherSymbol::Fog),
    ("Mist", WeatherSymbol::Fog),
    ("Foggy", WeatherSymbol::Fog),
    ("50d", WeatherSymbol::Fog),
    ("50n", WeatherSymbol::Fog),
    ("Percent", WeatherSymbol::Percent),
    ("Pascal", WeatherSymbol::Pascal),
];

impl WeatherSymbol {
    /// Digit sent to the weather pipe
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Resolve a description or icon code
    ///
    /// Surrounding whitespace is ignored and the first letter is
    /// capitalized, so `"sunny"` and `"Sunny"` match; the rest of the
    /// string must match exactly.
    pub fn lookup(symbol: &str) -> Result<Self> {
        let key = capitalize_first(symbol.trim());
        WEATHER_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, sym)| *sym)
            .ok_or_else(|| PipeError::UnknownWeatherSymbol(symbol.to_string()))
    }

    /// All accepted aliases
    pub fn aliases() -> impl Iterator<Item = &'static str> {
        WEATHER_ALIASES.iter().map(|(alias, _)| *alias)
    }
}

impl FromStr for WeatherSymbol {
    type Err = PipeError;

    fn from_str(s: &str) -> Result<Self> {
        WeatherSymbol::lookup(s)
    }
}

impl fmt::Display for WeatherSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
