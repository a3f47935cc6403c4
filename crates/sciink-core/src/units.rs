//! Physical unit conversion for print output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default print resolution in dots per inch.
pub const DEFAULT_DPI: f64 = 300.0;

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Unit conversion errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Invalid DPI {0} (must be a positive finite number)")]
    InvalidDpi(f64),
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}

/// Length units understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "px")]
    Pixels,
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "cm")]
    Centimeters,
}

impl Unit {
    /// Short suffix used in UI fields.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Pixels => "px",
            Unit::Inches => "in",
            Unit::Centimeters => "cm",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "px" | "pixel" | "pixels" => Ok(Unit::Pixels),
            "in" | "inch" | "inches" => Ok(Unit::Inches),
            "cm" | "centimeter" | "centimeters" => Ok(Unit::Centimeters),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

pub fn inches_to_pixels(inches: f64, dpi: f64) -> f64 {
    inches * dpi
}

pub fn pixels_to_inches(pixels: f64, dpi: f64) -> f64 {
    pixels / dpi
}

pub fn cm_to_pixels(cm: f64, dpi: f64) -> f64 {
    (cm / CM_PER_INCH) * dpi
}

pub fn pixels_to_cm(pixels: f64, dpi: f64) -> f64 {
    (pixels / dpi) * CM_PER_INCH
}

pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

/// Convert `value` between units.
///
/// `dpi` defaults to [`DEFAULT_DPI`]; it is only consulted when pixels are
/// involved.
pub fn convert_units(value: f64, from: Unit, to: Unit, dpi: Option<f64>) -> Result<f64, UnitError> {
    if from == to {
        return Ok(value);
    }

    let pixel_dpi = || {
        let dpi = dpi.unwrap_or(DEFAULT_DPI);
        if dpi.is_finite() && dpi > 0.0 {
            Ok(dpi)
        } else {
            Err(UnitError::InvalidDpi(dpi))
        }
    };

    Ok(match (from, to) {
        (Unit::Inches, Unit::Pixels) => inches_to_pixels(value, pixel_dpi()?),
        (Unit::Pixels, Unit::Inches) => pixels_to_inches(value, pixel_dpi()?),
        (Unit::Centimeters, Unit::Pixels) => cm_to_pixels(value, pixel_dpi()?),
        (Unit::Pixels, Unit::Centimeters) => pixels_to_cm(value, pixel_dpi()?),
        (Unit::Inches, Unit::Centimeters) => inches_to_cm(value),
        (Unit::Centimeters, Unit::Inches) => cm_to_inches(value),
        _ => value,
    })
}
