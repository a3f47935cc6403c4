//! Color conversion between hex, RGB and CMYK, plus built-in palettes.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color length {len} in {input:?} (expected 3 or 6 digits)")]
    InvalidLength { input: String, len: usize },
    #[error("Invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// Result type for color conversions.
pub type ColorResult<T> = Result<T, ColorError>;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

/// A print color; each channel is a percentage in 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    pub const fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }
}

impl fmt::Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmyk({}%, {}%, {}%, {}%)", self.c, self.m, self.y, self.k)
    }
}

/// Parse `#rgb`, `#rrggbb`, `rgb` or `rrggbb`.
///
/// The short form duplicates each digit (`f` becomes `ff`).
pub fn hex_to_rgb(hex: &str) -> ColorResult<Rgb> {
    let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit(hex.to_string()));
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidDigit(hex.to_string()));

    match digits.len() {
        3 => {
            let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
            Ok(Rgb::new(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Ok(Rgb::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        len => Err(ColorError::InvalidLength {
            input: hex.to_string(),
            len,
        }),
    }
}

/// Format as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Convert RGB to CMYK percentages, rounded to whole numbers.
pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        // Pure black; chromatic channels are undefined.
        return Cmyk::new(0.0, 0.0, 0.0, 100.0);
    }

    let ink = |channel: f64| ((1.0 - channel - k) / (1.0 - k) * 100.0).round().clamp(0.0, 100.0);
    Cmyk::new(ink(r), ink(g), ink(b), (k * 100.0).round())
}

/// Convert CMYK percentages back to RGB.
///
/// Channels outside 0-100 are clamped.
pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let k = cmyk.k.clamp(0.0, 100.0) / 100.0;
    let channel = |ink: f64| {
        let ink = ink.clamp(0.0, 100.0) / 100.0;
        (255.0 * (1.0 - ink) * (1.0 - k)).round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(cmyk.c), channel(cmyk.m), channel(cmyk.y))
}

/// A named set of colors for figures.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub name: &'static str,
    pub description: &'static str,
    /// Hex colors, `#rrggbb`.
    pub colors: &'static [&'static str],
}

impl ColorPalette {
    /// All built-in palettes.
    pub fn all() -> &'static [ColorPalette] {
        SCIENTIFIC_PALETTES
    }

    /// Look up a palette by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static ColorPalette> {
        SCIENTIFIC_PALETTES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Parsed colors of this palette.
    pub fn rgb_colors(&self) -> ColorResult<Vec<Rgb>> {
        self.colors.iter().map(|c| hex_to_rgb(c)).collect()
    }
}

pub const SCIENTIFIC_PALETTES: &[ColorPalette] = &[
    ColorPalette {
        name: "Okabe-Ito",
        description: "Colorblind-safe qualitative palette",
        colors: &[
            "#e69f00", "#56b4e9", "#009e73", "#f0e442", "#0072b2", "#d55e00", "#cc79a7", "#000000",
        ],
    },
    ColorPalette {
        name: "Viridis",
        description: "Perceptually uniform sequential palette",
        colors: &["#440154", "#3b528b", "#21918c", "#5ec962", "#fde725"],
    },
    ColorPalette {
        name: "Tableau",
        description: "General purpose categorical palette",
        colors: &[
            "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
            "#9c755f", "#bab0ac",
        ],
    },
    ColorPalette {
        name: "Grayscale",
        description: "Neutral tones for print",
        colors: &["#000000", "#404040", "#808080", "#bfbfbf", "#ffffff"],
    },
];
