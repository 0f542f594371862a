//! Colour literals
//!
//! Colours are written as `0xAABBGGRR` or `0xBBGGRR` (alpha implied opaque).
//! Any other shape is not a colour.

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Colour space tag carried by parsed colours.
///
/// Deserializes through [`ColorSpace::from_name`], so `display_p3` and
/// `displayP3` name the same space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ColorSpace {
    #[serde(rename = "deviceRGB")]
    DeviceRgb,
    #[serde(rename = "genericRGB")]
    GenericRgb,
    #[default]
    #[serde(rename = "sRGB")]
    Srgb,
    #[serde(rename = "displayP3")]
    DisplayP3,
    #[serde(rename = "adobeRGB")]
    AdobeRgb,
    #[serde(rename = "extendedSRGB")]
    ExtendedSrgb,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 6] = [
        ColorSpace::DeviceRgb,
        ColorSpace::GenericRgb,
        ColorSpace::Srgb,
        ColorSpace::DisplayP3,
        ColorSpace::AdobeRgb,
        ColorSpace::ExtendedSrgb,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRgb => "deviceRGB",
            ColorSpace::GenericRgb => "genericRGB",
            ColorSpace::Srgb => "sRGB",
            ColorSpace::DisplayP3 => "displayP3",
            ColorSpace::AdobeRgb => "adobeRGB",
            ColorSpace::ExtendedSrgb => "extendedSRGB",
        }
    }

    /// Match a name case-insensitively, ignoring underscores (`display_p3`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.replace('_', "");
        Self::ALL
            .into_iter()
            .find(|space| space.name().eq_ignore_ascii_case(&name))
    }
}

impl TryFrom<String> for ColorSpace {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or_else(|| {
            let known: Vec<_> = Self::ALL.iter().map(ColorSpace::name).collect();
            format!("unknown colour space `{}`, expected one of {}", name, known.join(", "))
        })
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An RGBA colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub space: ColorSpace,
}

fn literal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^0[xX]([0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").expect("colour literal pattern")
    })
}

impl Color {
    /// Parse a hex literal in BGR byte order.
    pub fn parse(literal: &str, space: ColorSpace) -> Option<Self> {
        let literal = literal.trim();
        let digits = literal_pattern().captures(literal)?.get(1)?.as_str();
        let hex = u32::from_str_radix(digits, 16).ok()?;

        let alpha = if digits.len() == 8 { (hex >> 24) as u8 } else { 0xff };
        Some(Self {
            red: (hex & 0xff) as u8,
            green: ((hex >> 8) & 0xff) as u8,
            blue: ((hex >> 16) & 0xff) as u8,
            alpha,
            space,
        })
    }

    /// Channels scaled to `0.0..=1.0`, in RGBA order.
    pub fn components(&self) -> [f64; 4] {
        [self.red, self.green, self.blue, self.alpha].map(|c| f64::from(c) / 255.0)
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == 0xff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_and_six_digit_literals_agree() {
        let long = Color::parse("0xff0000ff", ColorSpace::Srgb).unwrap();
        let short = Color::parse("0x0000ff", ColorSpace::Srgb).unwrap();
        assert_eq!(long, short);
        assert_eq!((long.red, long.green, long.blue, long.alpha), (0xff, 0, 0, 0xff));
    }

    #[test]
    fn test_bgr_byte_order() {
        let color = Color::parse("0x80123456", ColorSpace::Srgb).unwrap();
        assert_eq!(color.red, 0x56);
        assert_eq!(color.green, 0x34);
        assert_eq!(color.blue, 0x12);
        assert_eq!(color.alpha, 0x80);
        assert!(!color.is_opaque());
    }

    #[test]
    fn test_rejects_other_shapes() {
        for literal in ["ff0000", "0xfff", "0x1234567", "0x123456789", "#ff0000", "0xgg0000", ""] {
            assert!(Color::parse(literal, ColorSpace::Srgb).is_none(), "{literal}");
        }
    }

    #[test]
    fn test_uppercase_prefix() {
        assert!(Color::parse("0XFFFFFF", ColorSpace::Srgb).is_some());
    }

    #[test]
    fn test_components() {
        let white = Color::parse("0xffffff", ColorSpace::DisplayP3).unwrap();
        assert_eq!(white.components(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(white.space, ColorSpace::DisplayP3);
    }

    #[test]
    fn test_color_space_names() {
        assert_eq!(ColorSpace::from_name("display_p3"), Some(ColorSpace::DisplayP3));
        assert_eq!(ColorSpace::from_name("SRGB"), Some(ColorSpace::Srgb));
        assert_eq!(ColorSpace::from_name("cmyk"), None);
    }

    #[test]
    fn test_color_space_deserializes_any_spelling() {
        for (name, space) in [
            ("\"display_p3\"", ColorSpace::DisplayP3),
            ("\"displayP3\"", ColorSpace::DisplayP3),
            ("\"SRGB\"", ColorSpace::Srgb),
            ("\"extended_srgb\"", ColorSpace::ExtendedSrgb),
        ] {
            assert_eq!(serde_json::from_str::<ColorSpace>(name).unwrap(), space);
        }
        assert!(serde_json::from_str::<ColorSpace>("\"cmyk\"").is_err());
    }
}
