//! Serde helper storing `Color32` as `#RRGGBB` / `#RRGGBBAA` strings so that
//! calendar and settings files stay hand-editable.

use egui::Color32;
use serde::{self, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_hex(*color))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_hex_color(&s).map_err(serde::de::Error::custom)
}

/// Format a colour as `#RRGGBB`, or `#RRGGBBAA` when it is not opaque.
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(format!("Invalid hex color '{}': non-ASCII characters", s));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
    };
    match s.len() {
        6 => Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Ok(Color32::from_rgba_unmultiplied(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => Err(format!("Invalid hex color '{}': expected 6 or 8 hex digits", s)),
    }
}
