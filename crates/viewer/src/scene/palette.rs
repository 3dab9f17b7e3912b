//! Color token resolution.
//!
//! Accepts `#rgb`, `#rrggbb`, `0xrrggbb`, a decimal integer up to `0xFFFFFF`, or a
//! CSS basic color name.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Linear RGB in 0.0..=1.0
pub type Rgb = [f32; 3];

/// Resolve a color token, `None` when the token is not recognized.
pub fn resolve_color(token: &str) -> Option<Rgb> {
    let token = token.trim();
    if let Some(hex) = token.strip_prefix('#') {
        return from_hex(hex);
    }
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return u32::from_str_radix(hex, 16).ok().and_then(from_packed);
    }
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return token.parse::<u32>().ok().and_then(from_packed);
    }
    from_preset(&token.to_ascii_lowercase())
}

/// `0xRRGGBB` to RGB; values above 24 bits are rejected
pub fn from_packed(rgb: u32) -> Option<Rgb> {
    if rgb > 0xFF_FFFF {
        return None;
    }
    Some(from_bytes(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

fn from_bytes(r: u8, g: u8, b: u8) -> Rgb {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

fn from_hex(hex: &str) -> Option<Rgb> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(from_bytes(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => u32::from_str_radix(hex, 16).ok().and_then(from_packed),
        _ => None,
    }
}

fn presets() -> &'static HashMap<&'static str, u32> {
    static PRESETS: OnceLock<HashMap<&'static str, u32>> = OnceLock::new();
    PRESETS.get_or_init(|| {
        [
            ("black", 0x000000),
            ("white", 0xffffff),
            ("gray", 0x808080),
            ("grey", 0x808080),
            ("silver", 0xc0c0c0),
            ("lightgray", 0xd3d3d3),
            ("lightgrey", 0xd3d3d3),
            ("darkgray", 0xa9a9a9),
            ("darkgrey", 0xa9a9a9),
            ("red", 0xff0000),
            ("maroon", 0x800000),
            ("green", 0x008000),
            ("lime", 0x00ff00),
            ("blue", 0x0000ff),
            ("navy", 0x000080),
            ("yellow", 0xffff00),
            ("olive", 0x808000),
            ("cyan", 0x00ffff),
            ("aqua", 0x00ffff),
            ("teal", 0x008080),
            ("magenta", 0xff00ff),
            ("fuchsia", 0xff00ff),
            ("purple", 0x800080),
            ("orange", 0xffa500),
            ("pink", 0xffc0cb),
            ("brown", 0xa52a2a),
            ("gold", 0xffd700),
            ("skyblue", 0x87ceeb),
            ("steelblue", 0x4682b4),
            ("tomato", 0xff6347),
            ("salmon", 0xfa8072),
            ("coral", 0xff7f50),
            ("violet", 0xee82ee),
            ("indigo", 0x4b0082),
            ("beige", 0xf5f5dc),
            ("khaki", 0xf0e68c),
        ]
        .into_iter()
        .collect()
    })
}

fn from_preset(name: &str) -> Option<Rgb> {
    presets().get(name).copied().and_then(from_packed)
}
