//! Color math for cookbook covers.
//!
//! A cookbook's `color` column holds either a preset key (`"brown"`,
//! `"teal"`, ...) or a strict 6-digit hex string chosen with the custom
//! picker. Both resolve to a [`BookStyle`] (spine color, cover gradient and
//! ink color) through [`book_style_from_color`]. Invalid values fall
//! back to the brown preset rather than failing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Strict 6-digit hex color, e.g. `#a07a50`.
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color pattern"));

/// A color in HSL space: hue 0..360, saturation and lightness 0..100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    pub h: i32,
    pub s: i32,
    pub l: i32,
}

/// Resolved visual style for a rendered book cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookStyle {
    /// Spine color (hex).
    pub spine: String,
    /// CSS gradient for the cover face.
    pub cover: String,
    /// Label color legible against the cover.
    pub ink: String,
}

/// A named cover preset.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preset {
    pub key: &'static str,
    pub label: &'static str,
    pub spine: &'static str,
    pub cover: &'static str,
    pub ink: &'static str,
}

/// The nine cover presets offered by the account page.
pub const PRESETS: [Preset; 9] = [
    Preset { key: "brown", label: "Café", spine: "#8B6F47", cover: "linear-gradient(180deg,#c2956a 0%,#a07a50 100%)", ink: "#fff8f0" },
    Preset { key: "red", label: "Rojo", spine: "#8B4444", cover: "linear-gradient(180deg,#b85c5c 0%,#8B4444 100%)", ink: "#fff0f0" },
    Preset { key: "blue", label: "Azul", spine: "#446688", cover: "linear-gradient(180deg,#5c8bb8 0%,#446688 100%)", ink: "#f0f6ff" },
    Preset { key: "green", label: "Verde", spine: "#3d7a56", cover: "linear-gradient(180deg,#5ca87a 0%,#3d7a56 100%)", ink: "#f0fff6" },
    Preset { key: "purple", label: "Morado", spine: "#6d5090", cover: "linear-gradient(180deg,#9678b8 0%,#6d5090 100%)", ink: "#f6f0ff" },
    Preset { key: "gold", label: "Dorado", spine: "#9a7d3a", cover: "linear-gradient(180deg,#c4a35a 0%,#9a7d3a 100%)", ink: "#fff8e8" },
    Preset { key: "teal", label: "Turquesa", spine: "#4a7878", cover: "linear-gradient(180deg,#6b9e9e 0%,#4a7878 100%)", ink: "#f0ffff" },
    Preset { key: "pink", label: "Rosa", spine: "#99526b", cover: "linear-gradient(180deg,#c47a96 0%,#99526b 100%)", ink: "#fff0f6" },
    Preset { key: "orange", label: "Naranja", spine: "#b06b2a", cover: "linear-gradient(180deg,#d49350 0%,#b06b2a 100%)", ink: "#fff5e8" },
];

/// Parse a `#rrggbb` string into RGB channels.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Format RGB channels as a lowercase `#rrggbb` string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Convert a hex color to rounded-integer HSL.
pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let mut h = 0.0;
    let mut s = 0.0;
    if max > min {
        let d = max - min;
        s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
    }

    Some(Hsl {
        h: (h * 360.0).round() as i32,
        s: (s * 100.0).round() as i32,
        l: (l * 100.0).round() as i32,
    })
}

/// Convert integer HSL back to a hex color.
pub fn hsl_to_hex(h: i32, s: i32, l: i32) -> String {
    let h = f64::from(h.rem_euclid(360));
    let s = f64::from(s.clamp(0, 100)) / 100.0;
    let l = f64::from(l.clamp(0, 100)) / 100.0;

    let a = s * l.min(1.0 - l);
    let channel = |n: f64| -> u8 {
        let k = (n + h / 30.0) % 12.0;
        let c = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * c).round() as u8
    };

    let (r, g, b) = (channel(0.0), channel(8.0), channel(4.0));
    rgb_to_hex(r, g, b)
}

/// Lower a hex color's lightness by `amount` percentage points (floor 0).
///
/// Unparsable input is returned unchanged; callers validate with
/// [`is_valid_color`] first, and cosmetic helpers never fail.
pub fn darken(hex: &str, amount: i32) -> String {
    match hex_to_hsl(hex) {
        Some(hsl) => hsl_to_hex(hsl.h, hsl.s, (hsl.l - amount).max(0)),
        None => hex.to_string(),
    }
}

/// Pick a label color legible against the given base.
///
/// Light bases (lightness > 55) get a darkened, slightly saturated ink;
/// dark bases get a lightened, desaturated one.
pub fn ink_color(hex: &str) -> String {
    match hex_to_hsl(hex) {
        Some(hsl) if hsl.l > 55 => hsl_to_hex(hsl.h, (hsl.s + 10).min(100), (hsl.l - 60).max(0)),
        Some(hsl) => hsl_to_hex(hsl.h, hsl.s.min(30), (hsl.l + 50).min(97)),
        None => hex.to_string(),
    }
}

/// Whether a stored color value is accepted: a preset key or strict hex.
pub fn is_valid_color(value: &str) -> bool {
    PRESETS.iter().any(|p| p.key == value) || HEX_COLOR.is_match(value)
}

/// Look up a preset by key, defaulting to brown.
pub fn preset_style(key: &str) -> BookStyle {
    let preset = PRESETS
        .iter()
        .find(|p| p.key == key)
        .unwrap_or(&PRESETS[0]);
    BookStyle {
        spine: preset.spine.to_string(),
        cover: preset.cover.to_string(),
        ink: preset.ink.to_string(),
    }
}

/// Build a cover style from a custom hex color.
fn build_custom_style(hex: &str) -> BookStyle {
    BookStyle {
        spine: darken(hex, 18),
        cover: format!("linear-gradient(180deg,{hex} 0%,{} 100%)", darken(hex, 12)),
        ink: ink_color(hex),
    }
}

/// Resolve a stored cookbook color into a [`BookStyle`].
///
/// Preset keys resolve to their preset, strict hex values to a derived
/// custom style, and anything else (including `None`) to the brown preset.
pub fn book_style_from_color(color: Option<&str>) -> BookStyle {
    match color {
        Some(value) if PRESETS.iter().any(|p| p.key == value) => preset_style(value),
        Some(value) if HEX_COLOR.is_match(value) => build_custom_style(value),
        _ => preset_style("brown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_conversions() {
        assert_eq!(hex_to_hsl("#ff0000"), Some(Hsl { h: 0, s: 100, l: 50 }));
        assert_eq!(hex_to_hsl("#336699"), Some(Hsl { h: 210, s: 50, l: 40 }));
        assert_eq!(hex_to_hsl("#808080"), Some(Hsl { h: 0, s: 0, l: 50 }));
        assert_eq!(hsl_to_hex(0, 100, 50), "#ff0000");
        assert_eq!(hsl_to_hex(210, 50, 40), "#336699");
    }

    #[test]
    fn hex_round_trip_on_exact_colors() {
        for hex in ["#ff0000", "#00ff00", "#0000ff", "#336699", "#808080", "#ffffff", "#000000"] {
            let hsl = hex_to_hsl(hex).unwrap();
            assert_eq!(hsl_to_hex(hsl.h, hsl.s, hsl.l), hex, "round trip for {hex}");
        }
    }

    #[test]
    fn hsl_round_trip_within_tolerance() {
        for h in (0..360).step_by(15) {
            for s in [0, 25, 50, 75, 100] {
                for l in [10, 30, 50, 70, 90] {
                    let hex = hsl_to_hex(h, s, l);
                    let back = hex_to_hsl(&hex).unwrap();
                    // Gray and extreme-lightness colors lose hue information;
                    // only compare hue where it survives.
                    if s > 0 && l < 100 && l > 0 && back.s > 0 {
                        let dh = (back.h - h).rem_euclid(360).min((h - back.h).rem_euclid(360));
                        assert!(dh <= 1, "hue drift for h={h} s={s} l={l}: got {}", back.h);
                    }
                    assert!((back.s - s).abs() <= 1, "saturation drift for h={h} s={s} l={l}");
                    assert!((back.l - l).abs() <= 1, "lightness drift for h={h} s={s} l={l}");
                }
            }
        }
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert_eq!(hex_to_rgb("#12345"), None);
        assert_eq!(hex_to_rgb("123456"), None);
        assert_eq!(hex_to_rgb("#12345g"), None);
        assert!(hex_to_hsl("#xyzxyz").is_none());
    }

    #[test]
    fn ink_contrasts_with_base_lightness() {
        // Light base -> dark ink.
        let ink = ink_color("#eeeeee");
        assert!(hex_to_hsl(&ink).unwrap().l < 50);
        // Dark base -> light ink.
        let ink = ink_color("#222244");
        assert!(hex_to_hsl(&ink).unwrap().l > 50);
    }

    #[test]
    fn preset_keys_resolve() {
        let teal = book_style_from_color(Some("teal"));
        assert_eq!(teal.spine, "#4a7878");
        assert_eq!(teal.ink, "#f0ffff");
    }

    #[test]
    fn custom_hex_builds_gradient() {
        let style = book_style_from_color(Some("#a07a50"));
        assert!(style.cover.starts_with("linear-gradient(180deg,#a07a50 0%,"));
        assert_ne!(style.spine, "#a07a50");
    }

    #[test]
    fn invalid_color_falls_back_to_brown() {
        let brown = preset_style("brown");
        assert_eq!(book_style_from_color(None), brown);
        assert_eq!(book_style_from_color(Some("fuchsia")), brown);
        assert_eq!(book_style_from_color(Some("#12345")), brown);
        assert_eq!(book_style_from_color(Some("#12345g")), brown);
    }

    #[test]
    fn is_valid_color_accepts_presets_and_hex() {
        assert!(is_valid_color("brown"));
        assert!(is_valid_color("#A07a50"));
        assert!(!is_valid_color("mauve"));
        assert!(!is_valid_color("#abc"));
    }
}
