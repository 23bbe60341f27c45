//! Hex color helpers shared by the builders and both backends.
//!
//! Colors travel through the layout model as `#rrggbb` strings so the same
//! value can be dropped into a PDF fill op or a CSS property unchanged.

/// Parse a hex color (`#rrggbb`, `rrggbb` or `#rgb`) into its channels.
///
/// Invalid input returns black `(0, 0, 0)`.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return (0, 0, 0);
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return (0, 0, 0),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => (r, g, b),
        _ => (0, 0, 0),
    }
}

/// Encode channels as a lowercase `#rrggbb` string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Move each channel toward white by `percent` (0.0–1.0).
///
/// `lighten_color(c, 0.0) == c` and `lighten_color(c, 1.0) == "#ffffff"`.
pub fn lighten_color(hex: &str, percent: f32) -> String {
    let p = percent.clamp(0.0, 1.0);
    let (r, g, b) = hex_to_rgb(hex);
    let lift = |c: u8| (c as f32 + (255.0 - c as f32) * p).round().clamp(0.0, 255.0) as u8;
    rgb_to_hex(lift(r), lift(g), lift(b))
}

/// Scale each channel toward black by `percent` (0.0–1.0).
///
/// `darken_color(c, 0.0) == c` and `darken_color(c, 1.0) == "#000000"`.
pub fn darken_color(hex: &str, percent: f32) -> String {
    let p = percent.clamp(0.0, 1.0);
    let (r, g, b) = hex_to_rgb(hex);
    let drop = |c: u8| (c as f32 * (1.0 - p)).round().clamp(0.0, 255.0) as u8;
    rgb_to_hex(drop(r), drop(g), drop(b))
}

/// Channels as 0.0–1.0 floats, the form PDF color operators take.
pub fn hex_to_unit_rgb(hex: &str) -> (f32, f32, f32) {
    let (r, g, b) = hex_to_rgb(hex);
    (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &["#1e3a8a", "#3b82f6", "#dc2626", "#000000", "#ffffff", "#7c3aed"];

    fn is_valid_hex(s: &str) -> bool {
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ff8000"), (255, 128, 0));
        assert_eq!(hex_to_rgb("00ff00"), (0, 255, 0));
        assert_eq!(hex_to_rgb("#fff"), (255, 255, 255));
    }

    #[test]
    fn test_hex_to_rgb_invalid() {
        assert_eq!(hex_to_rgb("nope"), (0, 0, 0));
        assert_eq!(hex_to_rgb("#zzzzzz"), (0, 0, 0));
        assert_eq!(hex_to_rgb(""), (0, 0, 0));
    }

    #[test]
    fn test_identity_at_zero() {
        for hex in SAMPLES {
            assert_eq!(lighten_color(hex, 0.0), *hex);
            assert_eq!(darken_color(hex, 0.0), *hex);
        }
    }

    #[test]
    fn test_saturates_at_one() {
        for hex in SAMPLES {
            assert_eq!(lighten_color(hex, 1.0), "#ffffff");
            assert_eq!(darken_color(hex, 1.0), "#000000");
        }
    }

    #[test]
    fn test_outputs_are_valid_hex() {
        for hex in SAMPLES {
            for step in 0..=20 {
                let p = step as f32 / 20.0;
                assert!(is_valid_hex(&lighten_color(hex, p)));
                assert!(is_valid_hex(&darken_color(hex, p)));
            }
        }
    }

    #[test]
    fn test_lighten_midpoint() {
        // 0 + 255 * 0.5 = 127.5 → 128
        assert_eq!(lighten_color("#000000", 0.5), "#808080");
        // 200 * 0.5 = 100
        assert_eq!(darken_color("#c8c8c8", 0.5), "#646464");
    }

    #[test]
    fn test_percent_is_clamped() {
        assert_eq!(lighten_color("#123456", 3.0), "#ffffff");
        assert_eq!(darken_color("#123456", -1.0), "#123456");
    }
}
