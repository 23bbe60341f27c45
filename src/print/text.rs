//! Text measurement and wrapping against the built-in Helvetica metrics.
//!
//! The PDF uses the standard-14 Helvetica faces, so widths come straight
//! from their AFM tables (units of 1/1000 em). Measuring with the same
//! metrics the viewer draws with keeps centering and wrapping exact.

/// Helvetica advance widths for ASCII 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for characters outside the table.
const FALLBACK_WIDTH: u16 = 556;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.2;

const ELLIPSIS: &str = "...";

/// Advance width of `c` in 1/1000 em.
pub fn char_width(c: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    match c {
        ' '..='~' => table[c as usize - 32],
        '\u{00b7}' => 278,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` at `size` points, in inches.
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, bold) as u32).sum();
    units as f32 / 1000.0 * size / 72.0
}

/// Distance between baselines at `size` points, in inches.
pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT / 72.0
}

/// Distance from the top of a line box to its baseline, in inches.
pub fn ascent(size: f32) -> f32 {
    size * 0.93 / 72.0
}

/// Greedy word wrap into lines no wider than `max_width` inches.
///
/// Words wider than a whole line are broken between characters. With
/// `max_lines > 0`, text past the last allowed line is cut and that line
/// ends in `...`.
pub fn wrap_text(text: &str, size: f32, bold: bool, max_width: f32, max_lines: usize) -> Vec<String> {
    let fits = |s: &str| text_width(s, size, bold) <= max_width;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !fits(word) {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, size, bold, max_width);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if fits(&candidate) {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if max_lines > 0 && lines.len() > max_lines {
        let overflow = lines.split_off(max_lines - 1).join(" ");
        lines.push(ellipsize(&overflow, size, bold, max_width));
    }
    lines
}

/// Single line: `text` unchanged if it fits, else cut with `...`.
pub fn truncate_to_width(text: &str, size: f32, bold: bool, max_width: f32) -> String {
    if text_width(text, size, bold) <= max_width {
        text.to_string()
    } else {
        ellipsize(text, size, bold, max_width)
    }
}

/// Longest prefix of `text` that still fits with `...` appended.
fn ellipsize(text: &str, size: f32, bold: bool, max_width: f32) -> String {
    let to_inches = |units: u32| units as f32 / 1000.0 * size / 72.0;
    let mut units: u32 = ELLIPSIS.chars().map(|c| char_width(c, bold) as u32).sum();
    let mut end = 0;
    for (i, c) in text.char_indices() {
        units += char_width(c, bold) as u32;
        if to_inches(units) > max_width {
            break;
        }
        end = i + c.len_utf8();
    }
    format!("{}{}", text[..end].trim_end(), ELLIPSIS)
}

/// Split one word into pieces that each fit (at least one char per piece).
fn break_word(word: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if current.chars().count() > 1 && text_width(&current, size, bold) > max_width {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(char_width(' ', false), 278);
        assert_eq!(char_width('@', false), 1015);
        assert_eq!(char_width('m', true), 889);
        assert_eq!(char_width('~', true), 584);
        assert_eq!(char_width('é', false), FALLBACK_WIDTH);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        // "0" is 556 units: at 72pt that's 0.556in
        assert!((text_width("0", 72.0, false) - 0.556).abs() < 1e-5);
        assert!((text_width("00", 36.0, false) - 0.556).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_fits_in_width() {
        let lines = wrap_text(
            "Tuned for 1440p high-refresh gaming and streaming",
            10.0,
            false,
            1.5,
            0,
        );
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, false) <= 1.5, "{line}");
        }
        assert_eq!(
            lines.join(" "),
            "Tuned for 1440p high-refresh gaming and streaming"
        );
    }

    #[test]
    fn test_wrap_ellipsis_on_last_line() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let lines = wrap_text(text, 12.0, true, 1.0, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("..."));
        assert!(text_width(&lines[1], 12.0, true) <= 1.0);
    }

    #[test]
    fn test_long_word_is_broken() {
        let lines = wrap_text("Supercalifragilisticexpialidocious", 12.0, false, 0.8, 0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "Supercalifragilisticexpialidocious");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_to_width("short", 8.0, false, 5.0), "short");
        let cut = truncate_to_width("a rather long component name", 8.0, false, 0.6);
        assert!(cut.ends_with("..."));
        assert!(text_width(&cut, 8.0, false) <= 0.6);
    }

    #[test]
    fn test_truncate_long_input_is_linear() {
        let long = "x".repeat(100_000);
        let started = std::time::Instant::now();
        let cut = truncate_to_width(&long, 8.0, false, 1.5);
        let lines = wrap_text(&format!("{} tail", long), 8.0, false, 1.5, 2);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));

        assert!(cut.ends_with("..."));
        assert!(text_width(&cut, 8.0, false) <= 1.5);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("..."));
    }

    #[test]
    fn test_ellipsis_drops_trailing_space() {
        let max_width = text_width("ab c...", 10.0, false) - 0.001;
        let cut = truncate_to_width("ab cdefghijklmnop", 10.0, false, max_width);
        assert_eq!(cut, "ab...");
    }

    #[test]
    fn test_empty_text() {
        assert!(wrap_text("   ", 10.0, false, 1.0, 2).is_empty());
    }
}
