//! Greedy word wrap against a millimetre width.

use super::metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width_mm` at `font_size_pt`.
///
/// Explicit newlines start a new paragraph. Runs of whitespace collapse to one space.
/// A single word wider than the line is split at character boundaries.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    font_size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    let space_w = metrics.space_width_mm(font_size_pt);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            for piece in split_oversized(word, metrics, font_size_pt, max_width_mm) {
                let piece_w = metrics.width_mm(piece, font_size_pt);

                if !current.is_empty() && current_width + space_w + piece_w > max_width_mm {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }

                if current.is_empty() {
                    current_width = piece_w;
                } else {
                    current.push(' ');
                    current_width += space_w + piece_w;
                }
                current.push_str(piece);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Splits a word wider than `max_width_mm` into pieces that fit; at least one
/// character per piece.
fn split_oversized<'a>(
    word: &'a str,
    metrics: &FontMetricTable,
    font_size_pt: f32,
    max_width_mm: f32,
) -> Vec<&'a str> {
    if metrics.width_mm(word, font_size_pt) <= max_width_mm {
        return vec![word];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut width = 0.0_f32;
    for (idx, ch) in word.char_indices() {
        let mut buf = [0u8; 4];
        let ch_w = metrics.width_mm(ch.encode_utf8(&mut buf), font_size_pt);
        if idx > start && width + ch_w > max_width_mm {
            pieces.push(&word[start..idx]);
            start = idx;
            width = 0.0;
        }
        width += ch_w;
    }
    pieces.push(&word[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::metrics::HELVETICA;

    const WIDTH_MM: f32 = 160.0;

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text("Shorten sentences.", &HELVETICA, 14.0, WIDTH_MM);
        assert_eq!(lines, ["Shorten sentences."]);
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap_text("   ", &HELVETICA, 14.0, WIDTH_MM).is_empty());
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Quantify achievements with concrete metrics, lead each bullet with a strong \
                    action verb, and trim responsibilities that do not show impact on the team \
                    or the business. Recruiters skim, so the first few words of each line matter.";
        let lines = wrap_text(text, &HELVETICA, 14.0, WIDTH_MM);
        assert!(lines.len() >= 2, "expected wrapping, got {lines:?}");
        for line in &lines {
            assert!(HELVETICA.width_mm(line, 14.0) <= WIDTH_MM, "line too wide: {line}");
        }
        // No words lost or reordered.
        let rejoined = lines.join(" ");
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined.split(' ').collect::<Vec<_>>(), words);
    }

    #[test]
    fn test_newlines_start_new_lines() {
        let lines = wrap_text("First point.\nSecond point.", &HELVETICA, 14.0, WIDTH_MM);
        assert_eq!(lines, ["First point.", "Second point."]);
    }

    #[test]
    fn test_oversized_word_is_split() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, &HELVETICA, 14.0, WIDTH_MM);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(HELVETICA.width_mm(line, 14.0) <= WIDTH_MM);
        }
    }
}
