//! Static font-metric table for the sans face every template is set in.
//!
//! Widths are in em units (relative to font size) and cover ASCII 0x20..=0x7E.
//! Index = (char as usize) - 32. Heavier weights are approximated by a uniform
//! widening factor rather than a second table; the rasterizer advances by the
//! same numbers, so layout and pixels agree even where the approximation doesn't
//! match a real font.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    Semibold,
    Bold,
}

impl FontWeight {
    fn widening(self) -> f32 {
        match self {
            FontWeight::Regular => 1.0,
            FontWeight::Semibold => 1.04,
            FontWeight::Bold => 1.08,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
///
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback for codepoints outside printable ASCII.
    pub average_char_width: f32,
}

impl FontMetricTable {
    pub fn char_em(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Advance of a single character in points, including letter tracking.
    pub fn advance_pt(&self, c: char, size_pt: f32, weight: FontWeight, tracking_em: f32) -> f32 {
        (self.char_em(c) * weight.widening() + tracking_em) * size_pt
    }

    /// Rendered width of `s` in points.
    pub fn measure_pt(&self, s: &str, size_pt: f32, weight: FontWeight, tracking_em: f32) -> f32 {
        s.chars()
            .map(|c| self.advance_pt(c, size_pt, weight, tracking_em))
            .sum()
    }

    /// Greedy word-wrap of `s` into lines no wider than `max_width_pt`.
    ///
    /// A single word wider than the line is broken between characters, which is
    /// how long e-mail addresses behave in narrow columns.
    pub fn wrap(
        &self,
        s: &str,
        size_pt: f32,
        weight: FontWeight,
        tracking_em: f32,
        max_width_pt: f32,
    ) -> Vec<String> {
        let measure = |t: &str| self.measure_pt(t, size_pt, weight, tracking_em);
        let space_w = measure(" ");

        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_w = measure(word);

            if word_w > max_width_pt {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = self.break_word(word, size_pt, weight, tracking_em, max_width_pt);
                // The tail of a broken word can share its line with what follows.
                if let Some(tail) = pieces.pop() {
                    lines.extend(pieces);
                    current_width = measure(&tail);
                    current = tail;
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width_pt {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn break_word(
        &self,
        word: &str,
        size_pt: f32,
        weight: FontWeight,
        tracking_em: f32,
        max_width_pt: f32,
    ) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.advance_pt(c, size_pt, weight, tracking_em);
            if !piece.is_empty() && width + w > max_width_pt {
                pieces.push(std::mem::take(&mut piece));
                width = 0.0;
            }
            piece.push(c);
            width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

/// Humanist sans-serif (Inter-like proportions).
static SANS_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
};

pub fn sans() -> &'static FontMetricTable {
    &SANS_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(sans().measure_pt("", 14.0, FontWeight::Regular, 0.0), 0.0);
    }

    #[test]
    fn test_measure_scales_with_size() {
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00em
        let w = sans().measure_pt("Rust", 10.0, FontWeight::Regular, 0.0);
        assert!((w - 20.0).abs() < 1e-3, "got {w}");
    }

    #[test]
    fn test_bold_and_tracking_widen_text() {
        let regular = sans().measure_pt("Jane Doe", 12.0, FontWeight::Regular, 0.0);
        let bold = sans().measure_pt("Jane Doe", 12.0, FontWeight::Bold, 0.0);
        let tracked = sans().measure_pt("Jane Doe", 12.0, FontWeight::Regular, 0.1);
        assert!(bold > regular);
        assert!((tracked - regular - 8.0 * 1.2).abs() < 1e-3);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let w = sans().measure_pt("é", 1.0, FontWeight::Regular, 0.0);
        assert!((w - 0.52).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_short_text_is_single_line() {
        let lines = sans().wrap("Go Testing", 14.0, FontWeight::Regular, 0.0, 300.0);
        assert_eq!(lines, vec!["Go Testing".to_string()]);
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let text = "Architected a distributed caching layer using consistent hashing";
        let lines = sans().wrap(text, 14.0, FontWeight::Regular, 0.0, 150.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
        for line in &lines {
            assert!(sans().measure_pt(line, 14.0, FontWeight::Regular, 0.0) <= 150.0);
        }
    }

    #[test]
    fn test_wrap_breaks_overlong_word_by_characters() {
        let email = "jane.doe.with.a.very.long.address@example-company.com";
        let lines = sans().wrap(email, 12.0, FontWeight::Regular, 0.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), email);
    }

    #[test]
    fn test_wrap_blank_input_yields_no_lines() {
        assert!(sans().wrap("   ", 12.0, FontWeight::Regular, 0.0, 100.0).is_empty());
    }
}
