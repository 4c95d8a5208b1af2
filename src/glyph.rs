//! Digit glyphs for the 5×5 matrix.
//!
//! Each [`Glyph`] is 25 on/off cells in LED index order (row-major, five cells per row).
//! The table is `const` data; see [`glyph_for`].

use crate::{LED_COUNT, MATRIX_WIDTH};

/// A 25-cell on/off pattern, one bit per LED (bit `i` is LED `i`).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph(u32);

impl Glyph {
    /// Every cell off.
    pub const BLANK: Self = Self(0);

    /// Builds a glyph from five rows of five cells, each `0` (off) or `1` (on).
    ///
    /// ```
    /// use digit_matrix::Glyph;
    ///
    /// const DOT: Glyph = Glyph::from_rows([
    ///     [0, 0, 0, 0, 0],
    ///     [0, 0, 0, 0, 0],
    ///     [0, 0, 1, 0, 0],
    ///     [0, 0, 0, 0, 0],
    ///     [0, 0, 0, 0, 0],
    /// ]);
    /// assert!(DOT.is_on(12));
    /// assert_eq!(DOT.lit_count(), 1);
    /// ```
    #[must_use]
    pub const fn from_rows(rows: [[u8; MATRIX_WIDTH]; LED_COUNT / MATRIX_WIDTH]) -> Self {
        let mut bits = 0u32;
        let mut row = 0;
        while row < rows.len() {
            let mut col = 0;
            while col < MATRIX_WIDTH {
                let cell = rows[row][col];
                assert!(cell <= 1, "glyph cells must be 0 or 1");
                if cell == 1 {
                    bits |= 1 << (row * MATRIX_WIDTH + col);
                }
                col += 1;
            }
            row += 1;
        }
        Self(bits)
    }

    /// Whether LED `index` is lit. Indexes past the grid are never lit.
    #[must_use]
    pub const fn is_on(self, index: usize) -> bool {
        index < LED_COUNT && (self.0 >> index) & 1 == 1
    }

    /// Number of lit cells.
    #[must_use]
    pub const fn lit_count(self) -> u32 {
        self.0.count_ones()
    }

    /// The 25 cells in LED index order.
    pub fn cells(self) -> impl Iterator<Item = bool> {
        (0..LED_COUNT).map(move |index| self.is_on(index))
    }
}

/// A decimal digit, 0 through 9.
///
/// Validating once here lets the render path skip range checks.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    /// Parses an ASCII character `'0'..='9'`; anything else is `None`.
    #[must_use]
    pub const fn from_char(character: char) -> Option<Self> {
        if character.is_ascii_digit() {
            Some(Self(character as u8 - b'0'))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn glyph(self) -> Glyph {
        glyph_for(self.0)
    }
}

/// Returns the glyph for `digit`.
///
/// `digit` must be 0-9. Debug builds panic otherwise; release builds return [`Glyph::BLANK`],
/// so a bad digit renders as an empty frame.
#[must_use]
pub const fn glyph_for(digit: u8) -> Glyph {
    debug_assert!(digit <= 9, "digit out of range");
    if (digit as usize) < DIGIT_GLYPHS.len() {
        DIGIT_GLYPHS[digit as usize]
    } else {
        Glyph::BLANK
    }
}

// Rows are listed from LED 0 upward. On the board the string starts at the bottom row, so the
// patterns read upside down here.
const DIGIT_GLYPHS: [Glyph; 10] = [
    // 0
    Glyph::from_rows([
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ]),
    // 1
    Glyph::from_rows([
        [0, 1, 1, 1, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 1, 1, 0, 0],
        [0, 0, 1, 0, 0],
    ]),
    // 2
    Glyph::from_rows([
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 0],
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ]),
    // 3
    Glyph::from_rows([
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ]),
    // 4
    Glyph::from_rows([
        [1, 0, 0, 0, 0],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
    ]),
    // 5
    Glyph::from_rows([
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 0],
        [1, 1, 1, 1, 1],
    ]),
    // 6
    Glyph::from_rows([
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ]),
    // 7
    Glyph::from_rows([
        [0, 0, 0, 1, 0],
        [0, 0, 1, 0, 0],
        [0, 1, 0, 0, 0],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ]),
    // 8
    Glyph::from_rows([
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ]),
    // 9
    Glyph::from_rows([
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ]),
];

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn digit_from_char_accepts_only_ascii_digits() {
        assert_eq!(Digit::from_char('0').map(Digit::value), Some(0));
        assert_eq!(Digit::from_char('9').map(Digit::value), Some(9));
        assert_eq!(Digit::from_char('x'), None);
        assert_eq!(Digit::from_char('/'), None);
        assert_eq!(Digit::from_char(':'), None);
        assert_eq!(Digit::new(10), None);
    }

    #[test]
    fn eight_lights_outline_and_both_bars() {
        // 8 is the full outline plus the middle bar: 5 + 2 + 5 + 2 + 5
        assert_eq!(glyph_for(8).lit_count(), 19);
        assert!(!glyph_for(8).is_on(6));
        assert!(glyph_for(8).is_on(10));
    }

    #[test]
    fn every_digit_has_a_distinct_glyph() {
        for a in 0..10 {
            for b in (a + 1)..10 {
                assert_ne!(glyph_for(a), glyph_for(b), "digits {a} and {b} share a glyph");
            }
        }
    }

    #[test]
    fn cells_iterates_all_twenty_five() {
        let cells = glyph_for(1).cells();
        assert_eq!(cells.count(), LED_COUNT);
        assert!(glyph_for(1).cells().nth(1).unwrap_or(false));
        assert!(!Glyph::BLANK.is_on(LED_COUNT));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "digit out of range")]
    fn glyph_for_rejects_ten_in_debug() {
        let _ = glyph_for(10);
    }
}
