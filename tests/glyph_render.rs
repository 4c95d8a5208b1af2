//! Host-level tests for rendering digits into the pixel buffer.

use digit_matrix::{DIGIT_COLOR, Digit, LED_COUNT, PixelBuffer, Rgb, glyph_for};

const BLACK: Rgb = Rgb::new(0, 0, 0);

fn digits() -> impl Iterator<Item = Digit> {
    (0..=9).filter_map(Digit::new)
}

#[test]
fn render_lights_exactly_the_glyph_cells() {
    let mut buffer = PixelBuffer::new();
    for digit in digits() {
        buffer.render_digit(digit, DIGIT_COLOR);
        let glyph = glyph_for(digit.value());
        for index in 0..LED_COUNT {
            let expected = if glyph.is_on(index) { DIGIT_COLOR } else { BLACK };
            assert_eq!(buffer.get(index), expected, "digit {} led {index}", digit.value());
        }

        buffer.clear();
        assert!(buffer.is_dark(), "clear after digit {}", digit.value());
    }
}

#[test]
fn render_is_idempotent() {
    for digit in digits() {
        let mut once = PixelBuffer::new();
        once.render_digit(digit, DIGIT_COLOR);

        let mut twice = PixelBuffer::new();
        twice.render_digit(digit, DIGIT_COLOR);
        twice.render_digit(digit, DIGIT_COLOR);

        assert_eq!(once.pixels(), twice.pixels());
    }
}

#[test]
fn render_leaves_no_residue_from_previous_frame() {
    let mut buffer = PixelBuffer::new();
    for index in 0..LED_COUNT {
        buffer.set(index, 9, 9, 9);
    }
    let one = Digit::new(1).expect("1 is a digit");
    buffer.render_digit(one, DIGIT_COLOR);

    let lit = buffer.pixels().iter().filter(|pixel| **pixel != BLACK).count();
    assert_eq!(lit, glyph_for(1).lit_count() as usize);
    assert!(buffer.pixels().iter().all(|pixel| *pixel == BLACK || *pixel == DIGIT_COLOR));
}

#[test]
fn custom_color_is_used_verbatim() {
    let color = Rgb::new(10, 20, 30);
    let mut buffer = PixelBuffer::new();
    buffer.render_digit(Digit::new(0).expect("0 is a digit"), color);
    // 0 is a full outline, so LED 0 is lit.
    assert_eq!(buffer.get(0), color);
    assert_eq!(buffer.get(12), BLACK);
}

#[test]
fn digit_chars_map_to_matching_glyphs() {
    for (character, value) in ('0'..='9').zip(0u8..) {
        let digit = Digit::from_char(character).expect("ascii digit");
        assert_eq!(digit.value(), value);
        assert_eq!(digit.glyph(), glyph_for(value));
    }
    assert_eq!(Digit::from_char('x'), None);
    assert_eq!(Digit::from_char('\n'), None);
}
