//! Turns byte codes into password characters: categorical mapping, the fixed
//! position rules, and the validator driven extra transform. Every glyph is
//! ASCII so the working buffer is a byte vector.

use zeroize::Zeroizing;

use crate::aggregate::ByteCodes;
use crate::crypto::digest::sha384_hex;
use crate::input::InputSet;
use crate::salt::derive_salt;

/// Symbols available when special characters are enabled.
pub const SPECIAL_CHARS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?/~";

const CATEGORY_COUNT: u8 = 4;
const ALPHABET_LEN: u8 = 26;
const DIGIT_COUNT: u8 = 10;

/// Working buffer of password bytes, wiped on drop.
pub type Glyphs = Zeroizing<Vec<u8>>;

/// Character category selected by a byte code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Upper,
    Lower,
    Digit,
    Special,
}

impl Category {
    pub fn from_code(code: u8) -> Self {
        match code % CATEGORY_COUNT {
            0 => Category::Upper,
            1 => Category::Lower,
            2 => Category::Digit,
            _ => Category::Special,
        }
    }

    /// The glyph chosen by `code` within this category. Specials fall back
    /// to digits when they are disabled.
    pub fn glyph(self, code: u8, allow_special: bool) -> u8 {
        match self {
            Category::Upper => b'A' + code % ALPHABET_LEN,
            Category::Lower => b'a' + code % ALPHABET_LEN,
            Category::Digit => digit(code),
            Category::Special => special_or_digit(code, allow_special),
        }
    }
}

fn digit(code: u8) -> u8 {
    b'0' + code % DIGIT_COUNT
}

fn special(code: u8) -> u8 {
    SPECIAL_CHARS[usize::from(code) % SPECIAL_CHARS.len()]
}

fn special_or_digit(code: u8, allow_special: bool) -> u8 {
    if allow_special {
        special(code)
    } else {
        digit(code)
    }
}

/// Maps `length` positions: byte `i` picks the category and byte `i + 1`
/// picks the glyph.
pub fn map_glyphs(codes: &ByteCodes, allow_special: bool, length: usize) -> Glyphs {
    let glyphs = (0..length)
        .map(|i| Category::from_code(codes.at(i)).glyph(codes.at(i + 1), allow_special))
        .collect();
    Zeroizing::new(glyphs)
}

/// Applies the fixed position rules in place. Positions 0 to 2 are only
/// touched when they exist.
pub fn post_process(glyphs: &mut [u8], codes: &ByteCodes, allow_special: bool) {
    if let Some(first) = glyphs.get_mut(0) {
        first.make_ascii_uppercase();
    }
    if let Some(second) = glyphs.get_mut(1) {
        *second = special_or_digit(codes.at(0), allow_special);
    }
    if let Some(third) = glyphs.get_mut(2) {
        *third = digit(codes.at(1));
    }

    for (i, glyph) in glyphs.iter_mut().enumerate().skip(3) {
        if i % 5 == 0 {
            *glyph = special_or_digit(codes.at(i), allow_special);
        } else if i % 7 == 0 {
            *glyph = digit(codes.at(i));
        } else if i % 3 == 0 {
            if i % 6 == 0 {
                glyph.make_ascii_uppercase();
            } else {
                glyph.make_ascii_lowercase();
            }
        }
    }
}

/// True when the check hash of `password` starts with `0` and specials are
/// enabled.
pub fn needs_extra_transform(input: &InputSet, password: &[u8], allow_special: bool) -> bool {
    if !allow_special {
        return false;
    }
    let mut material = Zeroizing::new(password.to_vec());
    material.extend_from_slice(derive_salt(input).as_bytes());
    sha384_hex(&material).starts_with('0')
}

/// Overwrites every fourth position with a special character.
pub fn extra_transform(glyphs: &mut [u8], codes: &ByteCodes) {
    for (i, glyph) in glyphs.iter_mut().enumerate().step_by(4) {
        *glyph = special(codes.at(i));
    }
}

#[cfg(test)]
mod tests {
    use super::{
        extra_transform, map_glyphs, post_process, Category, SPECIAL_CHARS,
    };
    use crate::aggregate::ByteCodes;

    fn codes(bytes: &[u8]) -> ByteCodes {
        ByteCodes::new(bytes.to_vec())
    }

    #[test]
    fn special_set_is_fixed() {
        assert_eq!(SPECIAL_CHARS.len(), 28);
        assert!(SPECIAL_CHARS.iter().all(|c| c.is_ascii_punctuation()));
    }

    #[test]
    fn categories_select_glyphs() {
        assert_eq!(Category::from_code(4), Category::Upper);
        assert_eq!(Category::from_code(5), Category::Lower);
        assert_eq!(Category::from_code(6), Category::Digit);
        assert_eq!(Category::from_code(255), Category::Special);

        assert_eq!(Category::Upper.glyph(27, true), b'B');
        assert_eq!(Category::Lower.glyph(25, true), b'z');
        assert_eq!(Category::Digit.glyph(123, true), b'3');
        assert_eq!(Category::Special.glyph(28, true), b'!');
        assert_eq!(Category::Special.glyph(29, false), b'9');
    }

    #[test]
    fn mapping_reads_adjacent_codes() {
        // (0,1) upper 'B', (1,2) lower 'c', (2,3) digit '3', (3,0) special '!'.
        let glyphs = map_glyphs(&codes(&[0, 1, 2, 3]), true, 6);
        assert_eq!(glyphs.as_slice(), b"Bc3!Bc");
    }

    #[test]
    fn fixed_positions() {
        let codes = codes(&[11, 22, 33, 44]);
        let mut glyphs = b"abcdefghijklmnopqrstu".to_vec();
        post_process(&mut glyphs, &codes, false);

        assert_eq!(glyphs[0], b'A');
        assert_eq!(glyphs[1], b'1');
        assert_eq!(glyphs[2], b'2');
        // 5, 10, 15, 20 take the special-or-digit rule.
        assert_eq!(glyphs[5], b'2');
        assert_eq!(glyphs[10], b'3');
        assert_eq!(glyphs[15], b'4');
        // 7 and 14 become digits; 21 does not exist.
        assert_eq!(glyphs[7], b'4');
        assert_eq!(glyphs[14], b'3');
        // 6, 12, 18 upper; 3, 9 lower.
        assert_eq!(glyphs[6], b'G');
        assert_eq!(glyphs[12], b'M');
        assert_eq!(glyphs[18], b'S');
        assert_eq!(glyphs[3], b'd');
        assert_eq!(glyphs[9], b'j');
        // Untouched.
        assert_eq!(glyphs[4], b'e');
        assert_eq!(glyphs[8], b'i');
    }

    #[test]
    fn short_buffers_only_touch_existing_positions() {
        let codes = codes(&[1, 2]);
        let mut one = b"q".to_vec();
        post_process(&mut one, &codes, true);
        assert_eq!(one, b"Q");

        let mut two = b"qq".to_vec();
        post_process(&mut two, &codes, true);
        assert_eq!(two, b"Q@");

        let mut empty: Vec<u8> = Vec::new();
        post_process(&mut empty, &codes, true);
        assert!(empty.is_empty());
    }

    #[test]
    fn extra_transform_hits_every_fourth() {
        let codes = codes(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let mut glyphs = b"aaaaaaaaa".to_vec();
        extra_transform(&mut glyphs, &codes);
        assert_eq!(glyphs, b"!aaa%aaa(");
    }
}
