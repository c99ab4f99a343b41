//! Soundex phonetic encoding.
//!
//! Characters are NFKD-decomposed and upper-cased before coding. The first
//! character is kept as-is; H and W do not separate two letters with the
//! same code, every other uncoded character does.

use unicode_normalization::UnicodeNormalization;

const CODE_LEN: usize = 4;

fn code(c: char) -> Option<char> {
    match c {
        'B' | 'F' | 'P' | 'V' => Some('1'),
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some('2'),
        'D' | 'T' => Some('3'),
        'L' => Some('4'),
        'M' | 'N' => Some('5'),
        'R' => Some('6'),
        _ => None,
    }
}

/// Encode `s` as a four-character Soundex code. Empty input yields "".
pub fn soundex(s: &str) -> String {
    let mut chars = s.nfkd().flat_map(char::to_uppercase);
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut result = String::with_capacity(CODE_LEN);
    result.push(first);
    let mut count = 1;
    let mut last = code(first);

    for c in chars {
        if count == CODE_LEN {
            break;
        }
        match code(c) {
            Some(digit) => {
                if last != Some(digit) {
                    result.push(digit);
                    count += 1;
                }
                last = Some(digit);
            }
            None if c != 'H' && c != 'W' => last = None,
            None => {}
        }
    }

    result.extend(std::iter::repeat('0').take(CODE_LEN - count));
    result
}

pub fn sounds_alike(a: &str, b: &str) -> bool {
    soundex(a) == soundex(b)
}
