//! Keypad input detection for the calculator.
//!
//! Determines whether a typed line is a sequence of keypad presses
//! (`7+3=`, `12 × 4 =`, `c`) and splits it into individual keys.

use lazy_static::lazy_static;
use regex::Regex;

use super::evaluation::Operator;

lazy_static! {
    /// Matches lines made only of keypad characters.
    /// Allows: digits, dot, the four operators (ASCII and typographic),
    /// equals, sign flip (`±` or `~`), percent, `c` for clear, whitespace.
    static ref KEYPAD_LINE: Regex = Regex::new(
        r"^[\d\s\.\+\-−\*×/÷=±~%cC]+$"
    ).unwrap();

    /// Matches a single key press.
    static ref KEY: Regex = Regex::new(
        r"[\d\.]|[\+\-−\*×/÷]|[=±~%]|[cC]"
    ).unwrap();
}

/// A single key on the calculator keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A digit `0-9` or the decimal point.
    Digit(char),
    Operator(Operator),
    Equals,
    Clear,
    ToggleSign,
    Percent,
}

impl Key {
    fn from_token(token: &str) -> Option<Self> {
        let c = token.chars().next()?;
        match c {
            '0'..='9' | '.' => Some(Self::Digit(c)),
            '=' => Some(Self::Equals),
            '±' | '~' => Some(Self::ToggleSign),
            '%' => Some(Self::Percent),
            'c' | 'C' => Some(Self::Clear),
            _ => Operator::from_char(c).map(Self::Operator),
        }
    }
}

/// Check if input looks like a run of keypad presses.
pub fn looks_like_keys(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && KEYPAD_LINE.is_match(trimmed)
}

/// Split a keypad line into keys.
///
/// Returns `None` if the line contains anything that is not a key.
pub fn parse_keys(input: &str) -> Option<Vec<Key>> {
    if !looks_like_keys(input) {
        return None;
    }

    KEY.find_iter(input)
        .map(|m| Key::from_token(m.as_str()))
        .collect()
}
