//! Charset presets and detection

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DIGITS: &str = "0123456789";
pub const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Named character sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharsetPreset {
    Lower,
    Upper,
    Digits,
    Alnum,
    /// Letters, digits and ASCII punctuation
    #[default]
    Full,
    /// Derived from the character classes present in a plaintext sample
    Auto,
}

impl CharsetPreset {
    /// Characters of the preset. `sample` is only consulted for `Auto`;
    /// without one `Auto` falls back to `Full`.
    pub fn chars(&self, sample: Option<&str>) -> Vec<char> {
        let s = match self {
            CharsetPreset::Lower => LOWER.to_string(),
            CharsetPreset::Upper => UPPER.to_string(),
            CharsetPreset::Digits => DIGITS.to_string(),
            CharsetPreset::Alnum => format!("{LOWER}{UPPER}{DIGITS}"),
            CharsetPreset::Full => format!("{LOWER}{UPPER}{DIGITS}{PUNCTUATION}"),
            CharsetPreset::Auto => match sample {
                Some(sample) => return detect_charset(sample),
                None => return CharsetPreset::Full.chars(None),
            },
        };
        s.chars().collect()
    }
}

/// Union of the character classes present in `sample`, in the order
/// digits, lowercase, uppercase, punctuation.
///
/// Characters outside these classes contribute nothing, so a sample made
/// only of them yields an empty charset.
pub fn detect_charset(sample: &str) -> Vec<char> {
    let mut charset = String::new();
    if sample.chars().any(|c| c.is_ascii_digit()) {
        charset.push_str(DIGITS);
    }
    if sample.chars().any(|c| c.is_ascii_lowercase()) {
        charset.push_str(LOWER);
    }
    if sample.chars().any(|c| c.is_ascii_uppercase()) {
        charset.push_str(UPPER);
    }
    if sample.chars().any(|c| PUNCTUATION.contains(c)) {
        charset.push_str(PUNCTUATION);
    }
    charset.chars().collect()
}

/// Drop repeated characters, keeping the first occurrence
pub fn dedup_charset(charset: &[char]) -> Vec<char> {
    let mut seen = HashSet::with_capacity(charset.len());
    let unique: Vec<char> = charset.iter().copied().filter(|c| seen.insert(*c)).collect();

    if unique.len() != charset.len() {
        warn!(
            given = charset.len(),
            unique = unique.len(),
            "Charset contains duplicates, ignoring repeats"
        );
    }
    unique
}
