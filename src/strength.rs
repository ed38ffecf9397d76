//! Strength module - Regex-based password strength scoring
//!
//! Scores 0-4 from length and character classes. The common-password list
//! is passed in through [`StrengthConfig`], never read from global state.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const STRENGTH_TEXTS: [&str; 5] = ["Very Weak", "Weak", "Moderate", "Strong", "Very Strong"];
const CRACK_TIMES: [&str; 5] = [
    "less than a second",
    "minutes",
    "hours",
    "months",
    "centuries",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrengthError {
    #[error("password cannot be empty")]
    Empty,
}

/// Scoring thresholds and the common-password list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthConfig {
    /// Length that earns the first point
    pub min_length_for_bonus: usize,
    /// Length that earns the long-password point
    pub long_length_bonus: usize,
    /// Passwords that always score 0 (compared case-insensitively)
    pub common_words: Vec<String>,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            min_length_for_bonus: 8,
            long_length_bonus: 12,
            common_words: [
                "password", "123456", "12345678", "qwerty", "abc123", "letmein", "admin",
                "welcome", "monkey", "iloveyou", "111111", "dragon",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Strength report for one password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthReport {
    pub length: usize,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    pub is_common: bool,
    pub score: u8,
    pub crack_time_display: String,
    pub strength_text: String,
    pub suggestions: Vec<String>,
}

/// Compiled classifier
pub struct StrengthEvaluator {
    upper: Regex,
    lower: Regex,
    digit: Regex,
    symbol: Regex,
    common: HashSet<String>,
    config: StrengthConfig,
}

impl StrengthEvaluator {
    pub fn new(config: StrengthConfig) -> Self {
        let common = config.common_words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            upper: Regex::new(r"[A-Z]").expect("static regex"),
            lower: Regex::new(r"[a-z]").expect("static regex"),
            digit: Regex::new(r"\d").expect("static regex"),
            symbol: Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("static regex"),
            common,
            config,
        }
    }

    /// Classify and score `password`
    pub fn evaluate(&self, password: &str) -> Result<StrengthReport, StrengthError> {
        if password.is_empty() {
            return Err(StrengthError::Empty);
        }

        let length = password.chars().count();
        let has_upper = self.upper.is_match(password);
        let has_lower = self.lower.is_match(password);
        let has_digit = self.digit.is_match(password);
        let has_symbol = self.symbol.is_match(password);
        let is_common = self.common.contains(&password.to_lowercase());

        let score = if is_common {
            0
        } else {
            let points = [
                length >= self.config.min_length_for_bonus,
                has_upper && has_lower,
                has_digit,
                has_symbol,
                length >= self.config.long_length_bonus,
            ];
            points.iter().filter(|&&p| p).count().min(4) as u8
        };

        let mut suggestions = Vec::new();
        if is_common {
            suggestions.push("Avoid common passwords".to_string());
        }
        if !has_upper {
            suggestions.push("Add uppercase letters".to_string());
        }
        if !has_lower {
            suggestions.push("Add lowercase letters".to_string());
        }
        if !has_digit {
            suggestions.push("Add numbers".to_string());
        }
        if !has_symbol {
            suggestions.push("Add symbols".to_string());
        }
        if length < self.config.long_length_bonus {
            suggestions.push("Make your password longer".to_string());
        }

        Ok(StrengthReport {
            length,
            has_upper,
            has_lower,
            has_digit,
            has_symbol,
            is_common,
            score,
            crack_time_display: CRACK_TIMES[score as usize].to_string(),
            strength_text: STRENGTH_TEXTS[score as usize].to_string(),
            suggestions,
        })
    }
}

impl Default for StrengthEvaluator {
    fn default() -> Self {
        Self::new(StrengthConfig::default())
    }
}
