//! Utility helpers
//!
//! Natural-sort keys for place coordinates ("уч. 12а" style strings)
//! and registry numbers. The key is computed on read; nothing derived
//! is persisted.

use chrono::{Local, NaiveDate};

/// Sort weight for strings that carry no numeric part. Keeps them after
/// every numbered entry, matching the legacy registry ordering.
const NO_NUMBER_WEIGHT: u64 = 1_999_999_999;

/// Natural-sort key for a free-form coordinate string.
///
/// Splits the string into a leading non-digit prefix, the first run of
/// digits and the remaining tail, so `"2"` sorts before `"10"` and
/// `"а1"` groups with `"а2"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey {
    pub prefix: String,
    pub number: u64,
    pub suffix: String,
}

impl NaturalKey {
    pub fn of(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        let digits_start = lower.find(|c: char| c.is_ascii_digit());
        match digits_start {
            Some(start) => {
                let rest = &lower[start..];
                let digits_len = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                let number = rest[..digits_len].parse().unwrap_or(NO_NUMBER_WEIGHT);
                NaturalKey {
                    prefix: lower[..start].to_string(),
                    number,
                    suffix: rest[digits_len..].to_string(),
                }
            }
            None => NaturalKey {
                prefix: String::new(),
                number: NO_NUMBER_WEIGHT,
                suffix: lower,
            },
        }
    }
}

/// Current civil date in the server's local timezone.
///
/// Validation deadlines ("not later than today") are civil-date
/// comparisons, so local time is the right clock here.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
