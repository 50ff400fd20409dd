//! Registry number format and sequencing
//!
//! Account numbers and registry-assigned seat numbers share one
//! format: exactly 8 digits, the leading 4 being the year, the
//! trailing 4 a non-zero sequence (`20240001`). Sequences are scoped
//! per cemetery per year and strictly increasing.

use chrono::{Datelike, NaiveDate};
use shared::error::{ErrorCode, ValidationError, ValidationResult};

/// Total number length: 4-digit year + 4-digit sequence
pub const NUMBER_LEN: usize = 8;

/// Validate an account number against the registry format.
pub fn validate_account_number(number: &str, today: NaiveDate) -> ValidationResult {
    validate_number(number, today, "account_number", ErrorCode::AccountNumberFormat)
}

/// Validate a seat number against the registry format.
pub fn validate_seat_number(number: &str, today: NaiveDate) -> ValidationResult {
    validate_number(number, today, "seat", ErrorCode::SeatFormat)
}

fn validate_number(
    number: &str,
    today: NaiveDate,
    field: &'static str,
    format_code: ErrorCode,
) -> ValidationResult {
    if number.len() != NUMBER_LEN || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::on_field(format_code, field));
    }
    let year: i32 = number[..4].parse().unwrap_or(0);
    if year > today.year() {
        return Err(ValidationError::on_field(
            ErrorCode::AccountNumberYearInFuture,
            field,
        ));
    }
    if number.ends_with("0000") {
        return Err(ValidationError::on_field(
            ErrorCode::AccountNumberZeroSuffix,
            field,
        ));
    }
    Ok(())
}

/// Leading year of a well-formed registry number.
pub fn number_year(number: &str) -> Option<i32> {
    if number.len() == NUMBER_LEN && number.bytes().all(|b| b.is_ascii_digit()) {
        number[..4].parse().ok()
    } else {
        None
    }
}

/// Next number in the per-cemetery sequence for `year`.
///
/// `current_max` is the highest existing number with that year prefix;
/// `None` (or a stale prefix) restarts the sequence at `<year>0001`.
/// Returns `None` once the year's 9999 numbers are used up; the
/// sequence never rolls over into the next year's prefix.
pub fn next_number(current_max: Option<&str>, year: i32) -> Option<String> {
    let prefix = format!("{year:04}");
    match current_max {
        Some(max) if max.starts_with(&prefix) && max.len() == NUMBER_LEN => {
            if max.ends_with("9999") {
                return None;
            }
            match max.parse::<u64>() {
                Ok(n) => Some(format!("{:08}", n + 1)),
                Err(_) => Some(format!("{prefix}0001")),
            }
        }
        _ => Some(format!("{prefix}0001")),
    }
}
