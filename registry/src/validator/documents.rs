//! Customer paperwork validation
//!
//! Identity-document age and doverennost validity checks tied to a
//! burial date, plus standalone bank-account field checks.

use chrono::NaiveDate;
use shared::error::{ErrorCode, ValidationError, ValidationResult};
use shared::models::{BankAccount, Doverennost, Person};

use crate::core::Policy;

/// A customer identity document must not predate the burial date by
/// more than the policy maximum.
pub fn check_customer_document_age(
    customer: &Person,
    date_fact: NaiveDate,
    policy: &Policy,
) -> ValidationResult {
    if let Some(doc) = &customer.identity_document {
        if let Some(issued) = doc.issue_date {
            if date_fact - issued > Policy::window_days(policy.customer_document_max_age_years) {
                return Err(ValidationError::on_field(ErrorCode::DocumentTooOld, "customer"));
            }
        }
    }
    Ok(())
}

/// Doverennost checks for a burial with an organization agent.
///
/// For a burial dated today or later the doverennost must be complete.
/// Whenever dates are given, the validity window must bracket the
/// burial date clamped to today: issue not after `date_fact`, expiry
/// not before `min(date_fact, today)`.
pub fn check_doverennost(
    doverennost: &Doverennost,
    date_fact: NaiveDate,
    today: NaiveDate,
) -> ValidationResult {
    if date_fact >= today && !doverennost.is_complete() {
        return Err(ValidationError::on_field(
            ErrorCode::DoverennostIncomplete,
            "agent",
        ));
    }
    if let (Some(issued), Some(expires)) = (doverennost.issue_date, doverennost.expire_date) {
        if issued > expires {
            return Err(ValidationError::on_field(ErrorCode::IssueAfterExpiry, "agent"));
        }
    }
    if let Some(issued) = doverennost.issue_date {
        if issued > date_fact {
            return Err(ValidationError::on_field(
                ErrorCode::DoverennostNotYetValid,
                "agent",
            ));
        }
    }
    if let Some(expires) = doverennost.expire_date {
        if expires < date_fact.min(today) {
            return Err(ValidationError::on_field(
                ErrorCode::DoverennostExpired,
                "agent",
            ));
        }
    }
    Ok(())
}

/// Standalone doverennost checks, applied when one is saved on an
/// organization agent outside a burial.
pub fn check_doverennost_dates(doverennost: &Doverennost, today: NaiveDate) -> ValidationResult {
    if let Some(issued) = doverennost.issue_date {
        if issued > today {
            return Err(ValidationError::on_field(
                ErrorCode::DocumentDateInFuture,
                "issue_date",
            ));
        }
    }
    if let (Some(issued), Some(expires)) = (doverennost.issue_date, doverennost.expire_date) {
        if issued > expires {
            return Err(ValidationError::on_field(
                ErrorCode::IssueAfterExpiry,
                "issue_date",
            ));
        }
    }
    Ok(())
}

/// Bank account code fields carry digits only.
pub fn check_bank_account(account: &BankAccount) -> ValidationResult {
    check_digits(&account.settlement_account, "settlement_account")?;
    if let Some(ca) = &account.correspondent_account {
        check_digits(ca, "correspondent_account")?;
    }
    if let Some(bik) = &account.bik {
        check_digits(bik, "bik")?;
    }
    Ok(())
}

fn check_digits(value: &str, field: &'static str) -> ValidationResult {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::on_field(ErrorCode::DigitsOnly, field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2026, 8, 29)
    }

    fn dov(issue: Option<NaiveDate>, expire: Option<NaiveDate>) -> Doverennost {
        Doverennost {
            number: Some("77 АБ 123456".to_string()),
            issue_date: issue,
            expire_date: expire,
        }
    }

    fn customer(issue_date: Option<NaiveDate>) -> Person {
        Person {
            id: shared::types::new_id(),
            last_name: "Заказчиков".to_string(),
            first_name: "Олег".to_string(),
            middle_name: "Иванович".to_string(),
            birth_date: None,
            death_date: None,
            address: None,
            identity_document: Some(shared::models::IdentityDocument {
                doc_type: "паспорт".to_string(),
                series: Some("45 06".to_string()),
                number: "123456".to_string(),
                issuer: None,
                issue_date,
            }),
            death_certificate: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_customer_document_age_boundary() {
        let policy = Policy::default();
        let date_fact = d(2026, 5, 1);
        let window = Policy::window_days(policy.customer_document_max_age_years);

        let at_limit = customer(Some(date_fact - window));
        assert!(check_customer_document_age(&at_limit, date_fact, &policy).is_ok());

        let too_old = customer(Some(date_fact - window - chrono::Duration::days(1)));
        let err = check_customer_document_age(&too_old, date_fact, &policy).unwrap_err();
        assert_eq!(err.code, ErrorCode::DocumentTooOld);
        assert_eq!(err.field, Some("customer"));

        // No document on record passes
        assert!(check_customer_document_age(&customer(None), date_fact, &policy).is_ok());
    }

    #[test]
    fn test_future_burial_needs_complete_doverennost() {
        let incomplete = Doverennost {
            number: None,
            ..dov(Some(d(2025, 1, 1)), Some(d(2027, 1, 1)))
        };
        let err = check_doverennost(&incomplete, d(2026, 9, 1), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DoverennostIncomplete);

        // A past burial tolerates missing fields
        assert!(check_doverennost(&incomplete, d(2025, 9, 1), today()).is_ok());
    }

    #[test]
    fn test_doverennost_window_brackets_burial_date() {
        let d1 = dov(Some(d(2024, 1, 1)), Some(d(2027, 1, 1)));
        assert!(check_doverennost(&d1, d(2026, 9, 1), today()).is_ok());

        let issued_late = dov(Some(d(2026, 9, 15)), Some(d(2027, 1, 1)));
        let err = check_doverennost(&issued_late, d(2026, 9, 1), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DoverennostNotYetValid);

        let expired = dov(Some(d(2020, 1, 1)), Some(d(2021, 1, 1)));
        let err = check_doverennost(&expired, d(2026, 9, 1), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DoverennostExpired);
    }

    #[test]
    fn test_expiry_clamped_to_today_for_future_burials() {
        // Expires after today but before a far-future burial date:
        // the clamp to today accepts it
        let d1 = dov(Some(d(2024, 1, 1)), Some(d(2026, 10, 1)));
        assert!(check_doverennost(&d1, d(2026, 12, 1), today()).is_ok());
    }

    #[test]
    fn test_issue_after_expiry() {
        let bad = dov(Some(d(2026, 1, 1)), Some(d(2025, 1, 1)));
        let err = check_doverennost_dates(&bad, today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::IssueAfterExpiry);
    }

    #[test]
    fn test_bank_account_digits_only() {
        let mut acc = BankAccount {
            settlement_account: "40702810000000012345".to_string(),
            correspondent_account: Some("30101810400000000225".to_string()),
            bik: Some("044525225".to_string()),
            bank_name: "Сбербанк".to_string(),
        };
        assert!(check_bank_account(&acc).is_ok());

        acc.bik = Some("0445-25225".to_string());
        let err = check_bank_account(&acc).unwrap_err();
        assert_eq!(err.code, ErrorCode::DigitsOnly);
        assert_eq!(err.field, Some("bik"));
    }
}
