//! Person record validation

use chrono::NaiveDate;
use shared::error::{ErrorCode, ValidationError, ValidationResult};
use shared::models::PersonDraft;

use crate::core::Policy;

/// Validate a person draft before it is materialized.
///
/// A deceased's last name is required unless the submitter explicitly
/// confirmed it is unknown. Dates must be plausible: birth before
/// today, death not after today, birth not after death and not more
/// than the maximum lifespan before it.
pub fn validate_person(draft: &PersonDraft, policy: &Policy, today: NaiveDate) -> ValidationResult {
    if draft.last_name.trim().is_empty() && !draft.skip_last_name {
        return Err(ValidationError::on_field(ErrorCode::NameRequired, "last_name"));
    }
    if let Some(birth) = draft.birth_date {
        if birth >= today {
            return Err(ValidationError::on_field(
                ErrorCode::BirthDateInFuture,
                "birth_date",
            ));
        }
    }
    if let Some(death) = draft.death_date {
        if death > today {
            return Err(ValidationError::on_field(
                ErrorCode::DeathDateInFuture,
                "death_date",
            ));
        }
    }
    if let (Some(birth), Some(death)) = (draft.birth_date, draft.death_date) {
        if birth > death {
            return Err(ValidationError::on_field(
                ErrorCode::BirthAfterDeath,
                "birth_date",
            ));
        }
        if death - birth > Policy::window_days(policy.max_lifespan_years) {
            return Err(ValidationError::on_field(
                ErrorCode::LifespanExceeded,
                "birth_date",
            ));
        }
    }
    if let Some(doc) = &draft.identity_document {
        if let Some(issued) = doc.issue_date {
            if issued > today {
                return Err(ValidationError::on_field(
                    ErrorCode::DocumentDateInFuture,
                    "identity_document",
                ));
            }
        }
    }
    if let Some(cert) = &draft.death_certificate {
        if let Some(released) = cert.release_date {
            if released > today {
                return Err(ValidationError::on_field(
                    ErrorCode::DocumentDateInFuture,
                    "death_certificate",
                ));
            }
            if let Some(death) = draft.death_date {
                if released < death {
                    return Err(ValidationError::on_field(
                        ErrorCode::ReleaseBeforeDeath,
                        "death_certificate",
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DeathCertificate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn draft() -> PersonDraft {
        PersonDraft::named("Иванов", "Пётр", "Сергеевич")
    }

    #[test]
    fn test_last_name_required_unless_skipped() {
        let policy = Policy::default();
        let mut p = PersonDraft::default();
        let err = validate_person(&p, &policy, today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NameRequired);

        p.skip_last_name = true;
        assert!(validate_person(&p, &policy, today()).is_ok());
    }

    #[test]
    fn test_birth_must_precede_today() {
        let mut p = draft();
        p.birth_date = Some(today());
        let err = validate_person(&p, &Policy::default(), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BirthDateInFuture);
    }

    #[test]
    fn test_death_not_after_today() {
        let mut p = draft();
        p.death_date = Some(d(2026, 9, 1));
        let err = validate_person(&p, &Policy::default(), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DeathDateInFuture);
    }

    #[test]
    fn test_birth_after_death() {
        let mut p = draft();
        p.birth_date = Some(d(2000, 1, 1));
        p.death_date = Some(d(1999, 1, 1));
        let err = validate_person(&p, &Policy::default(), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BirthAfterDeath);
    }

    #[test]
    fn test_lifespan_cap() {
        let mut p = draft();
        p.birth_date = Some(d(1850, 1, 1));
        p.death_date = Some(d(2020, 1, 1));
        let err = validate_person(&p, &Policy::default(), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::LifespanExceeded);

        p.birth_date = Some(d(1920, 1, 1));
        assert!(validate_person(&p, &Policy::default(), today()).is_ok());
    }

    #[test]
    fn test_certificate_release_before_death() {
        let mut p = draft();
        p.death_date = Some(d(2020, 5, 10));
        p.death_certificate = Some(DeathCertificate {
            number: "1234".to_string(),
            series: None,
            release_date: Some(d(2020, 5, 1)),
            registry_office: None,
        });
        let err = validate_person(&p, &Policy::default(), today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReleaseBeforeDeath);
    }
}
