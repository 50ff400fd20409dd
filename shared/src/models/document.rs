//! Paperwork Models
//!
//! Identity documents, death certificates and powers of attorney
//! (doverennosti) attached to persons and organization agents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity document of a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDocument {
    /// Document type name ("паспорт" etc.)
    pub doc_type: String,
    pub series: Option<String>,
    pub number: String,
    /// Issuing authority
    pub issuer: Option<String>,
    pub issue_date: Option<NaiveDate>,
}

/// Death certificate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathCertificate {
    pub number: String,
    pub series: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Issuing civil registry office (ЗАГС)
    pub registry_office: Option<String>,
}

/// Power of attorney authorizing an agent to act for an organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doverennost {
    pub number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expire_date: Option<NaiveDate>,
}

impl Doverennost {
    /// Whether all fields required for a non-archival burial are set
    pub fn is_complete(&self) -> bool {
        self.number.is_some() && self.issue_date.is_some() && self.expire_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doverennost_completeness() {
        let mut d = Doverennost::default();
        assert!(!d.is_complete());
        d.number = Some("77 АБ 123456".to_string());
        d.issue_date = NaiveDate::from_ymd_opt(2024, 1, 10);
        assert!(!d.is_complete());
        d.expire_date = NaiveDate::from_ymd_opt(2027, 1, 10);
        assert!(d.is_complete());
    }
}
