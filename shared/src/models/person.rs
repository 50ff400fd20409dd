//! Person Model

use crate::models::document::{DeathCertificate, IdentityDocument};
use crate::types::PersonId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Person entity (deceased, customer or responsible individual)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    /// Free-form address line
    pub address: Option<String>,
    /// Identity document of a customer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_document: Option<IdentityDocument>,
    /// Death certificate of a deceased
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_certificate: Option<DeathCertificate>,
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Whether the record carries a usable last name
    pub fn filled(&self) -> bool {
        !self.last_name.trim().is_empty()
    }

    /// "И.О." style initials
    pub fn initials(&self) -> String {
        let mut initials = String::new();
        if let Some(c) = self.first_name.chars().next() {
            initials.push(c.to_uppercase().next().unwrap_or(c));
            initials.push('.');
            if let Some(c) = self.middle_name.chars().next() {
                initials.push(c.to_uppercase().next().unwrap_or(c));
                initials.push('.');
            }
        }
        initials
    }

    /// "Фамилия И.О." display form
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.initials())
            .trim()
            .to_string()
    }

    /// Key used for duplicate detection: full name plus birth and
    /// death dates, case-insensitive on the names.
    pub fn duplicate_key(&self) -> PersonKey {
        PersonKey {
            last_name: self.last_name.to_lowercase(),
            first_name: self.first_name.to_lowercase(),
            middle_name: self.middle_name.to_lowercase(),
            birth_date: self.birth_date,
            death_date: self.death_date,
        }
    }
}

/// Duplicate-detection key for a person
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonKey {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
}

/// Create/update person payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonDraft {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub address: Option<String>,
    #[serde(default)]
    pub identity_document: Option<IdentityDocument>,
    #[serde(default)]
    pub death_certificate: Option<DeathCertificate>,
    /// Explicit confirmation that the last name is unknown
    #[serde(default)]
    pub skip_last_name: bool,
}

impl PersonDraft {
    pub fn named(last: &str, first: &str, middle: &str) -> Self {
        Self {
            last_name: last.to_string(),
            first_name: first.to_string(),
            middle_name: middle.to_string(),
            ..Self::default()
        }
    }
}

/// Reference to a person in a submission: an existing record or a new
/// draft to be created on acceptance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonRef {
    Existing(PersonId),
    New(PersonDraft),
}
