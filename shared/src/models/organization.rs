//! Organization Model

use crate::models::document::Doverennost;
use crate::types::{AgentId, OrganizationId, PersonId};
use serde::{Deserialize, Serialize};

/// Organization entity (юридическое лицо)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    /// Short name
    pub name: String,
    pub full_name: Option<String>,
    pub inn: String,
    pub ogrn: String,
    pub kpp: String,
    /// Director; acts as agent when no separate agent is appointed
    pub ceo: Option<PersonId>,
    pub phone: Option<String>,
    pub bank_accounts: Vec<BankAccount>,
    pub agents: Vec<Agent>,
}

impl Organization {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.full_name.as_deref().unwrap_or(&self.name)
        } else {
            &self.name
        }
    }

    pub fn agent(&self, agent_id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }
}

/// Bank account details of an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    /// Settlement account (расчетный счет), digits only
    pub settlement_account: String,
    /// Correspondent account (корреспондентский счет), digits only
    pub correspondent_account: Option<String>,
    /// Bank identification code, digits only
    pub bik: Option<String>,
    pub bank_name: String,
}

/// Person authorized to act for an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub person_id: PersonId,
    pub organization_id: OrganizationId,
    pub doverennosti: Vec<Doverennost>,
}

/// Create/update organization payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationDraft {
    pub name: String,
    pub full_name: Option<String>,
    pub inn: String,
    pub ogrn: String,
    pub kpp: String,
    pub ceo: Option<PersonId>,
    pub phone: Option<String>,
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
    /// Explicit confirmation to register a duplicate INN
    #[serde(default)]
    pub allow_duplicate_inn: bool,
}
