//! Burial Operation Model

use serde::{Deserialize, Serialize};

/// Burial operation type
///
/// Enumerated variants with capability flags replace the legacy
/// string-typed operation table. The flags drive the allocator:
/// only [`Operation::Burial`] consumes room capacity; urn placements
/// and sub-burials share graves under their own rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// Full burial (захоронение) into its own grave
    #[default]
    Burial,
    /// Sub-burial (подзахоронение) into an existing grave
    Subburial,
    /// Urn placement
    UrnPlacement,
    /// Exhumation record
    Exhumation,
}

impl Operation {
    /// Whether the operation consumes a room of the place capacity
    pub fn occupies_room(&self) -> bool {
        matches!(self, Self::Burial)
    }

    /// Whether the operation is an urn placement
    pub fn is_urn(&self) -> bool {
        matches!(self, Self::UrnPlacement)
    }

    /// Whether the operation is an additional interment into an
    /// existing grave
    pub fn is_additional(&self) -> bool {
        matches!(self, Self::Subburial)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Burial => "full burial",
            Self::Subburial => "sub-burial",
            Self::UrnPlacement => "urn placement",
            Self::Exhumation => "exhumation",
        }
    }
}
