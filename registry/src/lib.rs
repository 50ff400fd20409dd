//! Cemetery registry engine
//!
//! Two cooperating rule-sets over a record store: the place allocator
//! (room capacity, occupancy counters, grave-slot sharing) and the
//! burial validator (account numbering, date and paperwork rules,
//! duplicate detection). The [`RegistryManager`] orchestrates
//! submissions: validate, persist, recount, publish domain events. The
//! outbox module exchanges flat JSON batches with peer registries.

pub mod allocator;
pub mod core;
pub mod manager;
pub mod numbering;
pub mod outbox;
pub mod store;
pub mod validator;

#[cfg(test)]
pub(crate) mod testutil;

pub use crate::core::{Config, Policy, RegistryError, RegistryResult};
pub use crate::manager::RegistryManager;
pub use crate::store::RegistryStore;
