//! Beneficiary records: create, list, delete.
//!
//! Each operation is a single parameterized statement against the `users` table.

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod store;

pub use store::{PgUserStore, UserStore};
