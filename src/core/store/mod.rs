//! Credential store backends.
//!
//! ## Backends
//! - `rest` — hosted PostgREST table
//! - `memory` — in-process list, optionally seeded with demo rows

use crate::models::credential::{Credential, CredentialFields};
use async_trait::async_trait;

pub mod error;
pub mod memory;
pub mod rest;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use rest::{RestStore, RestStoreConfig};

/// Remote credential table operations. No delete, no partial patch.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// All credentials, newest first.
    async fn list(&self) -> Result<Vec<Credential>, StoreError>;

    /// Insert a new row and return it as stored (with its id).
    async fn insert(&self, fields: &CredentialFields) -> Result<Credential, StoreError>;

    /// Overwrite every editable field of the row with `id`.
    async fn update(&self, id: &str, fields: &CredentialFields) -> Result<(), StoreError>;
}
