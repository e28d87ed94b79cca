//! Storage traits consumed by the API server
//!
//! The persistence engine is a collaborator behind these traits. Whatever
//! backs them must provide per-record atomicity: `insert_if_absent` is the
//! authoritative uniqueness guard for account emails, and a completed insert
//! must be immediately visible to `find_by_email`.

use crate::{Account, TaskRecord};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The unique key is already taken
    #[error("record already exists for this key")]
    Conflict,

    /// No record with the requested id
    #[error("record not found")]
    NotFound,

    /// Backend failure (connection loss, timeout, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Partial update applied to a task record.
///
/// Fields left as `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub task: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// Account storage keyed by normalized email.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert the account if no account with its email exists.
    ///
    /// The check and the insert are a single atomic step; a concurrent
    /// insert with the same email surfaces as `StoreError::Conflict`, never
    /// as a second success.
    async fn insert_if_absent(&self, account: Account) -> Result<Account, StoreError>;

    /// Look up an account by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}

/// Task record storage keyed by record id.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new record.
    async fn insert(&self, record: TaskRecord) -> Result<TaskRecord, StoreError>;

    /// List all records.
    async fn list(&self) -> Result<Vec<TaskRecord>, StoreError>;

    /// Look up a record by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TaskRecord>, StoreError>;

    /// Apply a patch to the record with the given id.
    ///
    /// Returns `StoreError::NotFound` if no such record exists.
    async fn update_by_id(&self, id: Uuid, patch: TaskPatch) -> Result<TaskRecord, StoreError>;

    /// Delete the record with the given id.
    ///
    /// Returns `StoreError::NotFound` if no such record exists.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}
