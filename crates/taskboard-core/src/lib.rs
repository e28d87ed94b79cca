//! Taskboard Core - Domain models, storage traits, and shared types
//!
//! This crate defines the abstractions shared across the Taskboard system:
//! - Account and task record models
//! - Storage traits the API server programs against
//! - Configuration management

pub mod config;
pub mod store;

pub use config::{AppConfig, AuthConfig, ConfigError, LoggingConfig, ServerConfig};
pub use store::{AccountStore, StoreError, TaskPatch, TaskStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Account
// ============================================================================

/// A registered user account.
///
/// The email is stored in normalized (lowercase) form and is unique across
/// all accounts. The password hash is an Argon2id PHC string produced by the
/// API server's password hasher; it is never serialized into responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier, assigned at creation
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized (lowercase) email address, unique
    pub email: String,

    /// Salted one-way password hash (PHC string format)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh id.
    ///
    /// The caller is responsible for normalizing the email and hashing the
    /// password before construction.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// TaskRecord
// ============================================================================

/// A task record, the resource protected by the authentication gate.
///
/// All text fields are free-form; the only constraint is the description
/// length (4-250), enforced at the request boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Unique record identifier
    pub id: Uuid,

    /// Name of the person the task belongs to
    pub name: String,

    /// Task description
    pub task: String,

    /// Role of the assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Current status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Create a new task record with a fresh id.
    pub fn new(name: String, task: String, role: Option<String>, status: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            task,
            role,
            status,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_password_hash_is_never_serialized() {
        let account = Account::new(
            "Test User".to_string(),
            "test@example.com".to_string(),
            "$argon2id$v=19$m=65536,t=3,p=4$abc$def".to_string(),
        );

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("test@example.com"));
    }

    #[test]
    fn new_accounts_get_distinct_ids() {
        let a = Account::new("A".into(), "a@x.com".into(), "h".into());
        let b = Account::new("B".into(), "b@x.com".into(), "h".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn task_record_optional_fields_are_omitted_when_absent() {
        let task = TaskRecord::new("A".into(), "write docs".into(), None, None);
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("role"));
        assert!(!json.contains("status"));
    }
}
