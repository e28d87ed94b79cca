//! In-memory storage backing the API server
//!
//! Process-local implementations of the `taskboard-core` storage traits.
//! Each operation takes a single lock, so the check-and-insert in
//! `insert_if_absent` is atomic and a completed write is visible to every
//! subsequent read.

use async_trait::async_trait;
use std::collections::HashMap;
use taskboard_core::{Account, AccountStore, StoreError, TaskPatch, TaskRecord, TaskStore};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Account storage keyed by normalized email.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert_if_absent(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Err(StoreError::Conflict);
        }
        accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email).cloned())
    }
}

/// Task record storage keyed by record id.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, TaskRecord>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, record: TaskRecord) -> Result<TaskRecord, StoreError> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<TaskRecord>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut all: Vec<TaskRecord> = tasks.values().cloned().collect();
        all.sort_by_key(|t| t.created_at);
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TaskRecord>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, patch: TaskPatch) -> Result<TaskRecord, StoreError> {
        let mut tasks = self.tasks.write().await;
        let record = tasks.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(task) = patch.task {
            record.task = task;
        }
        if let Some(role) = patch.role {
            record.role = Some(role);
        }
        if let Some(status) = patch.status {
            record.status = Some(status);
        }

        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        tasks.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_if_absent_rejects_duplicates() {
        let store = MemoryAccountStore::new();
        let first = Account::new("A".into(), "a@x.com".into(), "h1".into());
        let second = Account::new("B".into(), "a@x.com".into(), "h2".into());

        store.insert_if_absent(first).await.unwrap();
        let result = store.insert_if_absent(second).await;
        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[tokio::test]
    async fn insert_is_immediately_visible() {
        let store = MemoryAccountStore::new();
        let account = Account::new("A".into(), "a@x.com".into(), "h".into());
        let id = account.id;

        store.insert_if_absent(account).await.unwrap();
        let found = store.find_by_email("a@x.com").await.unwrap();
        assert_eq!(found.unwrap().id, id);
    }

    #[tokio::test]
    async fn concurrent_inserts_produce_exactly_one_winner() {
        let store = std::sync::Arc::new(MemoryAccountStore::new());

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let account =
                    Account::new(format!("A{i}"), "race@x.com".into(), "h".into());
                store.insert_if_absent(account).await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn update_patches_only_provided_fields() {
        let store = MemoryTaskStore::new();
        let record = TaskRecord::new(
            "A".into(),
            "write docs".into(),
            Some("author".into()),
            None,
        );
        let id = record.id;
        store.insert(record).await.unwrap();

        let patch = TaskPatch {
            status: Some("done".into()),
            ..Default::default()
        };
        let updated = store.update_by_id(id, patch).await.unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.task, "write docs");
        assert_eq!(updated.role.as_deref(), Some("author"));
        assert_eq!(updated.status.as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn update_and_delete_of_unknown_id_are_not_found() {
        let store = MemoryTaskStore::new();
        let id = Uuid::new_v4();

        let update = store.update_by_id(id, TaskPatch::default()).await;
        assert!(matches!(update, Err(StoreError::NotFound)));

        let delete = store.delete_by_id(id).await;
        assert!(matches!(delete, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn list_returns_records_in_creation_order() {
        let store = MemoryTaskStore::new();
        for i in 0..3 {
            store
                .insert(TaskRecord::new(
                    format!("N{i}"),
                    format!("task number {i}"),
                    None,
                    None,
                ))
                .await
                .unwrap();
        }

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }
}
