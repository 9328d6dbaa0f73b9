//! In-memory check-in store.
//!
//! Not durable: everything is lost when the process exits. Useful for local
//! runs without a database file and for tests. Reads share a read lock,
//! mutations take the write lock for the duration of one map operation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{new_id, CheckInStore, StoreError, StoreResult};
use crate::models::{CheckIn, CheckInStatus, NewCheckIn};

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, CheckIn>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Unavailable("store closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CheckInStore for MemoryStore {
    async fn insert(&self, check_in: NewCheckIn) -> StoreResult<CheckIn> {
        self.ensure_open()?;
        let record = CheckIn {
            id: new_id(),
            barber_name: check_in.barber_name,
            client_name: check_in.client_name,
            client_number: check_in.client_number,
            haircut_type: check_in.haircut_type,
            check_in_time: check_in.check_in_time,
            status: CheckInStatus::Pending,
            service_start_time: None,
        };
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn list_recent_first(&self) -> StoreResult<Vec<CheckIn>> {
        self.ensure_open()?;
        let mut items: Vec<CheckIn> = self.records.read().await.values().cloned().collect();
        items.sort_by(|a, b| {
            b.check_in_time
                .cmp(&a.check_in_time)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(items)
    }

    async fn update_status(
        &self,
        id: &str,
        status: CheckInStatus,
        service_start_time: Option<DateTime<Utc>>,
    ) -> StoreResult<()> {
        self.ensure_open()?;
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(id) {
            record.status = status;
            if service_start_time.is_some() {
                record.service_start_time = service_start_time;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.ensure_open()?;
        self.records.write().await.remove(id);
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::assert_store_contract;

    #[tokio::test]
    async fn satisfies_store_contract() {
        let store = MemoryStore::new();
        assert_store_contract(&store).await;
    }

    #[tokio::test]
    async fn rejects_calls_after_close() {
        let store = MemoryStore::new();
        store.close().await;
        assert!(matches!(
            store.list_recent_first().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.health_check().await.is_err());
    }
}
