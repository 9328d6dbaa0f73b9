use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{CheckIn, CheckInStatus, NewCheckIn};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// `DATABASE_URL` value that selects the non-durable in-memory backend.
pub const MEMORY_URL: &str = "memory://";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("corrupt check-in {id}: {reason}")]
    Corrupt { id: String, reason: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam for check-ins. Every method maps to exactly one store call.
///
/// Updates and deletes against an id with no matching record succeed without
/// touching anything.
#[async_trait]
pub trait CheckInStore: Send + Sync {
    /// Persists a new record and returns it with its store-assigned id.
    async fn insert(&self, check_in: NewCheckIn) -> StoreResult<CheckIn>;

    /// All records, newest `check_in_time` first, ties broken by id descending.
    async fn list_recent_first(&self) -> StoreResult<Vec<CheckIn>>;

    /// Sets `status`; `service_start_time` is only written when `Some`.
    async fn update_status(
        &self,
        id: &str,
        status: CheckInStatus,
        service_start_time: Option<DateTime<Utc>>,
    ) -> StoreResult<()>;

    async fn delete(&self, id: &str) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;

    async fn close(&self);

    fn backend_name(&self) -> &'static str;
}

/// Opens the backend selected by `database_url`.
pub async fn open(database_url: &str, max_connections: u32) -> StoreResult<Arc<dyn CheckInStore>> {
    if database_url == MEMORY_URL {
        log::warn!("Using the in-memory check-in store. Records are lost on restart.");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SqliteStore::connect(database_url, max_connections).await?;
    Ok(Arc::new(store))
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
