use std::{fs, path::Path, str::FromStr};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{new_id, CheckInStore, StoreError, StoreResult};
use crate::models::{CheckIn, CheckInRow, CheckInStatus, NewCheckIn};

/// Durable check-in store backed by a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        if let Some(parent) = database_file(database_url).and_then(Path::parent) {
            fs::create_dir_all(parent)?;
        }

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and brings its schema up to date.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl CheckInStore for SqliteStore {
    async fn insert(&self, check_in: NewCheckIn) -> StoreResult<CheckIn> {
        let id = new_id();
        let status = CheckInStatus::Pending;

        sqlx::query(
            r#"INSERT INTO check_ins
               (id, barber_name, client_name, client_number, haircut_type, check_in_time, status, service_start_time)
               VALUES (?, ?, ?, ?, ?, ?, ?, NULL)"#,
        )
        .bind(&id)
        .bind(&check_in.barber_name)
        .bind(&check_in.client_name)
        .bind(&check_in.client_number)
        .bind(&check_in.haircut_type)
        .bind(format_timestamp(check_in.check_in_time))
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(CheckIn {
            id,
            barber_name: check_in.barber_name,
            client_name: check_in.client_name,
            client_number: check_in.client_number,
            haircut_type: check_in.haircut_type,
            check_in_time: check_in.check_in_time,
            status,
            service_start_time: None,
        })
    }

    async fn list_recent_first(&self) -> StoreResult<Vec<CheckIn>> {
        let rows = sqlx::query_as::<_, CheckInRow>(
            r#"SELECT id, barber_name, client_name, client_number, haircut_type,
                      check_in_time, status, service_start_time
               FROM check_ins
               ORDER BY check_in_time DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_check_in).collect()
    }

    async fn update_status(
        &self,
        id: &str,
        status: CheckInStatus,
        service_start_time: Option<DateTime<Utc>>,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"UPDATE check_ins
               SET status = ?, service_start_time = COALESCE(?, service_start_time)
               WHERE id = ?"#,
        )
        .bind(status.as_str())
        .bind(service_start_time.map(format_timestamp))
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM check_ins WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

/// Fixed-width UTC form so lexical order in SQLite equals chronological order.
fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(id: &str, value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| StoreError::Corrupt {
            id: id.to_string(),
            reason: format!("bad timestamp {value:?}: {err}"),
        })
}

fn row_to_check_in(row: CheckInRow) -> StoreResult<CheckIn> {
    let status = CheckInStatus::parse(&row.status).ok_or_else(|| StoreError::Corrupt {
        id: row.id.clone(),
        reason: format!("unknown status {:?}", row.status),
    })?;
    let check_in_time = parse_timestamp(&row.id, &row.check_in_time)?;
    let service_start_time = row
        .service_start_time
        .as_deref()
        .map(|value| parse_timestamp(&row.id, value))
        .transpose()?;

    Ok(CheckIn {
        id: row.id,
        barber_name: row.barber_name,
        client_name: row.client_name,
        client_number: row.client_number,
        haircut_type: row.haircut_type,
        check_in_time,
        status,
        service_start_time,
    })
}

/// On-disk file named by a SQLite URL, if any. `:memory:` and non-SQLite
/// URLs have none.
fn database_file(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let location = rest.split('?').next().unwrap_or_default();
    let location = location.strip_prefix("file:").unwrap_or(location);
    match location {
        "" | ":memory:" => None,
        file => Some(Path::new(file)),
    }
}
