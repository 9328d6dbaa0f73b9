use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

use crate::{
    models::{CheckIn, CheckInStatus, CheckInSubmission, NewCheckIn},
    store::{CheckInStore, StoreError},
};

#[derive(Debug, Error)]
pub enum CheckInError {
    #[error("invalid check-in: {}", .0.join(" "))]
    Validation(Vec<String>),
    #[error("check-in store failure: {0}")]
    Persistence(#[from] StoreError),
}

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Walk-in queue operations. Each call issues exactly one store call.
#[derive(Clone)]
pub struct CheckInService {
    store: Arc<dyn CheckInStore>,
    clock: Clock,
}

impl CheckInService {
    pub fn new(store: Arc<dyn CheckInStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    pub fn with_clock(store: Arc<dyn CheckInStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    // Stores keep microseconds; truncating here keeps returned records equal to listed ones.
    fn now(&self) -> DateTime<Utc> {
        (self.clock)().trunc_subsecs(6)
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub async fn create(&self, submission: CheckInSubmission) -> Result<CheckIn, CheckInError> {
        let check_in = validate(submission, self.now())?;
        Ok(self.store.insert(check_in).await?)
    }

    pub async fn list(&self) -> Result<Vec<CheckIn>, CheckInError> {
        Ok(self.store.list_recent_first().await?)
    }

    /// Moves a check-in to `in-progress` and stamps the service start.
    ///
    /// Not guarded against re-entry: starting an in-progress check-in again
    /// overwrites its start time. An unknown id is a silent no-op.
    pub async fn start(&self, id: &str) -> Result<(), CheckInError> {
        self.store
            .update_status(id, CheckInStatus::InProgress, Some(self.now()))
            .await?;
        Ok(())
    }

    /// Marks a check-in `completed`, leaving its service start time as is.
    pub async fn complete(&self, id: &str) -> Result<(), CheckInError> {
        self.store
            .update_status(id, CheckInStatus::Completed, None)
            .await?;
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> Result<(), CheckInError> {
        self.store.delete(id).await?;
        Ok(())
    }

    pub async fn health(&self) -> Result<(), CheckInError> {
        Ok(self.store.health_check().await?)
    }

    pub async fn close(&self) {
        self.store.close().await;
    }
}

fn validate(submission: CheckInSubmission, now: DateTime<Utc>) -> Result<NewCheckIn, CheckInError> {
    let mut errors = Vec::new();
    let barber_name = required(submission.barber_name, "Please choose a barber.", &mut errors);
    let client_name = required(submission.client_name, "Client name is required.", &mut errors);
    let client_number = required(
        submission.client_number,
        "Client phone number is required.",
        &mut errors,
    );
    let haircut_type = required(
        submission.haircut_type,
        "Please choose a haircut type.",
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(CheckInError::Validation(errors));
    }

    Ok(NewCheckIn {
        barber_name,
        client_name,
        client_number,
        haircut_type,
        check_in_time: now,
    })
}

fn required(value: Option<String>, message: &str, errors: &mut Vec<String>) -> String {
    let value = value.unwrap_or_default();
    if value.trim().is_empty() {
        errors.push(message.to_string());
    }
    value
}
