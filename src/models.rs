use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_IN_PROGRESS: &str = "in-progress";
pub const STATUS_COMPLETED: &str = "completed";

/// Lifecycle stage of a check-in. `Pending` is initial, `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckInStatus {
    Pending,
    InProgress,
    Completed,
}

impl CheckInStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckInStatus::Pending => STATUS_PENDING,
            CheckInStatus::InProgress => STATUS_IN_PROGRESS,
            CheckInStatus::Completed => STATUS_COMPLETED,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            STATUS_PENDING => Some(CheckInStatus::Pending),
            STATUS_IN_PROGRESS => Some(CheckInStatus::InProgress),
            STATUS_COMPLETED => Some(CheckInStatus::Completed),
            _ => None,
        }
    }
}

/// A persisted walk-in check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    pub barber_name: String,
    pub client_name: String,
    pub client_number: String,
    pub haircut_type: String,
    pub check_in_time: DateTime<Utc>,
    pub status: CheckInStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_start_time: Option<DateTime<Utc>>,
}

/// Raw check-in request as posted by the form or a JSON client.
///
/// Every field is optional here so a missing field is reported as a
/// validation error instead of a body decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSubmission {
    pub barber_name: Option<String>,
    pub client_name: Option<String>,
    pub client_number: Option<String>,
    pub haircut_type: Option<String>,
}

/// Validated check-in waiting for the store to assign an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckIn {
    pub barber_name: String,
    pub client_name: String,
    pub client_number: String,
    pub haircut_type: String,
    pub check_in_time: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CheckInRow {
    pub id: String,
    pub barber_name: String,
    pub client_name: String,
    pub client_number: String,
    pub haircut_type: String,
    pub check_in_time: String,
    pub status: String,
    pub service_start_time: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct BarberOption {
    pub id: &'static str,
    pub name: &'static str,
}

pub fn barber_roster() -> Vec<BarberOption> {
    vec![
        BarberOption { id: "jelo", name: "Jelo" },
        BarberOption { id: "vince", name: "Vince" },
        BarberOption { id: "xavier", name: "Xavier" },
        BarberOption { id: "gonzo", name: "Gonzo" },
        BarberOption { id: "cesar", name: "Cesar" },
        BarberOption { id: "jblurry", name: "Jblurry" },
    ]
}

pub fn haircut_catalog() -> Vec<&'static str> {
    vec![
        "Fade",
        "Taper",
        "Buzz Cut",
        "Scissor Cut",
        "Line-Up",
        "Beard Trim",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values_match_parse() {
        for status in [
            CheckInStatus::Pending,
            CheckInStatus::InProgress,
            CheckInStatus::Completed,
        ] {
            assert_eq!(CheckInStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().to_string()));
        }
        assert_eq!(CheckInStatus::parse("accepted"), None);
    }

    #[test]
    fn submission_reads_camel_case_and_tolerates_missing_fields() {
        let submission: CheckInSubmission =
            serde_json::from_str(r#"{"barberName":"Jelo","clientName":"Sam"}"#).unwrap();
        assert_eq!(submission.barber_name.as_deref(), Some("Jelo"));
        assert_eq!(submission.client_name.as_deref(), Some("Sam"));
        assert!(submission.client_number.is_none());
        assert!(submission.haircut_type.is_none());
    }

    #[test]
    fn check_in_omits_unset_service_start_time() {
        let check_in = CheckIn {
            id: "abc".to_string(),
            barber_name: "Jelo".to_string(),
            client_name: "Sam".to_string(),
            client_number: "555-0100".to_string(),
            haircut_type: "fade".to_string(),
            check_in_time: Utc::now(),
            status: CheckInStatus::Pending,
            service_start_time: None,
        };
        let json = serde_json::to_value(&check_in).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["clientNumber"], "555-0100");
        assert!(json.get("serviceStartTime").is_none());
    }
}
