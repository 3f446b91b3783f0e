use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Planned,
    Confirmed,
    Cancelled,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Planned => "planned",
            InstanceStatus::Confirmed => "confirmed",
            InstanceStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "confirmed" => InstanceStatus::Confirmed,
            "cancelled" => InstanceStatus::Cancelled,
            _ => InstanceStatus::Planned,
        }
    }
}

/// A dated occurrence of an activity on the owner's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityInstance {
    pub id: String,
    pub user_id: String,
    pub activity_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location_id: Option<String>,
    pub status: InstanceStatus,
    pub notes: Option<String>,
}
