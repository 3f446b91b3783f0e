use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    Invited,
    Confirmed,
    Declined,
}

impl ParticipationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationStatus::Invited => "invited",
            ParticipationStatus::Confirmed => "confirmed",
            ParticipationStatus::Declined => "declined",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "confirmed" => ParticipationStatus::Confirmed,
            "declined" => ParticipationStatus::Declined,
            _ => ParticipationStatus::Invited,
        }
    }
}

/// An invited friend's standing on one activity instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participation {
    pub id: String,
    pub instance_id: String,
    pub friend_id: String,
    pub status: ParticipationStatus,
    pub invited_at: DateTime<Utc>,
}

/// RSVP left by a guest who is not a tracked friend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicRsvp {
    pub id: String,
    pub instance_id: String,
    pub guest_name: String,
    pub attending: bool,
    pub created_at: DateTime<Utc>,
}
