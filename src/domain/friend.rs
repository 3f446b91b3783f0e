use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a friend record entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendSource {
    Manual,
    CsvImport,
}

impl FriendSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendSource::Manual => "manual",
            FriendSource::CsvImport => "csv_import",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "csv_import" => FriendSource::CsvImport,
            _ => FriendSource::Manual,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub group: Option<String>,
    pub notes: Option<String>,
    pub source: FriendSource,
    pub created_at: DateTime<Utc>,
}

/// A friend row queued for insertion, before it has an id.
#[derive(Debug, Clone)]
pub struct NewFriend {
    pub name: String,
    pub email: Option<String>,
    pub group: Option<String>,
    pub notes: Option<String>,
    pub source: FriendSource,
}
