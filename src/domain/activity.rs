use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub core_value_id: Option<String>,
    pub duration_minutes: Option<i64>,
    pub created_at: DateTime<Utc>,
}
