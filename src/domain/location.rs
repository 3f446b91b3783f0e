use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub address: Option<String>,
}
