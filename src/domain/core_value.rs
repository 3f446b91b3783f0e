use serde::{Deserialize, Serialize};

/// A personal value that activities can be tagged with ("Connection",
/// "Health", ...). Position drives display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreValue {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub position: i64,
}
