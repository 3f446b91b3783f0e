use serde::{Deserialize, Serialize};

/// One raw record from the uploaded file, untyped and untrusted. Echoed
/// back verbatim inside `RowError` so callers can fix rejected rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub group: Option<String>,
}

/// A row that passed validation. Invariant: `name` is trimmed and
/// non-empty; `email` and `group` are trimmed when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContact {
    pub name: String,
    pub email: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub data: ImportRow,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRow {
    pub row: usize,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedFriend {
    pub name: String,
    pub email: Option<String>,
    pub group: Option<String>,
}

/// Aggregate result of one import call. Serialized as the JSON body of the
/// import endpoint; missing email/group come out as explicit nulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub success: bool,
    pub total_rows: usize,
    pub successful_imports: usize,
    pub errors: Vec<RowError>,
    pub duplicates: Vec<DuplicateRow>,
    pub imported_friends: Vec<ImportedFriend>,
}
