use crate::domain::error::{AppError, Result};
use crate::domain::friend::{FriendSource, NewFriend};
use crate::domain::import::{
    DuplicateRow, ImportOutcome, ImportRow, ImportedFriend, RowError, ValidatedContact,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Note attached to every friend row created by the importer, so
/// import-created rows stay distinguishable from manually created ones.
pub const IMPORT_PROVENANCE_NOTE: &str = "Imported from CSV";

const ERROR_NAME_REQUIRED: &str = "Name is required and cannot be empty";
const REASON_ALREADY_EXISTS: &str = "Friend with this name already exists";
const REASON_IN_BATCH: &str = "Duplicate name within import file";

/// Storage seam for the importer: one read of existing names, at most one
/// bulk write per batch.
#[async_trait]
pub trait FriendStore {
    async fn list_names(&self, user_id: &str) -> Result<Vec<String>>;

    /// Inserts all rows in a single statement and returns the number of
    /// rows the store actually created.
    async fn bulk_insert(&self, user_id: &str, friends: &[NewFriend]) -> Result<u64>;
}

/// Validates one raw record. Pure; no I/O.
///
/// `name` must have non-whitespace content after trimming. `email` and
/// `group` are optional: blank values are treated as absent, never as
/// errors.
fn validate_row(row: &ImportRow) -> std::result::Result<ValidatedContact, String> {
    let name = row
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ERROR_NAME_REQUIRED.to_string())?;

    Ok(ValidatedContact {
        name: name.to_string(),
        email: optional_trimmed(row.email.as_deref()),
        group: optional_trimmed(row.group.as_deref()),
    })
}

fn optional_trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

enum Classification {
    Accepted,
    Duplicate(&'static str),
}

/// Decides whether a validated contact collides with persisted state or
/// with an earlier row in the same batch, in that precedence order.
/// Comparison is case-insensitive on the trimmed name. An existing-store
/// collision never touches the batch set, so later repeats of the same
/// name keep reporting "already exists" rather than "within import file".
fn classify(
    contact: &ValidatedContact,
    existing: &HashSet<String>,
    batch: &mut HashSet<String>,
) -> Classification {
    let folded = contact.name.to_lowercase();

    if existing.contains(&folded) {
        return Classification::Duplicate(REASON_ALREADY_EXISTS);
    }
    if batch.contains(&folded) {
        return Classification::Duplicate(REASON_IN_BATCH);
    }

    batch.insert(folded);
    Classification::Accepted
}

pub struct ContactImportUseCase {
    store: Arc<dyn FriendStore + Send + Sync>,
}

impl ContactImportUseCase {
    pub fn new(store: Arc<dyn FriendStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Runs one import batch for `user_id`.
    ///
    /// Per-row problems are collected into the outcome and never abort the
    /// loop; only empty input and store failures surface as call errors.
    /// Side effects: one read of existing names, at most one bulk insert.
    pub async fn execute(&self, user_id: &str, rows: Vec<ImportRow>) -> Result<ImportOutcome> {
        if rows.is_empty() {
            return Err(AppError::ValidationError(
                "Import file contains no data rows".to_string(),
            ));
        }

        let existing: HashSet<String> = self
            .store
            .list_names(user_id)
            .await?
            .into_iter()
            .map(|name| name.trim().to_lowercase())
            .collect();

        let total_rows = rows.len();
        let mut batch: HashSet<String> = HashSet::new();
        let mut errors: Vec<RowError> = Vec::new();
        let mut duplicates: Vec<DuplicateRow> = Vec::new();
        let mut queued: Vec<NewFriend> = Vec::new();

        for (index, raw) in rows.into_iter().enumerate() {
            let row = index + 1;

            let contact = match validate_row(&raw) {
                Ok(contact) => contact,
                Err(error) => {
                    errors.push(RowError {
                        row,
                        data: raw,
                        error,
                    });
                    continue;
                }
            };

            match classify(&contact, &existing, &mut batch) {
                Classification::Duplicate(reason) => duplicates.push(DuplicateRow {
                    row,
                    name: contact.name,
                    reason: reason.to_string(),
                }),
                Classification::Accepted => queued.push(NewFriend {
                    name: contact.name,
                    email: contact.email,
                    group: contact.group,
                    notes: Some(IMPORT_PROVENANCE_NOTE.to_string()),
                    source: FriendSource::CsvImport,
                }),
            }
        }

        // Trust the store's reported count, not the queued length.
        let successful_imports = if queued.is_empty() {
            0
        } else {
            self.store.bulk_insert(user_id, &queued).await? as usize
        };

        let imported_friends = queued
            .into_iter()
            .map(|friend| ImportedFriend {
                name: friend.name,
                email: friend.email,
                group: friend.group,
            })
            .collect();

        Ok(ImportOutcome {
            success: successful_imports > 0,
            total_rows,
            successful_imports,
            errors,
            duplicates,
            imported_friends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FakeStore {
        names: Mutex<Vec<String>>,
        inserted: Mutex<Vec<NewFriend>>,
    }

    impl FakeStore {
        fn with_names(names: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                names: Mutex::new(names.iter().map(|n| n.to_string()).collect()),
                inserted: Mutex::new(Vec::new()),
            })
        }

        fn empty() -> Arc<Self> {
            Self::with_names(&[])
        }
    }

    #[async_trait]
    impl FriendStore for FakeStore {
        async fn list_names(&self, _user_id: &str) -> Result<Vec<String>> {
            Ok(self.names.lock().unwrap().clone())
        }

        async fn bulk_insert(&self, _user_id: &str, friends: &[NewFriend]) -> Result<u64> {
            let mut names = self.names.lock().unwrap();
            for friend in friends {
                names.push(friend.name.clone());
            }
            self.inserted.lock().unwrap().extend_from_slice(friends);
            Ok(friends.len() as u64)
        }
    }

    fn row(name: &str) -> ImportRow {
        ImportRow {
            name: Some(name.to_string()),
            ..ImportRow::default()
        }
    }

    fn row_full(name: &str, email: &str, group: &str) -> ImportRow {
        ImportRow {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            group: Some(group.to_string()),
        }
    }

    #[test]
    fn validate_trims_optional_fields() {
        let contact = validate_row(&ImportRow {
            name: Some("  Lee ".to_string()),
            email: Some(" lee@x.com ".to_string()),
            group: Some("   ".to_string()),
        })
        .unwrap();

        assert_eq!(contact.name, "Lee");
        assert_eq!(contact.email.as_deref(), Some("lee@x.com"));
        assert_eq!(contact.group, None);
    }

    #[test]
    fn validate_rejects_whitespace_name() {
        let err = validate_row(&row("   ")).unwrap_err();
        assert_eq!(err, ERROR_NAME_REQUIRED);

        let err = validate_row(&ImportRow::default()).unwrap_err();
        assert_eq!(err, ERROR_NAME_REQUIRED);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_any_work() {
        let store = FakeStore::empty();
        let importer = ContactImportUseCase::new(store.clone());

        let err = importer.execute("u1", Vec::new()).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn case_insensitive_existing_collision() {
        let store = FakeStore::with_names(&["ann lee"]);
        let importer = ContactImportUseCase::new(store);

        let outcome = importer
            .execute("u1", vec![row("Ann Lee")])
            .await
            .unwrap();

        assert_eq!(outcome.successful_imports, 0);
        assert!(!outcome.success);
        assert_eq!(outcome.duplicates.len(), 1);
        assert_eq!(
            outcome.duplicates[0].reason,
            "Friend with this name already exists"
        );
    }

    #[tokio::test]
    async fn in_batch_duplicate_uses_distinct_reason() {
        let store = FakeStore::empty();
        let importer = ContactImportUseCase::new(store.clone());

        let outcome = importer
            .execute("u1", vec![row("Sam"), row("sam")])
            .await
            .unwrap();

        assert_eq!(outcome.successful_imports, 1);
        assert_eq!(outcome.duplicates.len(), 1);
        assert_eq!(outcome.duplicates[0].row, 2);
        assert_eq!(outcome.duplicates[0].reason, "Duplicate name within import file");
        assert_eq!(store.inserted.lock().unwrap()[0].name, "Sam");
    }

    #[tokio::test]
    async fn existing_collision_wins_over_in_batch_repeat() {
        // A name already in the store keeps reporting "already exists"
        // even when the batch repeats it.
        let store = FakeStore::with_names(&["Pat"]);
        let importer = ContactImportUseCase::new(store);

        let outcome = importer
            .execute("u1", vec![row("Pat"), row("pat")])
            .await
            .unwrap();

        assert_eq!(outcome.duplicates.len(), 2);
        for duplicate in &outcome.duplicates {
            assert_eq!(duplicate.reason, "Friend with this name already exists");
        }
    }

    #[tokio::test]
    async fn optional_fields_default_to_null_markers() {
        let store = FakeStore::empty();
        let importer = ContactImportUseCase::new(store.clone());

        let outcome = importer.execute("u1", vec![row("Lee")]).await.unwrap();

        assert_eq!(outcome.imported_friends.len(), 1);
        assert_eq!(outcome.imported_friends[0].email, None);
        assert_eq!(outcome.imported_friends[0].group, None);

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(inserted[0].source, FriendSource::CsvImport);
        assert_eq!(inserted[0].notes.as_deref(), Some(IMPORT_PROVENANCE_NOTE));
    }

    #[tokio::test]
    async fn mixed_batch_scenario() {
        let store = FakeStore::empty();
        let importer = ContactImportUseCase::new(store);

        let outcome = importer
            .execute(
                "u1",
                vec![
                    row("Al"),
                    row(""),
                    row("Al"),
                    row_full("Bo", "bo@x.com", ""),
                ],
            )
            .await
            .unwrap();

        assert_eq!(outcome.total_rows, 4);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].row, 2);
        assert_eq!(outcome.duplicates.len(), 1);
        assert_eq!(outcome.duplicates[0].row, 3);
        assert_eq!(outcome.duplicates[0].name, "Al");
        assert_eq!(outcome.successful_imports, 2);
        assert!(outcome.success);
        assert_eq!(outcome.imported_friends[0].name, "Al");
        assert_eq!(outcome.imported_friends[0].email, None);
        assert_eq!(outcome.imported_friends[1].name, "Bo");
        assert_eq!(outcome.imported_friends[1].email.as_deref(), Some("bo@x.com"));
        assert_eq!(outcome.imported_friends[1].group, None);
    }

    #[tokio::test]
    async fn reimport_of_same_batch_is_all_duplicates() {
        let store = FakeStore::empty();
        let importer = ContactImportUseCase::new(store);

        let batch = vec![row("Al"), row("Bo"), row("Cy")];
        let first = importer.execute("u1", batch.clone()).await.unwrap();
        assert_eq!(first.successful_imports, 3);

        let second = importer.execute("u1", batch).await.unwrap();
        assert_eq!(second.successful_imports, 0);
        assert!(!second.success);
        assert_eq!(second.duplicates.len(), 3);
        for duplicate in &second.duplicates {
            assert_eq!(duplicate.reason, "Friend with this name already exists");
        }
    }

    #[tokio::test]
    async fn errors_and_duplicates_preserve_input_order() {
        let store = FakeStore::with_names(&["known"]);
        let importer = ContactImportUseCase::new(store);

        let outcome = importer
            .execute(
                "u1",
                vec![
                    row("known"),
                    row(" "),
                    row("new"),
                    row("NEW"),
                    row(""),
                    row("Known"),
                ],
            )
            .await
            .unwrap();

        let error_rows: Vec<usize> = outcome.errors.iter().map(|e| e.row).collect();
        let duplicate_rows: Vec<usize> = outcome.duplicates.iter().map(|d| d.row).collect();
        assert_eq!(error_rows, vec![2, 5]);
        assert_eq!(duplicate_rows, vec![1, 4, 6]);

        // Partition totality: every row lands in exactly one bucket.
        assert_eq!(
            outcome.errors.len() + outcome.duplicates.len() + outcome.successful_imports,
            outcome.total_rows
        );
    }

    #[tokio::test]
    async fn validation_errors_echo_original_data() {
        let store = FakeStore::empty();
        let importer = ContactImportUseCase::new(store);

        let bad = ImportRow {
            name: Some("  ".to_string()),
            email: Some("x@y.z".to_string()),
            group: None,
        };
        let outcome = importer.execute("u1", vec![bad.clone()]).await.unwrap();

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].data, bad);
        assert_eq!(outcome.errors[0].error, ERROR_NAME_REQUIRED);
    }

    #[test]
    fn outcome_serializes_with_camel_case_and_nulls() {
        let outcome = ImportOutcome {
            success: true,
            total_rows: 1,
            successful_imports: 1,
            errors: Vec::new(),
            duplicates: Vec::new(),
            imported_friends: vec![ImportedFriend {
                name: "Lee".to_string(),
                email: None,
                group: None,
            }],
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["totalRows"], 1);
        assert_eq!(json["successfulImports"], 1);
        assert!(json["importedFriends"][0]["email"].is_null());
        assert!(json["importedFriends"][0]["group"].is_null());
    }
}
