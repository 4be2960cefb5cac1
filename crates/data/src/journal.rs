//! Journal entries: `users/{uid}/journalEntries`.

use ascend_core::error::DataError;
use ascend_core::model::JournalEntry;
use ascend_core::store::Fields;
use chrono::Utc;
use crate::Repository;
use crate::paths::{self, JOURNAL_ENTRIES};

impl Repository {
    /// Create an entry, stamping `date` with now unless one is given.
    pub async fn create_journal_entry(
        &self,
        uid: &str,
        mut entry: JournalEntry,
    ) -> Result<String, DataError> {
        entry.date.get_or_insert_with(Utc::now);
        entry.owner_id = Some(uid.to_string());
        self.push_record(&paths::user_collection(uid, JOURNAL_ENTRIES)?, &entry)
            .await
    }

    pub async fn read_journal_entries(&self, uid: &str) -> Result<Vec<JournalEntry>, DataError> {
        self.read_collection(&paths::user_collection(uid, JOURNAL_ENTRIES)?)
            .await
    }

    pub async fn update_journal_entry(
        &self,
        uid: &str,
        entry_id: &str,
        fields: Fields,
    ) -> Result<(), DataError> {
        self.merge(&paths::user_record(uid, JOURNAL_ENTRIES, entry_id)?, fields)
            .await
    }

    pub async fn delete_journal_entry(&self, uid: &str, entry_id: &str) -> Result<(), DataError> {
        self.delete(&paths::user_record(uid, JOURNAL_ENTRIES, entry_id)?)
            .await
    }

    /// Entries whose title, text, or category contains `term`
    /// (case-insensitive). A blank term matches everything.
    pub async fn search_journal_entries(
        &self,
        uid: &str,
        term: &str,
    ) -> Result<Vec<JournalEntry>, DataError> {
        let entries = self.read_journal_entries(uid).await?;
        let term = term.trim();
        if term.is_empty() {
            return Ok(entries);
        }
        Ok(entries.into_iter().filter(|e| e.matches(term)).collect())
    }
}
