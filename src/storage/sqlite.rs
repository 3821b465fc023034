//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params};
use crate::Result;
use crate::phrase::Phrase;
use super::{schema, template};

/// SQLite-backed storage for the phrase table.
///
/// The handle owns its connection. It is passed explicitly to every
/// operation and released by [`PhraseStore::close`] or on drop.
pub struct PhraseStore {
    conn: Connection,
}

impl PhraseStore {
    /// Open a database file (creates if doesn't exist).
    ///
    /// The schema is not touched; call [`PhraseStore::ensure_schema`].
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!("Opening phrase store at {}", path.display());
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the phrase table unless it already exists
    pub fn ensure_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        tracing::debug!("Schema ensured");
        Ok(())
    }

    // ========== Phrase Operations ==========

    /// Insert a phrase, returning its assigned `phraseID`
    pub fn insert_phrase(&self, text: &str) -> Result<i64> {
        self.conn.execute(schema::INSERT_PHRASE, params![text])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "Inserted phrase");
        Ok(id)
    }

    /// Insert a phrase through the legacy text template.
    ///
    /// The rendered command runs as a batch, so text that breaks out of the
    /// string literal can add rows or statements.
    pub fn insert_phrase_templated(&self, text: &str) -> Result<()> {
        if template::is_unsafe(text) {
            tracing::warn!("Phrase contains a quote; templated insert will not store it verbatim");
        }
        let sql = template::render_insert(text);
        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    /// List all phrases in insertion order
    pub fn list_phrases(&self) -> Result<Vec<Phrase>> {
        let mut stmt = self.conn.prepare(schema::SELECT_ALL_PHRASES)?;

        let phrases = stmt
            .query_map([], |row| self.row_to_phrase(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(phrases)
    }

    /// Count all phrases
    pub fn count_phrases(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(schema::COUNT_PHRASES, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Close the connection, surfacing any error the drop would swallow
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }

    /// Helper to convert a row to a Phrase
    fn row_to_phrase(&self, row: &rusqlite::Row) -> rusqlite::Result<Phrase> {
        Ok(Phrase {
            id: row.get(0)?,
            text: row.get(1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const GREETINGS: [&str; 4] = [
        "Hello World!",
        "Hello Node.js!",
        "Hello WebTech!",
        "Hello Regensburg!",
    ];

    fn fresh_store() -> PhraseStore {
        let store = PhraseStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_ensure_schema_twice() {
        let store = PhraseStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.count_phrases().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_list_in_order() {
        let store = fresh_store();

        for (i, text) in GREETINGS.iter().enumerate() {
            let id = store.insert_phrase(text).unwrap();
            assert_eq!(id, i as i64 + 1);
        }

        let phrases = store.list_phrases().unwrap();
        let expected: Vec<Phrase> = GREETINGS
            .iter()
            .enumerate()
            .map(|(i, text)| Phrase::new(i as i64 + 1, *text))
            .collect();
        assert_eq!(phrases, expected);
    }

    #[test]
    fn test_list_empty_store() {
        let store = fresh_store();
        assert!(store.list_phrases().unwrap().is_empty());
    }

    #[test]
    fn test_list_without_schema_is_error() {
        let store = PhraseStore::open_in_memory().unwrap();
        let err = store.list_phrases().unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("no such table"));
    }

    #[test]
    fn test_bound_insert_keeps_quotes_and_placeholder() {
        let store = fresh_store();
        let tricky = [
            "it's",
            "say \"hi\"",
            "$PLACEHOLDER",
            "x'); DROP TABLE phrase; --",
        ];

        for text in tricky {
            store.insert_phrase(text).unwrap();
        }

        let stored: Vec<String> = store
            .list_phrases()
            .unwrap()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        assert_eq!(stored, tricky);
    }

    #[test]
    fn test_templated_insert_plain_text() {
        let store = fresh_store();
        store.insert_phrase_templated("Hello World!").unwrap();
        assert_eq!(store.list_phrases().unwrap(), vec![Phrase::new(1, "Hello World!")]);
    }

    #[test]
    fn test_templated_insert_unbalanced_quote_fails() {
        let store = fresh_store();
        let err = store.insert_phrase_templated("it's").unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(store.count_phrases().unwrap(), 0);
    }

    #[test]
    fn test_templated_insert_injects_rows() {
        let store = fresh_store();
        store.insert_phrase_templated("pwned'), ('injected").unwrap();

        let phrases = store.list_phrases().unwrap();
        assert_eq!(
            phrases,
            vec![Phrase::new(1, "pwned"), Phrase::new(2, "injected")]
        );
    }

    #[test]
    fn test_close() {
        let store = fresh_store();
        store.insert_phrase("bye").unwrap();
        store.close().unwrap();
    }
}
