//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with one table:
//! - phrase(phraseID, phrase)

pub mod schema;
pub mod sqlite;
pub mod template;

pub use sqlite::PhraseStore;
