//! # PhraseStore - file-backed phrase table
//!
//! Creates a local SQLite database, defines the single `phrase` table,
//! appends text rows and reads them back.
//!
//! PhraseStore provides:
//! - An explicitly owned store handle with bound-parameter inserts
//! - A dispatcher that runs a plan of store operations serialized or detached
//! - Typed completions, one per operation kind, for reporting results

pub mod phrase;
pub mod storage;
pub mod dispatch;
pub mod report;
pub mod ui;
pub mod output;
pub mod config;

// Re-exports for convenient access
pub use phrase::Phrase;
pub use storage::PhraseStore;
pub use dispatch::{Binding, Completion, Dispatcher, Jitter, Operation, Ordering};

/// Result type alias for PhraseStore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PhraseStore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store is still shared by pending operations")]
    StoreBusy,

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Task error: {0}")]
    Task(String),
}
