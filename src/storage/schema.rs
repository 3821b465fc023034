//! Database schema definitions

/// SQL to create the phrase table
pub const CREATE_PHRASE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS phrase (
    phraseID INTEGER NOT NULL UNIQUE,
    phrase TEXT,
    PRIMARY KEY(phraseID AUTOINCREMENT)
)
"#;

/// Bound-parameter insert
pub const INSERT_PHRASE: &str = "INSERT INTO phrase (phrase) VALUES (?1)";

/// Token replaced by the phrase text in [`INSERT_PHRASE_TEMPLATE`]
pub const PLACEHOLDER: &str = "$PLACEHOLDER";

/// Legacy insert built by textual substitution, see [`super::template`]
pub const INSERT_PHRASE_TEMPLATE: &str = "INSERT INTO phrase (phrase) VALUES ('$PLACEHOLDER')";

/// All rows, oldest first
pub const SELECT_ALL_PHRASES: &str = "SELECT phraseID, phrase FROM phrase ORDER BY phraseID";

pub const COUNT_PHRASES: &str = "SELECT COUNT(*) FROM phrase";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_PHRASE_TABLE]
}
