//! Legacy insert construction by textual substitution.
//!
//! The phrase is pasted verbatim into [`INSERT_PHRASE_TEMPLATE`] at the first
//! `$PLACEHOLDER`. Nothing is escaped: a quote in the text ends the string
//! literal early, so the rendered command either fails to parse or carries
//! extra SQL. [`PhraseStore::insert_phrase`](super::PhraseStore::insert_phrase)
//! binds the value instead and should be preferred.

use super::schema::{INSERT_PHRASE_TEMPLATE, PLACEHOLDER};

/// Render the insert command for `text`
pub fn render_insert(text: &str) -> String {
    INSERT_PHRASE_TEMPLATE.replacen(PLACEHOLDER, text, 1)
}

/// Whether `text` would change the shape of the rendered command
pub fn is_unsafe(text: &str) -> bool {
    text.contains('\'')
}
