use tabled::{settings::Style, Table, Tabled};
use crate::phrase::Phrase;

#[derive(Tabled)]
pub struct PhraseRow {
    #[tabled(rename = "phraseID")]
    pub id: i64,
    #[tabled(rename = "phrase")]
    pub text: String,
}

impl From<&Phrase> for PhraseRow {
    fn from(phrase: &Phrase) -> Self {
        Self {
            id: phrase.id,
            text: phrase.text.clone().unwrap_or_else(|| "<null>".to_string()),
        }
    }
}

#[derive(Tabled)]
pub struct StatRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Rounded table of phrases, empty string for no rows
pub fn phrase_table(phrases: &[Phrase]) -> String {
    if phrases.is_empty() {
        return String::new();
    }
    let rows: Vec<PhraseRow> = phrases.iter().map(PhraseRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &[(&str, String)]) -> String {
    let rows: Vec<StatRow> = stats
        .iter()
        .map(|(metric, value)| StatRow {
            metric: metric.to_string(),
            value: value.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_table_contains_rows() {
        let table = phrase_table(&[Phrase::new(1, "Hello World!"), Phrase { id: 2, text: None }]);
        assert!(table.contains("phraseID"));
        assert!(table.contains("Hello World!"));
        assert!(table.contains("<null>"));
    }

    #[test]
    fn test_empty_phrase_table() {
        assert!(phrase_table(&[]).is_empty());
    }
}
