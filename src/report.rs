//! Completion reporting
//!
//! Every completion is shown as it arrives: errors go to stderr, listings are
//! printed in full. Failures are counted but never change the exit status.

use crate::dispatch::Completion;
use crate::output::OutputFormat;
use crate::phrase::Phrase;
use crate::ui;

#[derive(Debug, Default)]
pub struct Reporter {
    format: OutputFormat,
    failures: usize,
    reported: usize,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn reported(&self) -> usize {
        self.reported
    }

    pub fn handle(&mut self, completion: &Completion) {
        self.reported += 1;

        if let Some(err) = completion.error() {
            self.failures += 1;
            tracing::debug!(kind = completion.kind(), "Operation failed: {}", err);
            self.emit_error(completion.kind(), &err.to_string());
            return;
        }

        match completion {
            Completion::Schema(_) => {
                tracing::debug!("Phrase table ready");
                if self.format == OutputFormat::Text {
                    ui::success("Phrase table ready");
                }
            }
            Completion::Insert { text, result } => {
                let id = result.as_ref().ok().copied().flatten();
                tracing::debug!(?id, "Stored phrase {:?}", text);
                if self.format == OutputFormat::Text {
                    ui::inserted(id, text);
                }
            }
            Completion::List(Ok(rows)) => self.emit_rows(rows),
            Completion::List(Err(_)) => {}
        }
    }

    fn emit_error(&self, kind: &str, message: &str) {
        match self.format {
            OutputFormat::Text => ui::error(&format!("{} failed: {}", kind, message)),
            OutputFormat::Json => {
                let value = serde_json::json!({ "operation": kind, "error": message });
                eprintln!("{}", value);
            }
        }
    }

    fn emit_rows(&self, rows: &[Phrase]) {
        match self.format {
            OutputFormat::Text => {
                if rows.is_empty() {
                    ui::empty("No phrases stored.");
                } else {
                    println!("{} {} phrase(s)", ui::Icons::LIST, rows.len());
                    println!("{}", ui::phrase_table(rows));
                }
            }
            OutputFormat::Json => match render_json(rows) {
                Ok(json) => println!("{}", json),
                Err(e) => ui::error(&format!("Failed to encode listing: {}", e)),
            },
        }
    }
}

/// Array of `{phraseID, phrase}` objects
pub fn render_json(rows: &[Phrase]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
