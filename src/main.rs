//! PhraseStore CLI - create, fill and list a file-backed phrase table

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use phrasestore::config::{self, ensure_db_dir, load_config};
use phrasestore::dispatch::{demo_plan, Binding, Dispatcher, Operation, Ordering};
use phrasestore::output::OutputFormat;
use phrasestore::report::Reporter;
use phrasestore::storage::PhraseStore;
use phrasestore::ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "phrasestore")]
#[command(version)]
#[command(about = "File-backed SQLite phrase store")]
#[command(long_about = r#"
Creates a SQLite database file with a single `phrase` table, stores a set of
phrases and prints every stored row.

Example usage:
  phrasestore                      # schema, four greetings, listing
  phrasestore add "Hello Rust!"
  phrasestore list --format json
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (default: db.sqlite)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to a phrasestore.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Issue all operations at once instead of one after another
    #[arg(long, global = true)]
    detached: bool,

    /// Build inserts by text substitution (unsafe with quotes)
    #[arg(long, global = true)]
    template_insert: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Create the table, store the configured phrases and list all rows
    Run,

    /// Create the phrase table if it does not exist
    Init,

    /// Store one or more phrases
    Add {
        /// Phrase text, stored verbatim
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Print all stored phrases
    List,

    /// Show statistics about the store
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = load_config(cli.config.as_deref())?;
    let database = cli.database.clone().unwrap_or_else(|| settings.database_path());
    let format: OutputFormat = cli.format.parse()?;

    let ordering = if cli.detached || settings.detached {
        Ordering::Detached
    } else {
        Ordering::Serialized
    };
    let binding = if cli.template_insert || settings.template_insert {
        Binding::Template
    } else {
        Binding::Bound
    };

    let command = cli.command.clone().unwrap_or(Commands::Run);
    let plan = match &command {
        Commands::Run => demo_plan(&settings.phrases()),
        Commands::Init => vec![Operation::EnsureSchema],
        Commands::Add { texts } => texts.iter().cloned().map(Operation::Insert).collect(),
        Commands::List => vec![Operation::List],
        Commands::Stats => Vec::new(),
    };

    ensure_db_dir(&database)?;
    let store = PhraseStore::open(&database)?;
    tracing::info!("Using database {}", database.display());
    if format == OutputFormat::Text {
        ui::header(&format!("Database: {}", database.display()));
    }
    if ordering == Ordering::Detached {
        ui::warn("Detached mode: operations may complete out of order");
    }

    let dispatcher = Dispatcher::new(store, ordering, binding);
    let mut completions = dispatcher.dispatch(plan);
    let mut reporter = Reporter::new(format);
    while let Some(completion) = completions.recv().await {
        reporter.handle(&completion);
    }

    let store = dispatcher.into_store()?;

    if let Commands::Stats = command {
        print_stats(&store, &database, format)?;
    }

    store.close()?;

    if reporter.failures() > 0 {
        tracing::warn!(
            "{} of {} operations failed",
            reporter.failures(),
            reporter.reported()
        );
    }

    Ok(())
}

fn print_stats(store: &PhraseStore, database: &std::path::Path, format: OutputFormat) -> anyhow::Result<()> {
    let phrases = store.count_phrases()?;
    let size = std::fs::metadata(database).map(|m| m.len()).unwrap_or(0);

    match format {
        OutputFormat::Json => {
            let data = serde_json::json!({
                "database": database.display().to_string(),
                "phrases": phrases,
                "bytes": size,
            });
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        OutputFormat::Text => {
            println!(
                "{}",
                ui::stats_table(&[
                    ("Database", database.display().to_string()),
                    ("Phrases", phrases.to_string()),
                    ("File size", format!("{} bytes", size)),
                ])
            );
            if phrases == 0 {
                ui::summary_row("Hint:", &format!("run `phrasestore` to store the {} default phrases", config::DEFAULT_PHRASES.len()));
            }
        }
    }
    Ok(())
}
