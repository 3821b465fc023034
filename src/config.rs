use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Phrases stored by a plain `phrasestore` run
pub const DEFAULT_PHRASES: [&str; 4] = [
    "Hello World!",
    "Hello Node.js!",
    "Hello WebTech!",
    "Hello Regensburg!",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PhraseConfig {
    pub database: Option<String>,
    pub phrases: Option<Vec<String>>,
    /// Issue operations without waiting for each other
    pub detached: bool,
    /// Build inserts by text substitution instead of bound values
    pub template_insert: bool,
}

impl PhraseConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path)
    }

    pub fn phrases(&self) -> Vec<String> {
        match &self.phrases {
            Some(phrases) => phrases.clone(),
            None => DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("phrasestore.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("db.sqlite")
}

/// Load the config file; a missing default file yields the defaults.
///
/// An explicitly requested file must exist.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PhraseConfig> {
    let explicit = path.is_some();
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        if explicit {
            anyhow::bail!("config file not found at {}", path.display());
        }
        return Ok(PhraseConfig::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PhraseConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
