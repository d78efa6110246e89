/// Runtime configuration for the journaling core
///
/// Defaults describe the production content source and key layout; embedders
/// override individual fields with the `with_*` helpers.

use std::path::PathBuf;
use std::time::Duration;

use crate::content::PageLayout;
use crate::storage::DEFAULT_NAMESPACE;

/// Page the daily reading is scraped from
pub const DEFAULT_CONTENT_URL: &str = "https://www.jftna.org/jft/";

/// Identifying `User-Agent` sent with every content request
pub const DEFAULT_USER_AGENT: &str = "SoulBoost/1.0";

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE_NAME: &str = "soulboost.db";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub content_url: String,
    pub user_agent: String,
    /// Whole-request timeout for the content fetch
    pub request_timeout: Duration,
    /// Prefix of every storage key
    pub namespace: String,
    /// Which page layout the parser expects
    pub page_layout: PageLayout,
    /// Explicit database location; resolved from the user's directories when unset
    pub database_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_url: DEFAULT_CONTENT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(15),
            namespace: DEFAULT_NAMESPACE.to_string(),
            page_layout: PageLayout::Current,
            database_path: None,
        }
    }
}

impl AppConfig {
    pub fn with_content_url(mut self, url: impl Into<String>) -> Self {
        self.content_url = url.into();
        self
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_page_layout(mut self, layout: PageLayout) -> Self {
        self.page_layout = layout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Database location: the configured path (parent created on demand), or
    /// the first writable default directory
    pub fn resolve_database_path(&self) -> Result<PathBuf, std::io::Error> {
        match &self.database_path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                Ok(path.clone())
            }
            None => default_database_path(),
        }
    }
}

/// Get the default database path with a fallback strategy
fn default_database_path() -> Result<PathBuf, std::io::Error> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".soulboost")),
        dirs::data_dir().map(|p| p.join("soulboost")),
        dirs::config_dir().map(|p| p.join("soulboost")),
        std::env::current_dir().ok().map(|p| p.join(".soulboost")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let probe = potential_path.join(".test_write");
            if std::fs::write(&probe, "test").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return Ok(potential_path.join(DATABASE_FILE_NAME));
            }
        }
    }

    // Last resort: the temporary directory
    let temp_path = std::env::temp_dir().join("soulboost");
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path.join(DATABASE_FILE_NAME))
}
