use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading translation data or parsing locale tags.
///
/// None of these reach text resolution: a table that fails to load is
/// replaced by an empty one and every lookup degrades to its key.
#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("messages folder '{}' not found", .0.display())]
    MessagesFolderMissing(PathBuf),

    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid translation JSON in '{origin}'")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported locale '{0}' (expected 'en' or 'ar')")]
    UnknownLocale(String),
}
