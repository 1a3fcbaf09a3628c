//! Translation table and its loaders.
//!
//! Message files live under `messages/<locale>/<file>.json`, each a flat
//! object of `key -> text`. They are either bundled at build time (see
//! `build.rs`) or read from disk at runtime. Keys share a single namespace
//! across files.

use std::collections::BTreeMap;
use std::sync::Arc;

use bevy::log::{ debug, warn };
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::LocalizationError;
use crate::locale::Locale;

/// Per-locale text for a single key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variants {
    pub en: Option<String>,
    pub ar: Option<String>,
}

impl Variants {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: Some(en.into()),
            ar: Some(ar.into()),
        }
    }

    /// Text for `locale`; empty strings count as missing.
    pub fn get(&self, locale: Locale) -> Option<&str> {
        let text = match locale {
            Locale::En => self.en.as_deref(),
            Locale::Ar => self.ar.as_deref(),
        };
        text.filter(|s| !s.is_empty())
    }

    fn slot_mut(&mut self, locale: Locale) -> &mut Option<String> {
        match locale {
            Locale::En => &mut self.en,
            Locale::Ar => &mut self.ar,
        }
    }
}

/// Immutable key -> per-locale text mapping shared by every consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: BTreeMap<String, Variants>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, variants: Variants) {
        self.entries.insert(key.into(), variants);
    }

    /// Builder-style insert, handy for small literal tables.
    pub fn with(mut self, key: &str, en: &str, ar: &str) -> Self {
        self.insert(key, Variants::new(en, ar));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Variants> {
        self.entries.get(key)
    }

    /// Text for `(key, locale)`, or `None` if the key or the variant is missing.
    pub fn lookup(&self, key: &str, locale: Locale) -> Option<&str> {
        self.entries.get(key).and_then(|variants| variants.get(locale))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(key, locale)` pairs with no usable text. Such keys still resolve,
    /// to the key itself, so this is an authoring audit rather than an error.
    pub fn missing_variants(&self) -> Vec<(&str, Locale)> {
        self.entries
            .iter()
            .flat_map(|(key, variants)| {
                Locale::ALL
                    .into_iter()
                    .filter(move |locale| variants.get(*locale).is_none())
                    .map(move |locale| (key.as_str(), locale))
            })
            .collect()
    }

    /// Parses the bundled shape `{locale: {file: {key: text}}}`.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, LocalizationError> {
        let value: Value = serde_json::from_str(json).map_err(|source| LocalizationError::Json {
            origin: origin.to_string(),
            source,
        })?;
        Ok(Self::from_value(&value))
    }

    fn from_value(value: &Value) -> Self {
        let mut table = Self::new();

        let Some(locales) = value.as_object() else {
            warn!("Translation data is not an object, ignoring it");
            return table;
        };

        for (tag, files) in locales {
            let Ok(locale) = tag.parse::<Locale>() else {
                warn!("Skipping messages for unsupported locale '{}'", tag);
                continue;
            };
            let Some(files) = files.as_object() else {
                continue;
            };
            // later file names win duplicates, whatever order the map keeps
            let mut files: Vec<_> = files.iter().collect();
            files.sort_by(|a, b| a.0.cmp(b.0));
            for (file_name, messages) in files {
                table.merge_file(locale, file_name, messages);
            }
        }

        table
    }

    fn merge_file(&mut self, locale: Locale, file_name: &str, messages: &Value) {
        let Some(messages) = messages.as_object() else {
            warn!("Message file '{}/{}' is not an object", locale, file_name);
            return;
        };

        for (key, text) in messages {
            let Some(text) = text.as_str() else {
                warn!("Skipping non-text message '{}' in '{}/{}'", key, locale, file_name);
                continue;
            };
            let slot = self.entries.entry(key.clone()).or_default().slot_mut(locale);
            if slot.is_some() {
                warn!("Duplicate message '{}' for locale '{}', '{}' wins", key, locale, file_name);
            }
            *slot = Some(text.to_string());
        }
    }
}

// ---------- Loaders ----------

const BUNDLED_TRANSLATIONS: &str = include_str!(concat!(env!("OUT_DIR"), "/all_translations.json"));

static BUNDLED_TABLE: Lazy<Arc<TranslationTable>> = Lazy::new(|| {
    match TranslationTable::from_json_str(BUNDLED_TRANSLATIONS, "bundled translations") {
        Ok(table) => Arc::new(table),
        Err(e) => {
            warn!("Failed to load bundled translations: {}", e);
            Arc::new(TranslationTable::new())
        }
    }
});

/// The table compiled into the binary, parsed once on first use.
pub fn bundled_table() -> Arc<TranslationTable> {
    Arc::clone(&BUNDLED_TABLE)
}

/// Bundled table, or the filesystem one if nothing was bundled.
pub fn load_bundled_translations(messages_folder: &str) -> Arc<TranslationTable> {
    let table = bundled_table();
    if table.is_empty() {
        debug!("Bundled translations are empty, trying '{}'", messages_folder);
        return load_filesystem_translations(messages_folder);
    }
    table
}

/// Reads the messages folder; an unreadable folder yields an empty table.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_filesystem_translations(messages_folder: &str) -> Arc<TranslationTable> {
    match load_translation_from_fs(messages_folder) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            warn!("Failed to load translations from '{}': {}", messages_folder, e);
            Arc::new(TranslationTable::new())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_filesystem_translations(_messages_folder: &str) -> Arc<TranslationTable> {
    warn!("Filesystem loading not available on WASM, using bundled translations");
    bundled_table()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_translation_from_fs(messages_folder: &str) -> Result<TranslationTable, LocalizationError> {
    use std::fs;
    use std::path::Path;

    let message_dir = Path::new(messages_folder);
    if !message_dir.is_dir() {
        return Err(LocalizationError::MessagesFolderMissing(message_dir.to_path_buf()));
    }

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| LocalizationError::Io { path, source }
    };

    let mut table = TranslationTable::new();

    // same merge order as the bundle, so both loaders pick the same duplicate
    for folder in sorted_entries(message_dir)? {
        if !folder.is_dir() {
            continue;
        }
        let tag = folder
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let Ok(locale) = tag.parse::<Locale>() else {
            warn!("Skipping messages for unsupported locale '{}'", tag);
            continue;
        };

        for path in sorted_entries(&folder)? {
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let file_name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();
            let content = fs::read_to_string(&path).map_err(io_err(&path))?;
            let messages: Value = serde_json::from_str(&content).map_err(|source| {
                LocalizationError::Json {
                    origin: path.display().to_string(),
                    source,
                }
            })?;

            table.merge_file(locale, &file_name, &messages);
        }
    }

    debug!("Loaded {} translation keys from '{}'", table.len(), messages_folder);
    Ok(table)
}

/// Directory entries ordered by file stem, the name a file is bundled under.
#[cfg(not(target_arch = "wasm32"))]
fn sorted_entries(dir: &std::path::Path) -> Result<Vec<std::path::PathBuf>, LocalizationError> {
    let io_err = |source: std::io::Error| LocalizationError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = std::fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    paths.sort_by(|a, b| (a.file_stem(), a.file_name()).cmp(&(b.file_stem(), b.file_name())));
    Ok(paths)
}
