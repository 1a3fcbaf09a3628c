use std::error::Error;
use std::{ fs, path::Path, path::PathBuf };
use serde_json::{ Value, Map };
use anyhow::Result;

const MESSAGES_DIR_ENV: &str = "SAFER_MESSAGES_DIR";

fn main() -> Result<(), Box<dyn Error>> {
    let messages_dir = find_messages_directory()?;
    let out_path = Path::new(&std::env::var("OUT_DIR")?).join("all_translations.json");

    println!("cargo:rerun-if-env-changed={}", MESSAGES_DIR_ENV);

    // Always create the file, even if empty, so include_str! works
    if !messages_dir.exists() {
        println!("cargo:warning=No messages/ folder found at {}", messages_dir.display());
        fs::write(out_path, "{}")?;
        return Ok(());
    }

    let translations = build_translations(&messages_dir)?;
    fs::write(out_path, serde_json::to_string_pretty(&translations)?)?;

    println!("cargo:rerun-if-changed={}", messages_dir.display());
    Ok(())
}

/// Collects `messages/<locale>/<file>.json` into `{locale: {file: {key: text}}}`.
fn build_translations(messages_dir: &Path) -> Result<Value> {
    let mut translations = Map::new();

    for locale_entry in fs::read_dir(messages_dir)? {
        let locale_dir = locale_entry?;
        if !locale_dir.file_type()?.is_dir() {
            continue;
        }

        let locale_tag = locale_dir.file_name().to_string_lossy().to_string();
        let mut message_files = Map::new();

        for file_entry in fs::read_dir(locale_dir.path())? {
            let file_path = file_entry?.path();

            if let Some("json") = file_path.extension().and_then(|e| e.to_str()) {
                let file_stem = file_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");

                let content = fs::read_to_string(&file_path)?;
                let json: Value = serde_json::from_str(&content).map_err(|e| {
                    anyhow::anyhow!("invalid JSON in {}: {}", file_path.display(), e)
                })?;
                message_files.insert(file_stem.to_string(), json);
                println!("cargo:rerun-if-changed={}", file_path.display());
            }
        }
        translations.insert(locale_tag, Value::Object(message_files));
    }

    Ok(Value::Object(translations))
}

fn find_messages_directory() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(MESSAGES_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")?;
    Ok(Path::new(&manifest_dir).join("messages"))
}
