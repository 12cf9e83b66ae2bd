use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use todo_view::client::DEFAULT_COLLECTION_PATH;

pub const DEFAULT_CONFIG_FILE: &str = "todo.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub collection_path: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".into(),
            collection_path: DEFAULT_COLLECTION_PATH.into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    collection_path: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then `TODO_*` environment variables.
///
/// An explicit `path` must exist; the default `todo.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    if let Some(raw) = raw {
        apply_file(&mut settings, &raw)?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file: FileSettings = toml::from_str(raw).context("invalid config file")?;
    if let Some(v) = file.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file.collection_path {
        settings.collection_path = v;
    }
    if let Some(v) = file.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("TODO_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("TODO_COLLECTION_PATH") {
        settings.collection_path = v;
    }
    if let Some(v) = lookup("TODO_LOG") {
        settings.log_filter = v;
    }
}
