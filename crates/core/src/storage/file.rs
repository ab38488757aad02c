use super::{PrefKey, PrefValue, PreferenceStore};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

const FILE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredEntry {
    value: PrefValue,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, StoredEntry>,
}

/// Preferences kept in one JSON document, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredEntry>,
}

impl JsonFileStore {
    /// Opens `path`, starting empty when it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(Some(entries)) => {
                tracing::debug!(path = %path.display(), entries = entries.len(), "preferences loaded");
                entries
            }
            Ok(None) => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "ignoring unreadable preferences");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn updated_at(&self, key: &PrefKey) -> Option<DateTime<Utc>> {
        self.entries.get(&key.storage_key()).map(|e| e.updated_at)
    }

    fn persist(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {} failed", parent.display()))?;
        }

        let doc = PrefsFile {
            version: FILE_VERSION,
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&doc).context("serialize preferences failed")?;

        // Same directory so the rename stays on one filesystem.
        let tmp_path = self.path.with_extension("json.tmp");
        let written = write_synced(&tmp_path, json.as_bytes()).and_then(|()| {
            fs::rename(&tmp_path, &self.path)
                .with_context(|| format!("rename onto {} failed", self.path.display()))
        });
        if written.is_err() && tmp_path.exists() {
            if let Err(err) = fs::remove_file(&tmp_path) {
                tracing::debug!(
                    path = %tmp_path.display(),
                    error = %err,
                    "temp preferences not removed"
                );
            }
        }
        written
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut file =
        fs::File::create(path).with_context(|| format!("create {} failed", path.display()))?;
    file.write_all(bytes).context("write preferences failed")?;
    file.sync_all().context("sync preferences failed")
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &PrefKey) -> Option<PrefValue> {
        self.entries.get(&key.storage_key()).map(|e| e.value.clone())
    }

    fn set(&mut self, key: PrefKey, value: PrefValue) {
        self.entries.insert(
            key.storage_key(),
            StoredEntry {
                value,
                updated_at: Utc::now(),
            },
        );
        if let Err(err) = self.persist() {
            tracing::warn!(key = %key, error = %format!("{err:#}"), "preference write failed");
        }
    }
}

fn read_entries(path: &Path) -> anyhow::Result<Option<BTreeMap<String, StoredEntry>>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {} failed", path.display())),
    };
    let doc: PrefsFile = serde_json::from_str(&content).context("parse preferences failed")?;
    anyhow::ensure!(
        doc.version == FILE_VERSION,
        "unsupported preferences version {}",
        doc.version
    );
    Ok(Some(doc.entries))
}
