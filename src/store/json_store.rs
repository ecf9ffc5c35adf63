use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::session::report::ProgressReporter;
use crate::session::result::SessionSummary;
use crate::store::schema::{
    ProfileData, SessionHistoryData, SessionRecord, VocabularyEntry, WordListData,
};
use crate::store::word_bank::WordBank;

const HISTORY_FILE: &str = "history.json";
const PROFILE_FILE: &str = "profile.json";
const LISTS_DIR: &str = "lists";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(base_dir.join(LISTS_DIR))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn list_path(&self, list_id: &str) -> PathBuf {
        self.base_dir
            .join(LISTS_DIR)
            .join(format!("{}.json", sanitize_key(list_id)))
    }

    /// Missing or unreadable documents come back as defaults.
    fn load<T: DeserializeOwned + Default>(&self, path: &Path) -> T {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable {}: {e}", path.display());
                T::default()
            }),
            Err(_) => T::default(),
        }
    }

    fn save<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load_list(&self, list_id: &str) -> Result<WordListData> {
        let path = self.list_path(list_id);
        if !path.exists() {
            bail!("Unknown word list: {list_id}");
        }
        let content = fs::read_to_string(&path)?;
        let list: WordListData = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(list)
    }

    pub fn save_list(&self, list: &WordListData) -> Result<()> {
        self.save(&self.list_path(&list.id), list)
    }

    /// Read a word list from an arbitrary JSON file and store it.
    pub fn import_list(&self, path: &Path) -> Result<WordListData> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let list: WordListData = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if list.id.trim().is_empty() {
            bail!("Word list in {} has no id", path.display());
        }
        self.save_list(&list)?;
        log::info!("Imported list {} ({} entries)", list.id, list.entries.len());
        Ok(list)
    }

    pub fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(self.base_dir.join(LISTS_DIR))? {
            let path = entry?.path();
            if path.extension().and_then(|x| x.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn load_history(&self) -> SessionHistoryData {
        let data: SessionHistoryData = self.load(&self.file_path(HISTORY_FILE));
        if data.needs_reset() {
            SessionHistoryData::default()
        } else {
            data
        }
    }

    pub fn save_history(&self, data: &SessionHistoryData) -> Result<()> {
        self.save(&self.file_path(HISTORY_FILE), data)
    }

    pub fn load_profile(&self) -> ProfileData {
        let data: ProfileData = self.load(&self.file_path(PROFILE_FILE));
        if data.needs_reset() {
            ProfileData::default()
        } else {
            data
        }
    }

    pub fn save_profile(&self, data: &ProfileData) -> Result<()> {
        self.save(&self.file_path(PROFILE_FILE), data)
    }
}

impl WordBank for JsonStore {
    fn entries(&self, list_id: &str) -> Result<Vec<VocabularyEntry>> {
        Ok(self.load_list(list_id)?.entries)
    }

    fn list_name(&self, list_id: &str) -> Result<String> {
        Ok(self.load_list(list_id)?.name)
    }
}

impl ProgressReporter for JsonStore {
    fn record(&mut self, list_id: &str, summary: &SessionSummary) -> Result<()> {
        let now = Utc::now();

        let mut history = self.load_history();
        history.push(SessionRecord {
            list_id: list_id.to_string(),
            timestamp: now,
            summary: summary.clone(),
        });
        self.save_history(&history)?;

        let mut profile = self.load_profile();
        profile.record_session(summary, now.date_naive());
        self.save_profile(&profile)?;
        Ok(())
    }
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
