use std::collections::BTreeMap;

use anyhow::{Result, bail};

use crate::store::schema::{VocabularyEntry, WordListData};

pub const DEMO_LIST_ID: &str = "demo";

const DEMO_WORDS: &[(&str, &str, Option<&str>)] = &[
    ("apple", "elma", Some("I eat an apple every day.")),
    ("book", "kitap", Some("I read a book before bed.")),
    ("computer", "bilgisayar", None),
    ("house", "ev", Some("I live in a big house.")),
    ("car", "araba", Some("I drive my car to work every day.")),
    ("phone", "telefon", Some("I forgot my phone at home.")),
    ("water", "su", Some("I drink eight glasses of water daily.")),
    ("friend", "arkadaş", Some("She is my best friend since childhood.")),
    ("time", "zaman", Some("Time flies when you are having fun.")),
    ("food", "yemek", Some("Turkish food is delicious.")),
];

/// Source of vocabulary for a list. Entries come back in a stable order.
pub trait WordBank {
    fn entries(&self, list_id: &str) -> Result<Vec<VocabularyEntry>>;
    fn list_name(&self, list_id: &str) -> Result<String>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryWordBank {
    lists: BTreeMap<String, WordListData>,
}

impl MemoryWordBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_list() -> Self {
        let mut bank = Self::new();
        bank.insert(demo_list());
        bank
    }

    pub fn insert(&mut self, list: WordListData) {
        self.lists.insert(list.id.clone(), list);
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.lists.keys().cloned().collect()
    }

    fn get(&self, list_id: &str) -> Result<&WordListData> {
        match self.lists.get(list_id) {
            Some(list) => Ok(list),
            None => bail!("Unknown word list: {list_id}"),
        }
    }
}

impl WordBank for MemoryWordBank {
    fn entries(&self, list_id: &str) -> Result<Vec<VocabularyEntry>> {
        Ok(self.get(list_id)?.entries.clone())
    }

    fn list_name(&self, list_id: &str) -> Result<String> {
        Ok(self.get(list_id)?.name.clone())
    }
}

pub fn demo_list() -> WordListData {
    let entries = DEMO_WORDS
        .iter()
        .enumerate()
        .map(|(i, &(headword, meaning, context))| {
            let entry = VocabularyEntry::new(&(i + 1).to_string(), headword, meaning);
            match context {
                Some(context) => entry.with_context(context),
                None => entry,
            }
        })
        .collect();
    WordListData::new(DEMO_LIST_ID, "Everyday words", entries)
}
