use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::session::result::SessionSummary;

pub const SCHEMA_VERSION: u32 = 1;
pub const MAX_HISTORY: usize = 500;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: String,
    #[serde(alias = "value")]
    pub headword: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl VocabularyEntry {
    pub fn new(id: &str, headword: &str, meaning: &str) -> Self {
        Self {
            id: id.to_string(),
            headword: headword.to_string(),
            meaning: meaning.to_string(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }

    /// Entries need both sides before they can become an exercise.
    pub fn is_usable(&self) -> bool {
        !self.headword.trim().is_empty() && !self.meaning.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordListData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "words")]
    pub entries: Vec<VocabularyEntry>,
}

impl WordListData {
    pub fn new(id: &str, name: &str, entries: Vec<VocabularyEntry>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            entries,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub list_id: String,
    pub timestamp: DateTime<Utc>,
    pub summary: SessionSummary,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionHistoryData {
    pub schema_version: u32,
    pub sessions: Vec<SessionRecord>,
}

impl Default for SessionHistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            sessions: Vec::new(),
        }
    }
}

impl SessionHistoryData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    /// Append, dropping the oldest records past the cap.
    pub fn push(&mut self, record: SessionRecord) {
        self.sessions.push(record);
        if self.sessions.len() > MAX_HISTORY {
            let excess = self.sessions.len() - MAX_HISTORY;
            self.sessions.drain(..excess);
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    pub total_score: f64,
    pub total_sessions: u32,
    pub streak_days: u32,
    pub best_streak: u32,
    pub last_practice_date: Option<String>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            total_score: 0.0,
            total_sessions: 0,
            streak_days: 0,
            best_streak: 0,
            last_practice_date: None,
        }
    }
}

impl ProfileData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    /// Fold one finished session into the totals and the daily streak.
    pub fn record_session(&mut self, summary: &SessionSummary, day: NaiveDate) {
        self.total_score += summary.score;
        self.total_sessions += 1;

        let today = day.format("%Y-%m-%d").to_string();
        if self.last_practice_date.as_deref() == Some(&today) {
            return;
        }
        let last = self
            .last_practice_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        self.streak_days = match last {
            Some(last) if day.signed_duration_since(last).num_days() == 1 => self.streak_days + 1,
            _ => 1,
        };
        self.best_streak = self.best_streak.max(self.streak_days);
        self.last_practice_date = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionMode;

    fn summary(score: f64) -> SessionSummary {
        SessionSummary {
            mode: SessionMode::Learning,
            correct: 1,
            total: 1,
            score,
            elapsed_secs: None,
            timed_out: false,
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_entry_accepts_value_alias() {
        let json = r#"{"id":"1","value":"apple","meaning":"elma","context":"I eat an apple."}"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.headword, "apple");
        assert_eq!(entry.context.as_deref(), Some("I eat an apple."));
    }

    #[test]
    fn test_list_accepts_words_alias_and_defaults() {
        let json = r#"{"id":"l1","name":"Basics","words":[{"id":"1","headword":"a","meaning":"b"}]}"#;
        let list: WordListData = serde_json::from_str(json).unwrap();
        assert_eq!(list.schema_version, SCHEMA_VERSION);
        assert_eq!(list.entries.len(), 1);
        assert!(list.description.is_empty());
    }

    #[test]
    fn test_usable_entries() {
        assert!(VocabularyEntry::new("1", "apple", "elma").is_usable());
        assert!(!VocabularyEntry::new("1", " ", "elma").is_usable());
        assert!(!VocabularyEntry::new("1", "apple", "").is_usable());
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let mut profile = ProfileData::default();
        profile.record_session(&summary(10.0), day("2026-03-01"));
        profile.record_session(&summary(5.0), day("2026-03-01"));
        assert_eq!(profile.streak_days, 1);
        profile.record_session(&summary(5.0), day("2026-03-02"));
        assert_eq!(profile.streak_days, 2);
        profile.record_session(&summary(5.0), day("2026-03-05"));
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.best_streak, 2);
        assert_eq!(profile.total_sessions, 4);
        assert!((profile.total_score - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_history_is_capped() {
        let mut history = SessionHistoryData::default();
        for i in 0..(MAX_HISTORY + 3) {
            history.push(SessionRecord {
                list_id: i.to_string(),
                timestamp: Utc::now(),
                summary: summary(1.0),
            });
        }
        assert_eq!(history.sessions.len(), MAX_HISTORY);
        assert_eq!(history.sessions[0].list_id, "3");
    }
}
