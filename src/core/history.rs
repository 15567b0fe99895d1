//! Session history of completed syntheses, newest first.
//!
//! The log is unbounded: it grows for as long as the session lives.

use bytes::Bytes;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::core::tts::SynthesisRequest;

/// One completed synthesis and its audio.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub text: String,
    pub language_code: String,
    /// Human readable language, as shown when the entry was made.
    pub language_name: String,
    pub voice_name: String,
    /// Formatted voice label, as shown when the entry was made.
    pub voice_display: String,
    pub speed: f32,
    pub created_at: OffsetDateTime,
    pub audio: Bytes,
}

impl HistoryEntry {
    pub fn new(
        request: &SynthesisRequest,
        language_name: impl Into<String>,
        voice_display: impl Into<String>,
        audio: Bytes,
    ) -> Self {
        Self {
            text: request.text.clone(),
            language_code: request.language_code.clone(),
            language_name: language_name.into(),
            voice_name: request.voice_name.clone(),
            voice_display: voice_display.into(),
            speed: request.speaking_rate,
            created_at: OffsetDateTime::now_utc(),
            audio,
        }
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        self.created_at
            .format(&format)
            .unwrap_or_else(|_| self.created_at.to_string())
    }
}

#[derive(Debug, Default, Clone)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` at index 0.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// Remove and return the entry at `index`, `None` when out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<HistoryEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> HistoryEntry {
        let request = SynthesisRequest::new(text, "en-US-Chirp3-HD-Charon", "en-US", 1.0);
        HistoryEntry::new(
            &request,
            "English (United States)",
            "en-US-Chirp3-HD-Charon",
            Bytes::from_static(b"ID3"),
        )
    }

    #[test]
    fn test_append_is_newest_first() {
        let mut log = HistoryLog::new();
        log.append(entry("first"));
        log.append(entry("second"));
        log.append(entry("third"));

        let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_remove_head_promotes_second() {
        let mut log = HistoryLog::new();
        for i in 0..5 {
            log.append(entry(&format!("entry {i}")));
        }
        let second = log.get(1).unwrap().text.clone();

        let removed = log.remove_at(0).unwrap();
        assert_eq!(removed.text, "entry 4");
        assert_eq!(log.len(), 4);
        assert_eq!(log.get(0).unwrap().text, second);
    }

    #[test]
    fn test_remove_out_of_range_is_none() {
        let mut log = HistoryLog::new();
        assert!(log.remove_at(0).is_none());
        log.append(entry("only"));
        assert!(log.remove_at(1).is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_entry_copies_request_fields() {
        let e = entry("hello");
        assert_eq!(e.text, "hello");
        assert_eq!(e.language_code, "en-US");
        assert_eq!(e.voice_name, "en-US-Chirp3-HD-Charon");
        assert_eq!(e.speed, 1.0);
        assert_eq!(e.audio.as_ref(), b"ID3");
    }

    #[test]
    fn test_timestamp_format() {
        let mut e = entry("hello");
        e.created_at = time::macros::datetime!(2024-03-05 07:08:09 UTC);
        assert_eq!(e.timestamp(), "2024-03-05 07:08:09");
    }
}
