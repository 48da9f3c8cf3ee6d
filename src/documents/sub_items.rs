use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dated status change for a game, e.g. a developer announcement.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct Update {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub reference: String,

    #[serde(default)]
    pub date: String,
}

impl Update {
    /// Returns an empty update stamped with `date` as given.
    pub fn dated(date: impl Into<String>) -> Self {
        Update {
            date: date.into(),
            ..Default::default()
        }
    }
}

/// Formats `time` the way update dates are stored,
/// e.g. `Sat, 17 Oct 2026 09:30:00 GMT`.
pub fn update_timestamp(time: DateTime<Utc>) -> String {
    time.format(UPDATE_DATE_FORMAT).to_string()
}

const UPDATE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A `[title, reference url]` pair. Either slot may be missing.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct Note(pub [Option<String>; 2]);

impl Note {
    pub const TITLE: usize = 0;
    pub const REFERENCE: usize = 1;

    pub fn new(title: impl Into<String>, reference: impl Into<String>) -> Self {
        Note([Some(title.into()), Some(reference.into())])
    }

    pub fn title(&self) -> Option<&str> {
        self.0[Self::TITLE].as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.0[Self::REFERENCE].as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_format() {
        let time = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        assert_eq!(update_timestamp(time), "Sat, 17 Oct 2026 09:30:00 GMT");
    }

    #[test]
    fn empty_note_keeps_both_slots() {
        let json = serde_json::to_string(&Note::default()).unwrap();
        assert_eq!(json, "[null,null]");

        let note: Note = serde_json::from_str(r#"[null,"https://example.com"]"#).unwrap();
        assert_eq!(note.title(), None);
        assert_eq!(note.reference(), Some("https://example.com"));
    }
}
