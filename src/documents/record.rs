use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use crate::Status;

use super::{Note, Update};

/// Document type for a single tracked game title as it appears in
/// `games.json` and in the submission payload.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub url: String,

    pub slug: String,
    pub name: String,

    #[serde(default)]
    pub logo: String,

    #[serde(default)]
    pub native: bool,

    #[serde(default)]
    pub status: GameStatus,

    #[serde(default)]
    pub reference: String,

    /// Anti-cheat names in use. Duplicates carry no meaning so they are kept
    /// as a set.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_anticheats")]
    pub anticheats: BTreeSet<String>,

    #[serde(default)]
    pub updates: Vec<Update>,

    #[serde(default)]
    pub notes: Vec<Note>,

    /// Storefront ids. Passed through untouched.
    #[serde(default)]
    pub store_ids: BTreeMap<String, serde_json::Value>,
}

impl Record {
    /// Returns a blank record with default field values under `slug`.
    pub fn placeholder(slug: impl Into<String>) -> Self {
        Record {
            slug: slug.into(),
            ..Default::default()
        }
    }
}

/// Accepts `null` entries in the anti-cheat list. Older form submissions
/// produced `[null]` for a freshly added game.
fn deserialize_anticheats<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let names = Vec::<Option<String>>::deserialize(deserializer)?;
    Ok(names.into_iter().flatten().collect())
}

#[derive(Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameStatus {
    #[default]
    Broken,
    Running,
    Denied,
    Supported,
    Planned,
}

impl GameStatus {
    pub const ALL: [GameStatus; 5] = [
        GameStatus::Broken,
        GameStatus::Running,
        GameStatus::Denied,
        GameStatus::Supported,
        GameStatus::Planned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Broken => "Broken",
            GameStatus::Running => "Running",
            GameStatus::Denied => "Denied",
            GameStatus::Supported => "Supported",
            GameStatus::Planned => "Planned",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = Status;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Status::invalid_argument(format!("Unknown game status '{s}'")))
    }
}
