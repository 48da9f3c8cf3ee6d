use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::Record;

/// All anti-cheat names known to the editor, derived once from the loaded
/// collection. Names typed in later are not added.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct AntiCheatVocabulary {
    names: Vec<String>,
}

impl AntiCheatVocabulary {
    pub fn from_records(records: &[Record]) -> Self {
        AntiCheatVocabulary {
            names: records
                .iter()
                .flat_map(|record| record.anticheats.iter())
                .filter(|name| !name.is_empty())
                .unique()
                .sorted()
                .cloned()
                .collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Value/label pairs for a multi-select input.
    pub fn options(&self) -> Vec<SelectOption> {
        self.names
            .iter()
            .map(|name| SelectOption {
                value: name.clone(),
                label: name.clone(),
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}
