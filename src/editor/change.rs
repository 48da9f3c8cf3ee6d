use serde::{Deserialize, Serialize};

use super::FieldPath;

/// Which sub-sequence of a record an operation addresses.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubItemKind {
    Updates,
    Notes,
}

impl SubItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubItemKind::Updates => "updates",
            SubItemKind::Notes => "notes",
        }
    }
}

/// A structural or field mutation that was applied to the collection.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum Change {
    RecordInserted {
        index: usize,
    },
    RecordRemoved {
        index: usize,
    },
    FieldSet {
        index: usize,
        path: FieldPath,
    },
    SubItemInserted {
        index: usize,
        kind: SubItemKind,
        sub_index: usize,
    },
    SubItemRemoved {
        index: usize,
        kind: SubItemKind,
        sub_index: usize,
    },
}

/// Published to subscribers after every successful mutation. `revision`
/// increases by one per mutation; `last` is the mutation that produced it.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct ChangeNotice {
    pub revision: u64,
    pub last: Option<Change>,
}
