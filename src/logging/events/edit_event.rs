use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use valuable::Valuable;

use crate::{editor::Change, log_event, logging::LogEvent, Status};

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub enum EditEvent {
    Applied(Edit),
    Rejected(Rejection),
}

impl EditEvent {
    pub fn applied(change: &Change) {
        let edit = match change {
            Change::RecordInserted { index } => Edit::new("insert_record", *index),
            Change::RecordRemoved { index } => Edit::new("remove_record", *index),
            Change::FieldSet { index, path } => Edit {
                path: Some(path.to_string()),
                ..Edit::new("set_field", *index)
            },
            Change::SubItemInserted {
                index,
                kind,
                sub_index,
            } => Edit {
                path: Some(format!("{}.{sub_index}", kind.as_str())),
                ..Edit::new("insert_sub_item", *index)
            },
            Change::SubItemRemoved {
                index,
                kind,
                sub_index,
            } => Edit {
                path: Some(format!("{}.{sub_index}", kind.as_str())),
                ..Edit::new("remove_sub_item", *index)
            },
        };
        log_event!(LogEvent::Edit(EditEvent::Applied(edit)));
    }

    pub fn rejected(op: &str, index: usize, status: &Status) {
        log_event!(LogEvent::Edit(EditEvent::Rejected(Rejection {
            op: op.to_owned(),
            index,
            error: status.to_string(),
        })));
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct Edit {
    op: String,
    index: usize,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl Edit {
    fn new(op: &str, index: usize) -> Self {
        Edit {
            op: op.to_owned(),
            index,
            path: None,
        }
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct Rejection {
    op: String,
    index: usize,
    error: String,
}
