use std::fmt::Debug;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use valuable::Valuable;

use crate::{editor::Snapshot, log_event, logging::LogEvent, Status};

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub enum SubmitEvent {
    Finished(Attempt),
    Ignored { revision: u64 },
}

impl SubmitEvent {
    pub fn finished(snapshot: &Snapshot, outcome: &Result<StatusCode, Status>) {
        log_event!(LogEvent::Submit(SubmitEvent::Finished(Attempt {
            revision: snapshot.revision(),
            records: snapshot.len(),
            result: match outcome {
                Ok(code) => Response::Status(code.as_u16()),
                Err(status) => Response::Error(status.to_string()),
            },
        })));
    }

    pub fn ignored(revision: u64) {
        log_event!(LogEvent::Submit(SubmitEvent::Ignored { revision }));
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct Attempt {
    revision: u64,
    records: usize,
    result: Response,
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
enum Response {
    Status(u16),
    Error(String),
}
