use serde::{Deserialize, Serialize};

/// Progress of the current submission attempt.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Success(Notice),
    Failure(FailureKind, Notice),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    /// True for `Success` and `Failure`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Success(_) | SubmissionState::Failure(..)
        )
    }

    /// The user-facing message of a terminal state.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            SubmissionState::Success(notice) | SubmissionState::Failure(_, notice) => Some(notice),
            _ => None,
        }
    }

    pub(crate) fn success() -> Self {
        SubmissionState::Success(Notice {
            title: "Submitted!".to_owned(),
            message: "Your requested changes were successfully sent off for processing and \
                      review. Please wait up to 72 hours for changes to propagate."
                .to_owned(),
        })
    }

    pub(crate) fn rejected() -> Self {
        SubmissionState::Failure(
            FailureKind::Rejected,
            Notice {
                title: "No luck, try again later.".to_owned(),
                message: "A small problem occurred when trying to submit your changes. \
                          Please wait at least 5 minutes before retrying."
                    .to_owned(),
            },
        )
    }

    pub(crate) fn unreachable() -> Self {
        SubmissionState::Failure(
            FailureKind::Unreachable,
            Notice {
                title: "Possible Server Issue.".to_owned(),
                message: "There was a problem reaching the submission server. \
                          Please try again later."
                    .to_owned(),
            },
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum FailureKind {
    /// The endpoint answered but declined the payload.
    Rejected,
    /// The exchange did not complete.
    Unreachable,
}

#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct Notice {
    pub title: String,
    pub message: String,
}
