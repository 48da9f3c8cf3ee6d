mod coordinator;
mod state;

pub use coordinator::SubmissionCoordinator;
pub use state::*;
