pub mod api;
pub mod documents;
pub mod editor;
pub mod logging;
pub mod submission;
pub mod traits;

mod status;
pub use status::Status;

mod tracing;
pub use crate::tracing::Tracing;
