mod editor_layer;
mod event_span;
mod events;
mod log_event;

pub use editor_layer::EditorLogsLayer;
use event_span::*;
pub use events::*;
pub use log_event::*;
