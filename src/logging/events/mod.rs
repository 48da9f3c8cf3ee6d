mod edit_event;
mod submit_event;

pub use edit_event::*;
pub use submit_event::*;
