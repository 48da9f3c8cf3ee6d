mod change;
mod collection;
mod field_path;
mod session;
mod snapshot;
mod validation;

pub use change::*;
pub use collection::{CollectionStore, SubItem};
pub use field_path::*;
pub use session::EditorSession;
pub use snapshot::Snapshot;
pub use validation::*;
