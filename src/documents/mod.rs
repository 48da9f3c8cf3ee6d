mod anticheats;
mod record;
pub mod seed;
mod sub_items;

pub use anticheats::*;
pub use record::*;
pub use sub_items::*;
