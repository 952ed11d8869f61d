pub mod path;
pub mod table;
pub mod text;
pub mod time;

pub use time::format_elapsed;
