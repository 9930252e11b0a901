pub mod models;
pub mod utils;

pub use models::{League, UnifiedPlayerRecord};
pub use utils::{human_format, FormatError};
