mod category;
mod record;
mod rows;

pub use category::{ResultCategory, UnknownCategory};
pub use record::LogRecord;
pub use rows::{IpCountRow, StatusCountRow, UrlCountRow};

/// Number of rows kept for the ranked categories.
pub const TOP_K: usize = 10;
