mod error;
mod loader;
mod types;


pub use error::ConfigError;
pub use loader::{load_viewer_config, parse_viewer_config};
pub use types::ViewerConfig;
