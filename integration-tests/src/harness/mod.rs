pub mod silent_server;
pub mod static_server;
pub mod tracing;

pub use silent_server::SilentServer;
pub use static_server::StaticServer;
pub use tracing::{CapturedEvent, init_test_tracing};
