use std::net::TcpListener;
use std::thread;

/// Accepts connections and never writes a byte back.
pub struct SilentServer {
    base_url: String,
}

impl SilentServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind silent server");
        let addr = listener.local_addr().expect("no local addr");

        thread::spawn(move || {
            // connections stay open for the life of the test process
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                held.push(stream);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
