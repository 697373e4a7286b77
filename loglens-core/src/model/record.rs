use serde::Serialize;

/// One access-log line that fully matched the combined log pattern.
///
/// `timestamp` is kept verbatim; nothing downstream needs it as a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub ip_address: String,
    pub timestamp: String,
    pub method: String,
    pub url: String,
    pub status_code: u16,
    /// `-` in the log maps to 0.
    pub response_size: u64,
}
