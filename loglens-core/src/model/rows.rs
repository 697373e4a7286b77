use serde::{Deserialize, Serialize};

// Field names here are the current on-disk shape. Readers must not depend on
// them; see consumer::normalize for the aliases they accept.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountRow {
    pub status_code: u16,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCountRow {
    pub url: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpCountRow {
    pub ip_address: String,
    pub count: u64,
}
