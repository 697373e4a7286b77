use crate::model::ResultCategory;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Where a value may live in a raw row: a named field of an object row, or a
/// position in an array row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Named(&'static str),
    Position(usize),
}

impl FieldKey {
    fn lookup<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        let value = match self {
            FieldKey::Named(name) => row.as_object()?.get(*name),
            FieldKey::Position(index) => row.as_array()?.get(*index),
        };
        value.filter(|v| !v.is_null())
    }
}

/// Ordered candidate keys for one category. Earlier entries win.
#[derive(Debug, Clone, Copy)]
pub struct FieldCandidates {
    pub dimension: &'static [FieldKey],
    pub count: &'static [FieldKey],
}

// `_1`/`_2` are the tuple-style names older writers produced.
const COUNT_KEYS: &[FieldKey] = &[
    FieldKey::Named("count"),
    FieldKey::Named("cnt"),
    FieldKey::Named("_2"),
    FieldKey::Position(1),
];

const STATUS_KEYS: &[FieldKey] = &[
    FieldKey::Named("statusCode"),
    FieldKey::Named("status_code"),
    FieldKey::Named("status"),
    FieldKey::Named("_1"),
    FieldKey::Position(0),
];

const URL_KEYS: &[FieldKey] = &[
    FieldKey::Named("url"),
    FieldKey::Named("path"),
    FieldKey::Named("uri"),
    FieldKey::Named("_1"),
    FieldKey::Position(0),
];

const IP_KEYS: &[FieldKey] = &[
    FieldKey::Named("ipAddress"),
    FieldKey::Named("ip_address"),
    FieldKey::Named("ip"),
    FieldKey::Named("clientIp"),
    FieldKey::Named("_1"),
    FieldKey::Position(0),
];

pub fn candidates(category: ResultCategory) -> FieldCandidates {
    let dimension = match category {
        ResultCategory::StatusCounts => STATUS_KEYS,
        ResultCategory::TopUrls => URL_KEYS,
        ResultCategory::TopIps => IP_KEYS,
    };

    FieldCandidates {
        dimension,
        count: COUNT_KEYS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRow {
    pub dimension: String,
    pub count: u64,
}

fn first_present<'a>(keys: &[FieldKey], row: &'a Value) -> Option<&'a Value> {
    keys.iter().find_map(|key| key.lookup(row))
}

fn dimension_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(integral_u64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_u64))
        }
        _ => None,
    }
}

fn integral_u64(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then_some(f as u64)
}

/// Maps one raw row onto the canonical shape for `category`.
///
/// The first present candidate is used for each of dimension and count. A row
/// without a usable dimension is dropped; a missing or unreadable count becomes 0
/// and the row is kept.
pub fn normalize_row(category: ResultCategory, row: &Value) -> Option<CanonicalRow> {
    let keys = candidates(category);

    let dimension = first_present(keys.dimension, row).and_then(dimension_text)?;
    let count = first_present(keys.count, row)
        .and_then(coerce_count)
        .unwrap_or(0);

    Some(CanonicalRow { dimension, count })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBody {
    pub rows: Vec<CanonicalRow>,
    /// Lines that were not valid JSON.
    pub malformed_lines: usize,
    /// Valid JSON rows without a usable dimension.
    pub dropped_rows: usize,
}

/// Normalizes every JSON line of one shard. Bad lines are skipped individually.
pub fn normalize_body(category: ResultCategory, body: &str) -> NormalizedBody {
    let mut out = NormalizedBody::default();

    for (index, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value = match serde_json::from_str::<Value>(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(category = %category, line = index + 1, error = %e, "skipping malformed JSON line");
                out.malformed_lines += 1;
                continue;
            }
        };

        match normalize_row(category, &value) {
            Some(row) => out.rows.push(row),
            None => out.dropped_rows += 1,
        }
    }

    out
}
