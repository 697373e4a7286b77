use crate::model::{IpCountRow, LogRecord, ResultCategory, StatusCountRow, UrlCountRow};
use ahash::AHashMap;
use rayon::prelude::*;
use serde::Serialize;
use std::hash::Hash;

/// Running per-key counts for one batch of records.
///
/// Tallies from different workers combine with [`RecordTally::merge`]; ranking
/// and truncation only happen in [`RecordTally::finish`].
#[derive(Debug, Clone, Default)]
pub struct RecordTally {
    records: u64,
    by_status: AHashMap<u16, u64>,
    by_url: AHashMap<String, u64>,
    by_ip: AHashMap<String, u64>,
}

impl RecordTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &LogRecord) {
        self.records += 1;
        *self.by_status.entry(record.status_code).or_insert(0) += 1;
        bump(&mut self.by_url, &record.url);
        bump(&mut self.by_ip, &record.ip_address);
    }

    pub fn merge(mut self, other: RecordTally) -> RecordTally {
        self.records += other.records;
        merge_counts(&mut self.by_status, other.by_status);
        merge_counts(&mut self.by_url, other.by_url);
        merge_counts(&mut self.by_ip, other.by_ip);
        self
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn finish(self) -> AggregationReport {
        let status_counts =
            rank_top_k(self.by_status, ResultCategory::StatusCounts.row_limit())
                .into_iter()
                .map(|(status_code, count)| StatusCountRow { status_code, count })
                .collect();

        let top_urls = rank_top_k(self.by_url, ResultCategory::TopUrls.row_limit())
            .into_iter()
            .map(|(url, count)| UrlCountRow { url, count })
            .collect();

        let top_ips = rank_top_k(self.by_ip, ResultCategory::TopIps.row_limit())
            .into_iter()
            .map(|(ip_address, count)| IpCountRow { ip_address, count })
            .collect();

        AggregationReport {
            status_counts,
            top_urls,
            top_ips,
        }
    }
}

// Avoids allocating a key String for every repeat hit.
fn bump(counts: &mut AHashMap<String, u64>, key: &str) {
    if let Some(count) = counts.get_mut(key) {
        *count += 1;
    } else {
        counts.insert(key.to_string(), 1);
    }
}

fn merge_counts<K: Eq + Hash>(into: &mut AHashMap<K, u64>, from: AHashMap<K, u64>) {
    for (key, count) in from {
        *into.entry(key).or_insert(0) += count;
    }
}

/// Orders by count descending, then key ascending, and keeps a strict prefix of
/// `limit` entries. An entry tied with the last kept one but ranked after it is dropped.
pub fn rank_top_k<K: Ord>(
    counts: impl IntoIterator<Item = (K, u64)>,
    limit: Option<usize>,
) -> Vec<(K, u64)> {
    let mut ranked: Vec<(K, u64)> = counts.into_iter().collect();
    ranked.sort_unstable_by(|(key_a, count_a), (key_b, count_b)| {
        count_b.cmp(count_a).then_with(|| key_a.cmp(key_b))
    });

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    ranked
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationReport {
    pub status_counts: Vec<StatusCountRow>,
    pub top_urls: Vec<UrlCountRow>,
    pub top_ips: Vec<IpCountRow>,
}

impl AggregationReport {
    pub fn row_count(&self, category: ResultCategory) -> usize {
        match category {
            ResultCategory::StatusCounts => self.status_counts.len(),
            ResultCategory::TopUrls => self.top_urls.len(),
            ResultCategory::TopIps => self.top_ips.len(),
        }
    }
}

pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> AggregationReport {
    let mut tally = RecordTally::new();
    for record in records {
        tally.push(record);
    }
    tally.finish()
}

pub fn aggregate_par(records: &[LogRecord]) -> AggregationReport {
    records
        .par_iter()
        .fold(RecordTally::new, |mut tally, record| {
            tally.push(record);
            tally
        })
        .reduce(RecordTally::new, RecordTally::merge)
        .finish()
}
