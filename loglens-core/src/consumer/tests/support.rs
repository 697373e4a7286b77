use crate::consumer::source::with_timeout;
use crate::consumer::{ShardSource, SourceError};
use crate::model::ResultCategory;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory source. `listable = false` behaves like static HTTP hosting.
#[derive(Default)]
pub struct MemorySource {
    pub files: Mutex<BTreeMap<(ResultCategory, String), String>>,
    pub listable: bool,
    pub fetches: AtomicUsize,
    pub list_calls: AtomicUsize,
    /// Categories whose every call hangs until `stall_timeout` elapses.
    pub stalled: BTreeSet<ResultCategory>,
    pub stall_timeout: Duration,
}

impl MemorySource {
    pub fn listable() -> Self {
        Self {
            listable: true,
            ..Default::default()
        }
    }

    pub fn unlistable() -> Self {
        Self::default()
    }

    pub fn with(self, category: ResultCategory, name: &str, body: &str) -> Self {
        self.put(category, name, body);
        self
    }

    pub fn put(&self, category: ResultCategory, name: &str, body: &str) {
        self.files
            .lock()
            .unwrap()
            .insert((category, name.to_string()), body.to_string());
    }

    pub fn remove(&self, category: ResultCategory, name: &str) {
        self.files
            .lock()
            .unwrap()
            .remove(&(category, name.to_string()));
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Makes `category` behave like a host that accepts requests and never answers.
    pub fn stalled(mut self, category: ResultCategory, timeout: Duration) -> Self {
        self.stalled.insert(category);
        self.stall_timeout = timeout;
        self
    }

    async fn stall(&self, category: ResultCategory, name: Option<&str>) -> SourceError {
        let location = self.location(category, name);
        let hung = with_timeout(self.stall_timeout, &location, async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        })
        .await;

        match hung {
            Err(e) => e,
            Ok(()) => SourceError::NotFound { location },
        }
    }
}

#[async_trait]
impl ShardSource for MemorySource {
    fn location(&self, category: ResultCategory, name: Option<&str>) -> String {
        format!("mem://{category}/{}", name.unwrap_or_default())
    }

    async fn list(&self, category: ResultCategory) -> Result<Option<Vec<String>>, SourceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.stalled.contains(&category) {
            return Err(self.stall(category, None).await);
        }
        if !self.listable {
            return Ok(None);
        }
        let files = self.files.lock().unwrap();
        Ok(Some(
            files
                .keys()
                .filter(|(c, _)| *c == category)
                .map(|(_, name)| name.clone())
                .collect(),
        ))
    }

    async fn exists(&self, category: ResultCategory, name: &str) -> Result<bool, SourceError> {
        if self.stalled.contains(&category) {
            return Err(self.stall(category, Some(name)).await);
        }
        Ok(self
            .files
            .lock()
            .unwrap()
            .contains_key(&(category, name.to_string())))
    }

    async fn fetch(&self, category: ResultCategory, name: &str) -> Result<String, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.stalled.contains(&category) {
            return Err(self.stall(category, Some(name)).await);
        }
        self.files
            .lock()
            .unwrap()
            .get(&(category, name.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                location: self.location(category, Some(name)),
            })
    }
}
