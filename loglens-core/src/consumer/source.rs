use crate::consumer::SourceError;
use crate::model::ResultCategory;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where analyzer output is read from.
///
/// Implementations differ in what they can do: a filesystem can list a category
/// directory, a plain static file server usually cannot. `list` reports that
/// difference with `Ok(None)` rather than an error.
#[async_trait]
pub trait ShardSource: Send + Sync {
    /// Human-readable location of a category directory, or of one shard in it.
    fn location(&self, category: ResultCategory, name: Option<&str>) -> String;

    /// Entry names in the category directory, or `None` if this source cannot list.
    async fn list(&self, category: ResultCategory) -> Result<Option<Vec<String>>, SourceError>;

    async fn exists(&self, category: ResultCategory, name: &str) -> Result<bool, SourceError>;

    async fn fetch(&self, category: ResultCategory, name: &str) -> Result<String, SourceError>;
}

pub(super) async fn with_timeout<T>(
    timeout: Duration,
    location: &str,
    fut: impl Future<Output = Result<T, SourceError>>,
) -> Result<T, SourceError> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| SourceError::Timeout {
            location: location.to_string(),
        })?
}

//-----------------------------------------------------------------------------
// Local filesystem
//-----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
    timeout: Duration,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            root: root.into(),
            timeout,
        }
    }

    fn path(&self, category: ResultCategory, name: Option<&str>) -> PathBuf {
        let dir = self.root.join(category.as_str());
        match name {
            Some(name) => dir.join(name),
            None => dir,
        }
    }
}

#[async_trait]
impl ShardSource for LocalSource {
    fn location(&self, category: ResultCategory, name: Option<&str>) -> String {
        self.path(category, name).display().to_string()
    }

    async fn list(&self, category: ResultCategory) -> Result<Option<Vec<String>>, SourceError> {
        let dir = self.path(category, None);
        let location = dir.display().to_string();

        let names = with_timeout(self.timeout, &location, async {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| SourceError::io(&location, e))?;

            let mut names = Vec::new();
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| SourceError::io(&location, e))?
            {
                let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
                if is_file {
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
            Ok::<_, SourceError>(names)
        })
        .await?;

        Ok(Some(names))
    }

    async fn exists(&self, category: ResultCategory, name: &str) -> Result<bool, SourceError> {
        let path = self.path(category, Some(name));
        let location = path.display().to_string();

        with_timeout(self.timeout, &location, async {
            match tokio::fs::metadata(&path).await {
                Ok(meta) => Ok(meta.is_file()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
                Err(e) => Err(SourceError::io(&location, e)),
            }
        })
        .await
    }

    async fn fetch(&self, category: ResultCategory, name: &str) -> Result<String, SourceError> {
        let path = self.path(category, Some(name));
        let location = path.display().to_string();

        let bytes = with_timeout(self.timeout, &location, async {
            tokio::fs::read(&path)
                .await
                .map_err(|e| SourceError::io(&location, e))
        })
        .await?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

//-----------------------------------------------------------------------------
// Static HTTP hosting
//-----------------------------------------------------------------------------

/// Reads categories from `<base_url>/<base_path>/<category>/<name>`.
///
/// Static hosting offers no directory listing, so discovery over HTTP always
/// falls through to probing. Freshly written shards carry a uuid in their name
/// and are only found once they are also published under a probe name.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str, base_path: &str, timeout: Duration) -> Result<Self, SourceError> {
        let mut root = base_url.trim_end_matches('/').to_string();
        root.push('/');

        let base_path = base_path.trim_matches('/');
        if !base_path.is_empty() {
            root.push_str(base_path);
            root.push('/');
        }

        let base = Url::parse(&root).map_err(|e| SourceError::InvalidUrl {
            url: root.clone(),
            source: e,
        })?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::http(&root, e))?;

        Ok(Self { base, client })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, category: ResultCategory, name: Option<&str>) -> Result<Url, SourceError> {
        let relative = match name {
            Some(name) => format!("{category}/{name}"),
            None => format!("{category}/"),
        };

        self.base
            .join(&relative)
            .map_err(|e| SourceError::InvalidUrl {
                url: format!("{}{relative}", self.base),
                source: e,
            })
    }
}

#[async_trait]
impl ShardSource for HttpSource {
    fn location(&self, category: ResultCategory, name: Option<&str>) -> String {
        match self.url(category, name) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{category}/{}", self.base, name.unwrap_or_default()),
        }
    }

    async fn list(&self, _category: ResultCategory) -> Result<Option<Vec<String>>, SourceError> {
        Ok(None)
    }

    async fn exists(&self, category: ResultCategory, name: &str) -> Result<bool, SourceError> {
        let url = self.url(category, Some(name))?;
        let location = url.to_string();

        let res = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| SourceError::http(&location, e))?;

        match res.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND | StatusCode::GONE => Ok(false),
            // Some static hosts only answer GET.
            StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED => {
                match self.fetch(category, name).await {
                    Ok(_) => Ok(true),
                    Err(e) if e.is_not_found() => Ok(false),
                    Err(e) => Err(e),
                }
            }
            s => Err(SourceError::Status {
                location,
                status: s.as_u16(),
            }),
        }
    }

    async fn fetch(&self, category: ResultCategory, name: &str) -> Result<String, SourceError> {
        let url = self.url(category, Some(name))?;
        let location = url.to_string();

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::http(&location, e))?;

        match res.status() {
            s if s.is_success() => res.text().await.map_err(|e| SourceError::http(&location, e)),
            StatusCode::NOT_FOUND | StatusCode::GONE => Err(SourceError::NotFound { location }),
            s => Err(SourceError::Status {
                location,
                status: s.as_u16(),
            }),
        }
    }
}
