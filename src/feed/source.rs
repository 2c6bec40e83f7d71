//! Paged review sources.
//!
//! The pagination engine only ever talks to a [`ReviewSource`]; the HTTP and
//! file-backed implementations below are the two shipped with the app.

use std::path::PathBuf;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::{FeedError, ReviewPage};

/// A remote collection of reviews fetched by offset/limit.
///
/// `fetch_page` must not block: it returns a future that the engine spawns
/// onto the runtime, so the future has to be `Send + 'static`.
pub trait ReviewSource: Send + Sync {
    /// Human-readable label shown in logs.
    fn name(&self) -> &str;

    fn fetch_page(&self, offset: usize, limit: usize)
    -> BoxFuture<'static, Result<ReviewPage, FeedError>>;
}

/// Reviews served over HTTP as `GET <endpoint>?offset=<o>&limit=<l>`.
pub struct HttpReviewSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReviewSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// Append the paging query to an endpoint that may already carry one.
fn page_url(endpoint: &str, offset: usize, limit: usize) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}offset={offset}&limit={limit}")
}

impl ReviewSource for HttpReviewSource {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> BoxFuture<'static, Result<ReviewPage, FeedError>> {
        let client = self.client.clone();
        let url = page_url(&self.endpoint, offset, limit);

        async move {
            let response = client.get(&url).send().await?.error_for_status()?;
            let body = response.bytes().await?;
            let page: ReviewPage = serde_json::from_slice(&body)?;
            Ok(page)
        }
        .boxed()
    }
}

/// Reviews read from a local JSON document holding the whole collection,
/// sliced to the requested window on every call.
pub struct FileReviewSource {
    path: PathBuf,
    label: String,
}

impl FileReviewSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

impl ReviewSource for FileReviewSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> BoxFuture<'static, Result<ReviewPage, FeedError>> {
        let path = self.path.clone();

        async move {
            let body = tokio::fs::read(&path).await?;
            let page: ReviewPage = serde_json::from_slice(&body)?;
            Ok(page.window(offset, limit))
        }
        .boxed()
    }
}
