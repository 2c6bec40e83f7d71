use std::path::PathBuf;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    #[error("failed to fetch avatar: {0}")]
    Transport(String),

    #[error("failed to decode avatar: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for AvatarError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<std::io::Error> for AvatarError {
    fn from(e: std::io::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<image::ImageError> for AvatarError {
    fn from(e: image::ImageError) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Fetches the raw bytes of an avatar by resource id.
pub trait AvatarFetcher: Send + Sync {
    fn fetch(&self, resource: &str) -> BoxFuture<'static, Result<Vec<u8>, AvatarError>>;
}

/// Resolves `http(s)://` ids over the network and anything else
/// (`file://` or a bare path) from disk.
pub struct HttpAvatarFetcher {
    client: reqwest::Client,
}

impl HttpAvatarFetcher {
    pub fn new(timeout: Duration) -> Result<Self, AvatarError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

enum Location {
    Remote(String),
    Local(PathBuf),
}

fn locate(resource: &str) -> Location {
    if resource.starts_with("http://") || resource.starts_with("https://") {
        Location::Remote(resource.to_string())
    } else {
        let path = resource.strip_prefix("file://").unwrap_or(resource);
        Location::Local(PathBuf::from(path))
    }
}

impl AvatarFetcher for HttpAvatarFetcher {
    fn fetch(&self, resource: &str) -> BoxFuture<'static, Result<Vec<u8>, AvatarError>> {
        match locate(resource) {
            Location::Remote(url) => {
                let client = self.client.clone();
                async move {
                    let response = client.get(&url).send().await?.error_for_status()?;
                    Ok(response.bytes().await?.to_vec())
                }
                .boxed()
            }
            Location::Local(path) => async move { Ok(tokio::fs::read(&path).await?) }.boxed(),
        }
    }
}
