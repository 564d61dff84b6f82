use crate::models::Config;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a playlist fetch came back empty-handed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("playlist is not valid UTF-8 text")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// Anything that can produce raw playlist text. The catalog is generic over
/// this so tests can feed it canned playlists without a server.
pub trait PlaylistSource: Send + Sync {
    fn fetch_playlist(&self) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetches the playlist from the configured HTTPS endpoint.
/// One request per call, no retries.
pub struct HttpPlaylistSource {
    client: reqwest::Client,
    playlist_url: String,
    timeout: Duration,
}

impl HttpPlaylistSource {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            playlist_url: cfg.playlist_url.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

impl PlaylistSource for HttpPlaylistSource {
    async fn fetch_playlist(&self) -> Result<String, FetchError> {
        log::info!("fetching playlist from {}", self.playlist_url);
        let response = self
            .client
            .get(&self.playlist_url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
