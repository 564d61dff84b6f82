use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

/// A single playable stream entry from the playlist.
/// Immutable once constructed; the id is unique per process and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    pub name: String,
    pub url: Url,
    #[serde(default)]
    pub logo_url: Option<Url>,
    #[serde(default)]
    pub group: Option<String>,
}

static NEXT_CHANNEL_ID: AtomicU64 = AtomicU64::new(1);

impl Channel {
    pub fn new(name: String, url: Url, logo_url: Option<Url>, group: Option<String>) -> Self {
        Self {
            id: NEXT_CHANNEL_ID.fetch_add(1, Ordering::Relaxed),
            name,
            url,
            logo_url,
            group,
        }
    }
}

fn default_playlist_url() -> String {
    "https://iptv-org.github.io/iptv/index.m3u".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_search_debounce_ms() -> u64 {
    300
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_playlist_url")]
    pub playlist_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playlist_url: default_playlist_url(),
            timeout_secs: default_timeout_secs(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}
