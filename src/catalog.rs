use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;

use crate::debounce::Debouncer;
use crate::models::Channel;
use crate::network::PlaylistSource;
use crate::parser;
use crate::search;

pub const NO_CHANNELS_MESSAGE: &str = "No channels found in playlist.";

#[derive(Debug, Default)]
struct CatalogState {
    channels: Vec<Channel>,
    error_message: Option<String>,
    search_query: String,
    settled_query: String,
}

/// Owns the channel collection and its loading/search state.
///
/// `load` replaces the collection wholesale per successful fetch; a load
/// arriving while another is in flight is dropped. Search input is fed
/// through a [`Debouncer`] and only the settled query drives the filtered
/// view. Consumers poll the accessors or await [`Catalog::subscribe`] for a
/// revision bump on every state change.
pub struct Catalog<S> {
    source: S,
    state: Arc<Mutex<CatalogState>>,
    loading: AtomicBool,
    debouncer: Debouncer,
    changes: watch::Sender<u64>,
}

impl<S: PlaylistSource> Catalog<S> {
    /// Must be called from within a Tokio runtime; spawns the task that
    /// folds settled queries back into the catalog state.
    pub fn new(source: S, debounce_window: Duration) -> Self {
        let state = Arc::new(Mutex::new(CatalogState::default()));
        let debouncer = Debouncer::new(debounce_window);
        let (changes, _) = watch::channel(0u64);

        let mut settled_rx = debouncer.subscribe();
        let task_state = Arc::clone(&state);
        let task_changes = changes.clone();
        tokio::spawn(async move {
            while settled_rx.changed().await.is_ok() {
                let settled = settled_rx.borrow_and_update().clone();
                task_state.lock().unwrap().settled_query = settled;
                task_changes.send_modify(|rev| *rev += 1);
            }
        });

        Self {
            source,
            state,
            loading: AtomicBool::new(false),
            debouncer,
            changes,
        }
    }

    /// Fetch and parse the playlist, replacing the channel collection.
    ///
    /// Re-entrancy guarded: returns immediately when a load is already in
    /// flight. On fetch failure the previous collection is kept and only the
    /// error message changes. A successful fetch that parses to zero
    /// channels still replaces the collection and reports an informational
    /// message. The loading flag is dropped last in every branch.
    pub async fn load(&self) {
        if self
            .loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::debug!("playlist load already in flight, ignoring");
            return;
        }
        self.state.lock().unwrap().error_message = None;
        self.notify();

        let outcome = self.source.fetch_playlist().await;
        {
            let mut state = self.state.lock().unwrap();
            match outcome {
                Ok(text) => {
                    let channels = parser::parse(&text);
                    log::info!("parsed {} channels from playlist", channels.len());
                    if channels.is_empty() {
                        state.error_message = Some(NO_CHANNELS_MESSAGE.to_string());
                    }
                    state.channels = channels;
                }
                Err(e) => {
                    log::warn!("playlist load failed: {e}");
                    state.error_message = Some(e.to_string());
                }
            }
        }
        self.loading.store(false, Ordering::SeqCst);
        self.notify();
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.state.lock().unwrap().channels.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.lock().unwrap().error_message.clone()
    }

    /// The raw query exactly as last typed.
    pub fn search_query(&self) -> String {
        self.state.lock().unwrap().search_query.clone()
    }

    /// The debounced projection of the raw query.
    pub fn settled_query(&self) -> String {
        self.state.lock().unwrap().settled_query.clone()
    }

    /// Record the latest raw query and restart the quiescence window.
    pub fn set_search_query(&self, query: &str) {
        self.state.lock().unwrap().search_query = query.to_string();
        self.notify();
        self.debouncer.update(query);
    }

    /// The collection narrowed by the settled query, derived on read.
    pub fn filtered_channels(&self) -> Vec<Channel> {
        let state = self.state.lock().unwrap();
        search::filter_channels(&state.channels, &state.settled_query)
    }

    /// Revision counter bumped on every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        self.changes.send_modify(|rev| *rev += 1);
    }
}
