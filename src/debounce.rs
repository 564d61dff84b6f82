use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// Turns a stream of rapid query updates into a settled value that is only
/// published after a quiet period of `window` with no further updates.
///
/// Updates equal to the previous raw input are suppressed outright; during a
/// burst only the most recent value survives, intermediate values are
/// dropped, never queued. `update` must be called from within a Tokio
/// runtime.
pub struct Debouncer {
    inner: Arc<Inner>,
    rx: watch::Receiver<String>,
}

struct Inner {
    window: Duration,
    last_input: Mutex<String>,
    generation: AtomicU64,
    tx: watch::Sender<String>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        let (tx, rx) = watch::channel(String::new());
        Self {
            inner: Arc::new(Inner {
                window,
                last_input: Mutex::new(String::new()),
                generation: AtomicU64::new(0),
                tx,
            }),
            rx,
        }
    }

    /// Receiver for settled values. Starts out holding the empty query.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.rx.clone()
    }

    pub fn update(&self, value: &str) {
        {
            let mut last = self.inner.last_input.lock().unwrap();
            if *last == value {
                return;
            }
            *last = value.to_string();
        }

        // Each update supersedes any timer still sleeping; a stale timer
        // notices via the generation counter and emits nothing.
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        let value = value.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(inner.window).await;
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.tx.send_replace(value);
            }
        });
    }
}
