/// Scripts file watching
///
/// Every create/modify/delete of a scripts file anywhere under a root turns
/// into one `ReloadRequest` on a single channel. The consumer drains and
/// coalesces requests, so reloads never overlap.

use crate::error::Result;
use crate::host::workspace::WorkspaceRoot;
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Why a reload was asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadRequest {
    FileChanged(PathBuf),
    Manual,
}

/// Sending side of the reload channel
#[derive(Debug, Clone)]
pub struct ReloadSignal {
    tx: mpsc::UnboundedSender<ReloadRequest>,
}

impl ReloadSignal {
    pub fn request(&self, request: ReloadRequest) {
        // Receiver gone means we're shutting down
        let _ = self.tx.send(request);
    }
}

/// Receiving side. Only one exists, which is what serializes reloads.
#[derive(Debug)]
pub struct ReloadQueue {
    rx: mpsc::UnboundedReceiver<ReloadRequest>,
}

pub fn reload_channel() -> (ReloadSignal, ReloadQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ReloadSignal { tx }, ReloadQueue { rx })
}

impl ReloadQueue {
    /// Wait for a request, then swallow everything else arriving within
    /// `debounce`. Returns how many requests were merged, or None once every
    /// signal is dropped.
    pub async fn next_batch(&mut self, debounce: Duration) -> Option<usize> {
        self.rx.recv().await?;
        let mut merged = 1;

        let deadline = tokio::time::Instant::now() + debounce;
        loop {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(_)) => merged += 1,
                Ok(None) | Err(_) => break,
            }
        }

        debug!(merged, "coalesced reload requests");
        Some(merged)
    }
}

/// Is this event about a scripts file being created, changed or removed?
pub fn is_scripts_file_event(event: &Event, file_name: &str) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );

    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name().and_then(|n| n.to_str()) == Some(file_name))
}

/// Watches every root recursively; dropping it stops the events
pub struct ScriptsWatcher {
    _watcher: RecommendedWatcher,
}

impl ScriptsWatcher {
    pub fn start(roots: &[WorkspaceRoot], file_name: &str, signal: ReloadSignal) -> Result<Self> {
        let file_name = file_name.to_string();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_scripts_file_event(&event, &file_name) {
                        if let Some(path) = event.paths.first() {
                            signal.request(ReloadRequest::FileChanged(path.clone()));
                        }
                    }
                }
                Err(e) => warn!(error = %e, "watch error"),
            },
            NotifyConfig::default(),
        )?;

        for root in roots {
            watcher.watch(&root.path, RecursiveMode::Recursive)?;
            debug!(root = %root.path.display(), "watching");
        }

        Ok(Self { _watcher: watcher })
    }
}
