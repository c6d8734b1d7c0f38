//! In-process loopback implementation of the shared property map
//!
//! A [`LoopbackHub`] plays the role of the logical replicated map; any number
//! of views attach to it (the benchmark uses two: local and remote). Commits
//! apply staged operations to the hub's entry table and fan change events out
//! to every attached view. Delivery to each view goes through a dedicated
//! forwarder task so events keep their commit order even when a propagation
//! delay is configured.

use super::{MapEvent, SharedPropertyMap};
use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Operation staged on a view between `set`/`delete` and `commit`.
#[derive(Debug, Clone)]
enum StagedOp {
    Set { key: String, value: String },
    Delete { key: String },
}

struct HubInner {
    entries: HashMap<String, String>,
    /// Per-view senders feeding the ordered forwarder tasks
    subscribers: Vec<(u64, mpsc::UnboundedSender<MapEvent>)>,
}

/// The logical replicated map every view attaches to.
pub struct LoopbackHub {
    map_id: String,
    propagation_delay: Duration,
    next_view_id: AtomicU64,
    inner: Arc<Mutex<HubInner>>,
}

impl LoopbackHub {
    /// Create a hub for the given map id, or mint a fresh id when absent.
    pub fn new(map_id: Option<String>) -> Self {
        Self {
            map_id: map_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            propagation_delay: Duration::ZERO,
            next_view_id: AtomicU64::new(0),
            inner: Arc::new(Mutex::new(HubInner {
                entries: HashMap::new(),
                subscribers: Vec::new(),
            })),
        }
    }

    /// Simulated propagation latency between a commit and the event arriving
    /// at the attached views.
    pub fn with_propagation_delay(mut self, delay: Duration) -> Self {
        self.propagation_delay = delay;
        self
    }

    /// Identifier of this logical map.
    pub fn map_id(&self) -> String {
        self.map_id.clone()
    }

    /// Attach a new view; its change notifications arrive on `events`.
    ///
    /// Must be called from within a tokio runtime: each view gets a
    /// forwarder task that preserves commit order while applying the
    /// configured propagation delay.
    pub fn attach(&self, events: mpsc::UnboundedSender<MapEvent>) -> LoopbackView {
        let view_id = self.next_view_id.fetch_add(1, Ordering::Relaxed);
        let (queue_tx, mut queue_rx) = mpsc::unbounded_channel::<MapEvent>();
        let delay = self.propagation_delay;

        tokio::spawn(async move {
            while let Some(event) = queue_rx.recv().await {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if events.send(event).is_err() {
                    break;
                }
            }
        });

        {
            // A poisoned lock only means another view panicked mid-commit;
            // the entry table itself is still usable
            let mut inner = match self.inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            inner.subscribers.push((view_id, queue_tx));
        }

        LoopbackView {
            view_id,
            map_id: self.map_id.clone(),
            inner: Arc::clone(&self.inner),
            staged: Mutex::new(Vec::new()),
        }
    }
}

/// One view (handle) onto a [`LoopbackHub`].
pub struct LoopbackView {
    #[allow(dead_code)]
    view_id: u64,
    map_id: String,
    inner: Arc<Mutex<HubInner>>,
    staged: Mutex<Vec<StagedOp>>,
}

impl LoopbackView {
    /// Number of operations staged but not yet committed.
    pub fn staged_len(&self) -> usize {
        self.staged.lock().map(|staged| staged.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl SharedPropertyMap for LoopbackView {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|_| AppError::map("staged operation lock poisoned"))?;
        staged.push(StagedOp::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|_| AppError::map("staged operation lock poisoned"))?;
        staged.push(StagedOp::Delete {
            key: key.to_string(),
        });
        Ok(())
    }

    async fn has(&self, key: &str) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.entries.contains_key(key))
            .unwrap_or(false)
    }

    async fn commit(&self) -> Result<()> {
        let ops: Vec<StagedOp> = {
            let mut staged = self
                .staged
                .lock()
                .map_err(|_| AppError::map("staged operation lock poisoned"))?;
            staged.drain(..).collect()
        };

        if ops.is_empty() {
            return Ok(());
        }

        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::map("hub lock poisoned"))?;

        for op in ops {
            let event = match op {
                StagedOp::Set { key, value } => {
                    let existed = inner.entries.insert(key.clone(), value.clone()).is_some();
                    if existed {
                        MapEvent::Updated { key, value }
                    } else {
                        MapEvent::Inserted { key, value }
                    }
                }
                StagedOp::Delete { key } => {
                    inner.entries.remove(&key);
                    MapEvent::Deleted { key }
                }
            };

            // Dead subscribers are dropped on the next commit
            inner
                .subscribers
                .retain(|(_, sender)| sender.send(event.clone()).is_ok());
        }

        Ok(())
    }

    fn map_id(&self) -> String {
        self.map_id.clone()
    }
}
