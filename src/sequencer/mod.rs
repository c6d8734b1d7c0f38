//! Timed write/measure sequencing against a shared property map
//!
//! The sequencer performs one "run": a cleanup pass deleting every key left
//! over from the previous run, then a bounded sequence of timed writes with a
//! fixed settle delay between operations. The delay is deliberate
//! backpressure for the map's commit pipeline, not a cosmetic pause.
//!
//! Run completion is detected by an explicit expected/confirmed counter
//! ([`CompletionTracker`]) fed by the remote view's change notifications,
//! and state transitions are published through a watch channel so callers
//! observe immutable snapshots instead of shared mutable flags.

use crate::{
    error::{AppError, Result},
    generator::ValueGenerator,
    ledger::{now_ms, TimingLedger},
    map::SharedPropertyMap,
};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Sequencer lifecycle state as displayed by the UI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Ready to start the next run
    Idle,
    /// A run is in flight (cleanup or writes or awaiting confirmations)
    Running,
}

impl RunState {
    /// Label shown on the trigger control
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Idle => "Start e2e",
            RunState::Running => "Running",
        }
    }
}

/// Events emitted as a run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Cleanup finished and the write loop is starting
    RunStarted { expected: usize },
    /// One write was committed to the local view
    WriteCommitted { key: String },
    /// Every expected key was confirmed by the remote view
    RunCompleted,
}

/// Sequencer configuration
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Number of timed writes per run
    pub count: u32,
    /// Settle delay between successive operations
    pub settle_delay: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            count: crate::defaults::DEFAULT_RUN_COUNT,
            settle_delay: crate::defaults::DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Log of one completed write loop.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    /// Operation keys in issue order ("0".."N-1")
    pub keys: Vec<String>,
    /// Byte length of each generated payload, in issue order
    pub payload_samples: Vec<usize>,
}

/// Tracks confirmed keys against the expected count of a run.
///
/// Replaces the fragile "key ends with the last loop index" completion
/// convention: the run is complete exactly when the number of distinct
/// confirmed keys reaches the expected count.
#[derive(Debug)]
pub struct CompletionTracker {
    expected: usize,
    confirmed: HashSet<String>,
}

impl CompletionTracker {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            confirmed: HashSet::with_capacity(expected),
        }
    }

    /// Record a remote confirmation for `key`.
    ///
    /// Returns true when this confirmation completes the run. Duplicate
    /// confirmations for the same key are counted once.
    pub fn confirm(&mut self, key: &str) -> bool {
        self.confirmed.insert(key.to_string());
        self.confirmed.len() == self.expected
    }

    /// Number of distinct confirmed keys so far
    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }

    /// Expected number of confirmations
    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn is_complete(&self) -> bool {
        self.confirmed.len() >= self.expected
    }
}

/// Drives the cleanup and write phases of a run.
pub struct Sequencer {
    config: SequencerConfig,
    state_tx: watch::Sender<RunState>,
    events_tx: mpsc::UnboundedSender<RunEvent>,
}

impl Sequencer {
    /// Create a sequencer plus the receiver for its run events.
    pub fn new(config: SequencerConfig) -> (Self, mpsc::UnboundedReceiver<RunEvent>) {
        let (state_tx, _) = watch::channel(RunState::Idle);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (
            Self {
                config,
                state_tx,
                events_tx,
            },
            events_rx,
        )
    }

    /// Subscribe to state transitions.
    pub fn state_rx(&self) -> watch::Receiver<RunState> {
        self.state_tx.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> RunState {
        *self.state_tx.borrow()
    }

    /// Number of writes per run.
    pub fn count(&self) -> u32 {
        self.config.count
    }

    /// Delete every previously used key from the map, in insertion order.
    ///
    /// Each deletion is committed individually and followed by the settle
    /// delay. Must fully complete before the next run's writes begin so
    /// stale keys from the prior run cannot be double-counted.
    pub async fn clean_up(&self, map: &dyn SharedPropertyMap, keys: &[String]) -> Result<()> {
        for key in keys {
            if map.has(key).await {
                map.delete(key).await?;
                map.commit().await?;
                tokio::time::sleep(self.config.settle_delay).await;
            }
        }
        Ok(())
    }

    /// Perform the timed write loop.
    ///
    /// Issues keys "0".."count-1" in strictly increasing order; per key:
    /// generate a payload, record the start timestamp, write, commit, then
    /// settle. Write failures are not retried; the first error aborts the
    /// run and resets the state to idle.
    pub async fn run(
        &self,
        map: &dyn SharedPropertyMap,
        generator: &mut dyn ValueGenerator,
        ledger: &mut TimingLedger,
    ) -> Result<RunLog> {
        if self.state() == RunState::Running {
            return Err(AppError::not_ready("a run is already in progress"));
        }

        self.state_tx.send_replace(RunState::Running);
        let expected = self.config.count as usize;
        let _ = self.events_tx.send(RunEvent::RunStarted { expected });

        match self.write_loop(map, generator, ledger).await {
            Ok(log) => Ok(log),
            Err(e) => {
                // Failed runs return to idle so the next attempt can start
                self.state_tx.send_replace(RunState::Idle);
                Err(e)
            }
        }
    }

    async fn write_loop(
        &self,
        map: &dyn SharedPropertyMap,
        generator: &mut dyn ValueGenerator,
        ledger: &mut TimingLedger,
    ) -> Result<RunLog> {
        let mut log = RunLog::default();

        for index in 0..self.config.count {
            let key = index.to_string();
            let value = generator.generate();
            log.payload_samples.push(value.byte_len);

            ledger.record_start(&key, now_ms());
            map.set(&key, &value.payload).await?;
            map.commit().await?;

            let _ = self.events_tx.send(RunEvent::WriteCommitted { key: key.clone() });
            log.keys.push(key);

            tokio::time::sleep(self.config.settle_delay).await;
        }

        Ok(log)
    }

    /// Transition back to idle once every expected confirmation arrived.
    ///
    /// Called by the owner of the remote event stream when the completion
    /// tracker reports the run complete.
    pub fn complete_run(&self) {
        self.state_tx.send_replace(RunState::Idle);
        let _ = self.events_tx.send(RunEvent::RunCompleted);
    }
}
