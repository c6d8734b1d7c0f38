//! Main application orchestration and execution
//!
//! Wires the session store, loopback hub, sequencer and ledger together
//! for one benchmark run: resolve the map identity, attach a local and a
//! remote view, clean up leftovers, drive the timed write loop while a
//! collector task captures remote confirmation timestamps, then merge,
//! summarize and report.

use crate::{
    config::display_config_summary,
    error::{AppError, Result},
    generator::PayloadGenerator,
    ledger::{now_ms, TimestampMs, TimingLedger},
    logging::RunLogger,
    map::{LoopbackHub, MapEvent},
    models::{Config, RunRecord},
    output::{ChartBundle, OutputFormatter, OutputFormatterFactory},
    sequencer::{CompletionTracker, Sequencer, SequencerConfig},
    session::SessionStore,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// Extra wait beyond the theoretical run duration before giving up on
/// outstanding confirmations
const CONFIRMATION_GRACE: Duration = Duration::from_secs(10);

/// JSON document written when `--json` is given
#[derive(Serialize)]
struct RunExport<'a> {
    record: &'a RunRecord,
    chart: &'a ChartBundle,
}

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    fresh: bool,
}

impl App {
    /// Create a new application instance from a loaded configuration.
    pub fn new(config: Config, fresh: bool) -> Self {
        Self { config, fresh }
    }

    /// Execute one full benchmark run and return its record.
    pub async fn run(self) -> Result<RunRecord> {
        let config = self.config;
        let formatter: Arc<dyn OutputFormatter> =
            Arc::from(OutputFormatterFactory::create_formatter(config.enable_color));
        let run_logger = RunLogger::new(&config);

        if config.debug {
            println!("{}", display_config_summary(&config));
            println!();
        }

        // Resolve the map identity: explicit id, persisted session, or new
        let store = SessionStore::new(&config.session_file);
        if self.fresh {
            store.clear()?;
        }
        let identity = store.resolve(config.map_session_id.as_deref())?;

        let hub = LoopbackHub::new(Some(identity.map_id.clone()))
            .with_propagation_delay(config.propagation_delay());
        let (local_tx, _local_rx) = mpsc::unbounded_channel();
        let local = hub.attach(local_tx);
        let (remote_tx, remote_rx) = mpsc::unbounded_channel();
        let _remote = hub.attach(remote_tx);

        println!("{}", formatter.format_header(&config));
        println!();

        let (sequencer, mut run_events) = Sequencer::new(SequencerConfig {
            count: config.run_count,
            settle_delay: config.settle_delay(),
        });

        // Collector task: stamp every remote write confirmation on arrival
        // and signal once the expected count of distinct keys is reached.
        let expected = config.run_count as usize;
        let (ends_tx, mut ends_rx) = mpsc::unbounded_channel::<(String, TimestampMs)>();
        let (done_tx, done_rx) = oneshot::channel::<()>();
        let progress_formatter = config.verbose.then(|| Arc::clone(&formatter));
        let collector = tokio::spawn(collect_confirmations(
            remote_rx,
            expected,
            ends_tx,
            done_tx,
            progress_formatter,
        ));

        // Previous runs over the same map may have left keys behind
        let leftover_keys: Vec<String> = (0..config.run_count).map(|i| i.to_string()).collect();
        sequencer.clean_up(&local, &leftover_keys).await?;

        run_logger.log_run_started(&identity.map_id, config.run_count);

        let mut ledger = TimingLedger::new();
        let mut generator = PayloadGenerator::new(config.size_class);
        let log = match sequencer.run(&local, &mut generator, &mut ledger).await {
            Ok(log) => log,
            Err(e) => {
                run_logger.log_error(&e, Some("write loop failed"));
                collector.abort();
                return Err(e);
            }
        };

        // Writes are out; wait for the remote view to confirm them all
        let deadline = run_deadline(&config);
        if tokio::time::timeout(deadline, done_rx).await.is_err() {
            eprintln!(
                "{}",
                formatter.format_warning("timed out waiting for remote confirmations")
            );
            collector.abort();
        }
        sequencer.complete_run();

        while let Ok((key, timestamp)) = ends_rx.try_recv() {
            ledger.record_end(&key, timestamp);
        }

        if config.debug {
            while let Ok(event) = run_events.try_recv() {
                println!("run event: {:?}", event);
            }
        }

        let mut record = RunRecord::new(identity.map_id.clone(), config.size_class);
        record.finalize(
            ledger.durations(),
            ledger.incomplete_keys(),
            log.payload_samples,
        );

        run_logger.log_run_completed(
            record.durations.len(),
            record.incomplete_keys.len(),
        );
        println!("{}", formatter.format_run_summary(&record));

        if let Some(ref path) = config.json_output {
            export_json(path, &record)?;
            println!("{}", formatter.format_success(&format!("results written to {}", path)));
        }

        Ok(record)
    }
}

/// Consume remote change events, forwarding `(key, arrival timestamp)`
/// pairs and signaling completion once every expected key confirmed.
async fn collect_confirmations(
    mut remote_rx: mpsc::UnboundedReceiver<MapEvent>,
    expected: usize,
    ends_tx: mpsc::UnboundedSender<(String, TimestampMs)>,
    done_tx: oneshot::Sender<()>,
    formatter: Option<Arc<dyn OutputFormatter>>,
) {
    let mut tracker = CompletionTracker::new(expected);
    while let Some(event) = remote_rx.recv().await {
        // Cleanup deletions are not confirmations
        if !event.is_write() {
            continue;
        }
        let key = event.key().to_string();
        let _ = ends_tx.send((key.clone(), now_ms()));
        let complete = tracker.confirm(&key);
        if let Some(ref formatter) = formatter {
            println!(
                "{}",
                formatter.format_progress(&key, tracker.confirmed_count(), expected)
            );
        }
        if complete {
            let _ = done_tx.send(());
            return;
        }
    }
}

/// Upper bound on how long a run may take before outstanding
/// confirmations are treated as lost.
fn run_deadline(config: &Config) -> Duration {
    config.settle_delay() * config.run_count
        + config.propagation_delay() * config.run_count
        + CONFIRMATION_GRACE
}

fn export_json(path: &str, record: &RunRecord) -> Result<()> {
    let chart = ChartBundle::from_record(record);
    let export = RunExport { record, chart: &chart };
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)
        .map_err(|e| AppError::io(format!("failed to write {}: {}", path, e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SizeClass;
    use tempfile::tempdir;

    fn fast_config(session_file: String) -> Config {
        Config {
            map_session_id: None,
            session_file,
            run_count: 5,
            settle_delay_ms: 1,
            propagation_delay_ms: 1,
            size_class: SizeClass::Zero,
            json_output: None,
            enable_color: false,
            verbose: false,
            debug: false,
        }
    }

    #[tokio::test]
    async fn test_full_run_produces_summary() {
        let dir = tempdir().unwrap();
        let session_file = dir.path().join("session").to_string_lossy().into_owned();

        let record = App::new(fast_config(session_file.clone()), false)
            .run()
            .await
            .unwrap();

        assert_eq!(record.durations.len(), 5);
        assert!(record.incomplete_keys.is_empty());
        assert!(record.summary.is_some());
        for (_, duration) in &record.durations {
            assert!(*duration >= 0);
        }

        // The map identity was persisted for the next run
        let persisted = std::fs::read_to_string(&session_file).unwrap();
        assert_eq!(persisted.trim(), record.map_id);
    }

    #[tokio::test]
    async fn test_fresh_discards_persisted_session() {
        let dir = tempdir().unwrap();
        let session_file = dir.path().join("session").to_string_lossy().into_owned();
        std::fs::write(&session_file, "stale-map-id\n").unwrap();

        let record = App::new(fast_config(session_file), true)
            .run()
            .await
            .unwrap();
        assert_ne!(record.map_id, "stale-map-id");
    }

    #[tokio::test]
    async fn test_explicit_session_id_is_joined() {
        let dir = tempdir().unwrap();
        let session_file = dir.path().join("session").to_string_lossy().into_owned();
        let mut config = fast_config(session_file);
        config.map_session_id = Some("room-7".to_string());

        let record = App::new(config, false).run().await.unwrap();
        assert_eq!(record.map_id, "room-7");
    }

    #[tokio::test]
    async fn test_json_export_written() {
        let dir = tempdir().unwrap();
        let session_file = dir.path().join("session").to_string_lossy().into_owned();
        let json_path = dir.path().join("out.json").to_string_lossy().into_owned();
        let mut config = fast_config(session_file);
        config.json_output = Some(json_path.clone());

        App::new(config, false).run().await.unwrap();

        let content = std::fs::read_to_string(&json_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed["record"]["summary"].is_object());
        assert_eq!(parsed["chart"]["scatter"]["type"], "scatter");
    }
}
