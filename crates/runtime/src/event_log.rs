//! JSON-lines event log.
//!
//! A background task owns the log file and appends one record per line:
//!
//! ```json
//! {"ts_ms":1532,"event":{"kind":"staged","side":"player","move":{"row":2,"count":3},"generation":4}}
//! ```
//!
//! Logging never blocks or fails the game loop; records sent after the writer
//! stopped are dropped.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::GameEvent;

/// Records produced by the services rather than the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceEvent {
    TableLoaded { path: String, entries: usize },
    /// The table could not be loaded; the opponent plays randomly.
    TableUnavailable { path: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogEvent {
    Game(GameEvent),
    Service(ServiceEvent),
}

impl From<GameEvent> for LogEvent {
    fn from(ev: GameEvent) -> Self {
        LogEvent::Game(ev)
    }
}

impl From<ServiceEvent> for LogEvent {
    fn from(ev: ServiceEvent) -> Self {
        LogEvent::Service(ev)
    }
}

#[derive(Debug, Serialize)]
struct Record<'a> {
    ts_ms: u64,
    event: &'a LogEvent,
}

/// Cheap, cloneable sender side of the log.
#[derive(Debug, Clone)]
pub struct EventLog {
    tx: Option<mpsc::UnboundedSender<(u64, LogEvent)>>,
    start: Instant,
}

impl EventLog {
    /// A log that discards everything.
    pub fn disabled() -> Self {
        Self {
            tx: None,
            start: Instant::now(),
        }
    }

    /// Spawn the writer task on the current runtime.
    ///
    /// The task ends (after flushing) once every `EventLog` clone is dropped.
    pub fn spawn(path: PathBuf) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(write_records(path, rx));
        (
            Self {
                tx: Some(tx),
                start: Instant::now(),
            },
            task,
        )
    }

    pub fn record(&self, event: impl Into<LogEvent>) {
        if let Some(tx) = self.tx.as_ref() {
            let ts_ms = self.start.elapsed().as_millis() as u64;
            let _ = tx.send((ts_ms, event.into()));
        }
    }
}

async fn write_records(path: PathBuf, mut rx: mpsc::UnboundedReceiver<(u64, LogEvent)>) {
    use tokio::fs::OpenOptions;
    use tokio::io::AsyncWriteExt;

    let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
        Ok(f) => f,
        Err(_) => return,
    };

    let mut buf: Vec<u8> = Vec::with_capacity(512);
    while let Some((ts_ms, event)) = rx.recv().await {
        buf.clear();
        if serde_json::to_writer(&mut buf, &Record { ts_ms, event: &event }).is_err() {
            continue;
        }
        buf.push(b'\n');
        if file.write_all(&buf).await.is_err() {
            break;
        }
    }

    let _ = file.flush().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;
    use crate::types::Side;

    fn temp_log(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tui-nim-{}-{}.jsonl", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[tokio::test]
    async fn writes_one_json_record_per_line() {
        let path = temp_log("event-log");
        let (log, task) = EventLog::spawn(path.clone());
        log.record(GameEvent::Staged {
            side: Side::Player,
            mv: Move::new(2, 3),
            generation: 4,
        });
        log.record(ServiceEvent::TableUnavailable {
            path: "sum.json".to_string(),
            error: "missing".to_string(),
        });
        drop(log);
        task.await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"]["kind"], "staged");
        assert_eq!(lines[0]["event"]["move"]["row"], 2);
        assert!(lines[0]["ts_ms"].is_u64());
        assert_eq!(lines[1]["event"]["kind"], "table_unavailable");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn disabled_log_drops_records() {
        let log = EventLog::disabled();
        log.record(ServiceEvent::TableLoaded {
            path: "sum.json".to_string(),
            entries: 0,
        });
    }
}
