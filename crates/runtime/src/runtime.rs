//! Service runtime.
//!
//! Bridges the sync game loop with the async table loader and event log.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::core::StrategyTable;
use crate::event_log::{EventLog, ServiceEvent};
use crate::table_loader::{load_table, table_channel, TableHandle, TablePublisher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicesConfig {
    pub table_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

/// Running services. Dropping this stops the background tasks.
pub struct Services {
    rt: Runtime,
    table: TableHandle,
    log: EventLog,
    log_task: Option<JoinHandle<()>>,
}

impl Services {
    /// Start the runtime, the event log (if configured) and the table load.
    pub fn start(config: ServicesConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (log, log_task) = {
            let _guard = rt.enter();
            match config.log_path {
                Some(path) => {
                    let (log, task) = EventLog::spawn(path);
                    (log, Some(task))
                }
                None => (EventLog::disabled(), None),
            }
        };

        let (publisher, table) = table_channel();
        rt.spawn(load_and_publish(config.table_path, publisher, log.clone()));

        Ok(Self {
            rt,
            table,
            log,
            log_task,
        })
    }

    /// Poll for the table without blocking.
    pub fn try_table(&self) -> Option<Arc<StrategyTable>> {
        self.table.try_get()
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Stop the services, giving the log writer a moment to flush.
    pub fn shutdown(self) {
        let Self {
            rt, log, log_task, ..
        } = self;
        drop(log);
        if let Some(task) = log_task {
            // The timer must be created inside the runtime.
            let _ = rt.block_on(async move {
                tokio::time::timeout(Duration::from_millis(500), task).await
            });
        }
    }
}

/// Load the table; on failure publish an empty one so the game stays playable.
async fn load_and_publish(path: PathBuf, publisher: TablePublisher, log: EventLog) {
    let display = path.display().to_string();
    let table = match load_table(&path).await {
        Ok(table) => {
            log.record(ServiceEvent::TableLoaded {
                path: display,
                entries: table.data.len(),
            });
            table
        }
        Err(err) => {
            log.record(ServiceEvent::TableUnavailable {
                path: display,
                error: format!("{err:#}"),
            });
            StrategyTable::empty()
        }
    };
    publisher.publish(table);
}
