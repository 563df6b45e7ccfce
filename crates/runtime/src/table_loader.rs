//! Strategy table loading.
//!
//! The table is fetched once in the background and handed to the game loop
//! through a watch channel. Consumers either poll [`TableHandle::try_get`]
//! from the sync loop or await [`TableHandle::wait`].

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;

use crate::core::StrategyTable;

type Slot = Option<Arc<StrategyTable>>;

/// Create a connected publisher / handle pair with no table yet.
pub fn table_channel() -> (TablePublisher, TableHandle) {
    let (tx, rx) = watch::channel(None);
    (TablePublisher { tx }, TableHandle { rx })
}

pub struct TablePublisher {
    tx: watch::Sender<Slot>,
}

impl TablePublisher {
    /// Publish the table. Only the first publication takes effect.
    pub fn publish(&self, table: StrategyTable) -> bool {
        let table = Arc::new(table);
        self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(table);
            true
        })
    }
}

#[derive(Clone)]
pub struct TableHandle {
    rx: watch::Receiver<Slot>,
}

impl TableHandle {
    /// The table, if it has been published. Never blocks.
    pub fn try_get(&self) -> Option<Arc<StrategyTable>> {
        self.rx.borrow().clone()
    }

    /// Resolve once the table is available (immediately if it already is).
    ///
    /// Fails if the publisher is dropped without publishing.
    pub async fn wait(&self) -> Result<Arc<StrategyTable>> {
        let mut rx = self.rx.clone();
        let slot = rx
            .wait_for(Option::is_some)
            .await
            .context("strategy table publisher dropped")?;
        let table: Slot = (*slot).clone();
        table.context("strategy table missing after publish")
    }
}

/// Read and decode a table document.
pub async fn load_table(path: impl AsRef<Path>) -> Result<StrategyTable> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}
