//! Async services for the sync game loop.
//!
//! - [`table_loader`]: background strategy-table load behind a watch channel
//! - [`event_log`]: JSON-lines event log written by a tokio task
//! - [`runtime`]: [`Services`], which owns the tokio runtime

pub mod event_log;
pub mod runtime;
pub mod table_loader;

pub use tui_nim_core as core;
pub use tui_nim_types as types;

pub use event_log::{EventLog, LogEvent, ServiceEvent};
pub use runtime::{Services, ServicesConfig};
pub use table_loader::{load_table, table_channel, TableHandle, TablePublisher};
