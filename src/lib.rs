//! TUI Nim (workspace facade crate).
//!
//! Re-exports the member crates as `tui_nim::{core,input,runtime,term,types}`
//! and holds the command-line surface shared by the binary and the tests.

pub mod cli;

pub use tui_nim_core as core;
pub use tui_nim_input as input;
pub use tui_nim_runtime as runtime;
pub use tui_nim_term as term;
pub use tui_nim_types as types;
