//! TUI Shooter (workspace facade crate).
//!
//! Re-exports the member crates under `tui_shooter::{core,adapter,term,input,types}`
//! so the binaries, integration tests, and benches share one import path.

pub use tui_shooter_adapter as adapter;
pub use tui_shooter_core as core;
pub use tui_shooter_input as input;
pub use tui_shooter_term as term;
pub use tui_shooter_types as types;
