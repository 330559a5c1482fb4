//! Bot module: the per-cycle orchestrator and the daemon loop around it.

pub mod cycle;
pub mod daemon;

pub use cycle::{Bot, CycleReport, SKIPPED_OUTCOME};
pub use daemon::{run_forever, shutdown_signal};
