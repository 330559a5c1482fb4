//! Output module for styled console messages.
//!
//! Startup and shutdown notices go here; everything else is logged
//! through `tracing`.

pub mod console;

pub use console::{print_banner, print_config_summary, print_error, print_info, print_success, print_warning};
