//! Core runtime pieces shared across commands.

mod debounce;
mod state;

pub use debounce::{ChangeKind, Debouncer};
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
