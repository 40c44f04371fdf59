//! Shared utilities

pub mod context;
pub mod process;
pub mod settings;
pub mod shell;

pub use context::GlobalContext;
pub use process::{ProcessBuilder, ProcessExit};
pub use settings::SettingsStore;
pub use shell::Shell;
