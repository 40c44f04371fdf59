//! Plugin build orchestration.
//!
//! This module implements the build path: resolving a plugin descriptor and
//! output directory, launching the engine's automation tool, and reporting
//! the outcome.

pub mod events;
pub mod orchestrator;
pub mod template;

pub use events::{BuildEvent, BuildNotifier, FnNotifier, NullNotifier};
pub use orchestrator::{
    BuildError, BuildJob, BuildOrchestrator, BuildOutcome, BuildPhase, BuildStarted,
};
pub use template::{expand, TemplateTokens};
