//! upbt - A build driver for Unreal Engine plugins
//!
//! This crate provides the core library functionality for upbt: engine
//! install discovery and registration, plugin descriptor parsing, and the
//! build orchestration that drives the engine's automation tool.

pub mod builder;
pub mod core;
pub mod registry;
pub mod util;

pub use crate::core::{descriptor::PluginDescriptor, install::EngineInstall};

pub use crate::builder::{BuildError, BuildEvent, BuildNotifier, BuildOrchestrator};
pub use crate::registry::{InstallRegistry, RegistryError};
pub use crate::util::context::GlobalContext;
pub use crate::util::settings::SettingsStore;
