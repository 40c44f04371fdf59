//! Core data structures for upbt.
//!
//! This module contains the foundational types used throughout upbt:
//! engine installations and plugin descriptors.

pub mod descriptor;
pub mod install;

pub use descriptor::PluginDescriptor;
pub use install::EngineInstall;
