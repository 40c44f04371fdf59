//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use upbt::util::shell::ColorChoice;

/// upbt - A build driver for Unreal Engine plugins
#[derive(Parser)]
#[command(name = "upbt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// When to use colored output
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The global output flags, for threading to commands.
    pub fn output_flags(&self) -> OutputFlags {
        OutputFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
        }
    }
}

/// Global output flags shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct OutputFlags {
    pub quiet: bool,
    pub verbose: bool,
    pub color: ColorChoice,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and package a plugin with a registered engine
    Build(BuildArgs),

    /// Manage engine installations
    Engines(EnginesArgs),

    /// Inspect or change persisted settings
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Path to the plugin descriptor (.uplugin) file
    pub plugin: PathBuf,

    /// Engine install to build with (defaults to the first discovered)
    #[arg(short, long)]
    pub engine: Option<String>,

    /// Output format for build events
    #[arg(long, value_enum, default_value = "human")]
    pub message_format: MessageFormat,

    /// Return immediately after launching the build tool
    #[arg(long)]
    pub no_wait: bool,
}

/// Output format for build events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    /// Human-readable status output
    Human,
    /// One JSON event per line
    Json,
}

#[derive(Args)]
pub struct EnginesArgs {
    #[command(subcommand)]
    pub command: EnginesCommands,
}

#[derive(Subcommand)]
pub enum EnginesCommands {
    /// List discovered and registered engine installs
    List,

    /// Register a custom engine install
    Add(EnginesAddArgs),

    /// Remove custom engine installs by name
    Remove(EnginesRemoveArgs),
}

#[derive(Args)]
pub struct EnginesAddArgs {
    /// Install name, e.g. UE_4.17 or a source-build label
    pub name: String,

    /// Root directory of the engine install
    pub path: PathBuf,
}

#[derive(Args)]
pub struct EnginesRemoveArgs {
    /// Install name; every custom install with this name is removed
    pub name: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the active settings
    Show,

    /// Set the build-output path template (%n, %v, %e tokens)
    SetFormat(ConfigSetFormatArgs),
}

#[derive(Args)]
pub struct ConfigSetFormatArgs {
    /// Template string, e.g. /Builds/%n/%v/%e
    pub template: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
