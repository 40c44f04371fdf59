//! The single-build state machine.
//!
//! A build moves through `Idle -> Resolving -> Launching -> Running` and
//! back to `Idle` once its completion is processed. At most one job may be
//! past `Idle` at a time; a second `start_build` is rejected outright rather
//! than queued.
//!
//! `start_build` is synchronous up through launching the automation tool and
//! returns without waiting for it. The tool's exit arrives on a single-slot
//! channel fed by a detached waiter thread; the caller drains it on its own
//! thread with [`BuildOrchestrator::poll_completion`] or
//! [`BuildOrchestrator::wait_completion`], which is where the terminal
//! notification fires and the phase resets.
//!
//! Known limitation: there is no timeout or cancellation. An automation tool
//! that never exits leaves the orchestrator in `Running` and blocks all
//! future builds for the life of the process.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::builder::events::{BuildEvent, BuildNotifier};
use crate::builder::template::{self, TemplateTokens};
use crate::core::descriptor::{DescriptorReadError, PluginDescriptor};
use crate::core::EngineInstall;
use crate::util::context::GlobalContext;
use crate::util::process::{ProcessBuilder, ProcessExit, SpawnedProcess};
use crate::util::settings::{SettingsStore, KEY_BUILD_PATH_FORMAT};

/// Phase of the current (or absent) build job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildPhase {
    /// No job; `start_build` is accepted.
    #[default]
    Idle,
    /// Reading the descriptor and resolving the target directory.
    Resolving,
    /// Spawning the automation tool.
    Launching,
    /// The automation tool is running.
    Running,
}

/// State of the in-flight build.
#[derive(Debug, Clone)]
pub struct BuildJob {
    /// Descriptor path the build was requested for.
    pub plugin_path: PathBuf,

    /// Engine install driving the build.
    pub install: EngineInstall,

    /// Resolved output directory.
    pub target_path: PathBuf,
}

/// Returned by a successful `start_build`; the tool is now running.
#[derive(Debug, Clone)]
pub struct BuildStarted {
    /// Plugin friendly name from the descriptor (may be empty).
    pub plugin_name: String,

    /// Resolved output directory for this job.
    pub target_path: PathBuf,
}

/// Terminal result of a build, reported when its completion is processed.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Whether the tool exited normally with code 0.
    pub success: bool,

    /// Output directory computed at launch.
    pub target_path: PathBuf,

    /// Exit code; `None` for abnormal termination.
    pub exit_code: Option<i32>,

    /// Full captured tool output.
    pub output: String,
}

/// Error starting a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("a plugin build is already in progress")]
    BuildInProgress,

    #[error(transparent)]
    DescriptorRead(#[from] DescriptorReadError),

    #[error("failed to create build output directory `{path}`")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch the automation tool")]
    Launch(#[source] anyhow::Error),
}

/// Drives one plugin build at a time against a selected engine install.
#[derive(Debug)]
pub struct BuildOrchestrator {
    ctx: GlobalContext,
    store: SettingsStore,
    phase: BuildPhase,
    job: Option<BuildJob>,
    running: Option<SpawnedProcess>,
}

impl BuildOrchestrator {
    /// Create an orchestrator in the `Idle` phase.
    pub fn new(ctx: GlobalContext, store: SettingsStore) -> Self {
        BuildOrchestrator {
            ctx,
            store,
            phase: BuildPhase::Idle,
            job: None,
            running: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// The in-flight job, if any.
    pub fn current_job(&self) -> Option<&BuildJob> {
        self.job.as_ref()
    }

    /// The active path template: the persisted override if one is set,
    /// otherwise the default under the upbt data directory.
    pub fn path_format(&self) -> String {
        self.store
            .get_str(KEY_BUILD_PATH_FORMAT)
            .map(str::to_string)
            .unwrap_or_else(|| self.ctx.default_path_format())
    }

    /// Start building `plugin_path` with `install`.
    ///
    /// Returns once the automation tool has been spawned. Any failure before
    /// the tool is running aborts the job, notifies `build-failed`, resets
    /// to `Idle` and propagates the error; a new `start_build` may be
    /// attempted immediately. Nothing is retried internally.
    pub fn start_build(
        &mut self,
        plugin_path: &Path,
        install: &EngineInstall,
        notifier: &mut dyn BuildNotifier,
    ) -> Result<BuildStarted, BuildError> {
        if self.phase != BuildPhase::Idle {
            // Reject without touching the running job.
            return Err(BuildError::BuildInProgress);
        }

        self.phase = BuildPhase::Resolving;
        notifier.notify(BuildEvent::BuildStarted {
            plugin: plugin_path.display().to_string(),
            engine: install.name.clone(),
        });

        let descriptor = match PluginDescriptor::load(plugin_path) {
            Ok(descriptor) => descriptor,
            Err(e) => return Err(self.abort(BuildError::from(e), notifier)),
        };

        let target_path = self.resolve_target(&descriptor, install);
        if let Err(e) = std::fs::create_dir_all(&target_path) {
            let err = BuildError::DirectoryCreate {
                path: target_path,
                source: e,
            };
            return Err(self.abort(err, notifier));
        }

        self.phase = BuildPhase::Launching;
        self.job = Some(BuildJob {
            plugin_path: plugin_path.to_path_buf(),
            install: install.clone(),
            target_path: target_path.clone(),
        });

        let command = ProcessBuilder::new(install.uat_path())
            .arg("BuildPlugin")
            .arg(format!("-Plugin={}", plugin_path.display()))
            .arg(format!("-Package={}", target_path.display()))
            .arg("-Rocket");

        tracing::debug!("launching {}", command.display_command());

        let spawned = match command.spawn_captured() {
            Ok(spawned) => spawned,
            Err(e) => return Err(self.abort(BuildError::Launch(e), notifier)),
        };

        self.running = Some(spawned);
        self.phase = BuildPhase::Running;
        notifier.notify(BuildEvent::BuildProgress { percent: 50 });

        Ok(BuildStarted {
            plugin_name: descriptor.friendly_name,
            target_path,
        })
    }

    /// Process the tool's completion if it has arrived, without blocking.
    ///
    /// Returns `None` while the tool is still running or when no build is in
    /// flight. When the completion is processed the terminal notification
    /// fires and the phase resets to `Idle`.
    pub fn poll_completion(&mut self, notifier: &mut dyn BuildNotifier) -> Option<BuildOutcome> {
        if self.phase != BuildPhase::Running {
            return None;
        }

        let exit = self.running.as_ref()?.try_wait()?;
        Some(self.finish(exit, notifier))
    }

    /// Block until the running tool exits, then process its completion.
    ///
    /// Returns `None` when no build is in flight.
    pub fn wait_completion(&mut self, notifier: &mut dyn BuildNotifier) -> Option<BuildOutcome> {
        if self.phase != BuildPhase::Running {
            return None;
        }

        let exit = self.running.as_ref()?.wait().unwrap_or(ProcessExit {
            code: None,
            output: String::new(),
        });
        Some(self.finish(exit, notifier))
    }

    fn resolve_target(&self, descriptor: &PluginDescriptor, install: &EngineInstall) -> PathBuf {
        let tokens = TemplateTokens {
            plugin_name: &descriptor.friendly_name,
            plugin_version: &descriptor.version_name,
            engine_name: &install.name,
        };
        PathBuf::from(template::expand(&self.path_format(), &tokens))
    }

    /// Abort a job that never reached `Running`.
    fn abort(&mut self, err: BuildError, notifier: &mut dyn BuildNotifier) -> BuildError {
        notifier.notify(BuildEvent::BuildFailed {
            output: error_chain(&err),
        });
        self.reset();
        err
    }

    fn finish(&mut self, exit: ProcessExit, notifier: &mut dyn BuildNotifier) -> BuildOutcome {
        let job = self.job.take().expect("running build has a job");

        let outcome = BuildOutcome {
            success: exit.success(),
            target_path: job.target_path,
            exit_code: exit.code,
            output: exit.output,
        };

        if outcome.success {
            notifier.notify(BuildEvent::BuildSucceeded {
                target_path: outcome.target_path.clone(),
            });
        } else {
            notifier.notify(BuildEvent::BuildFailed {
                output: outcome.output.clone(),
            });
        }

        self.reset();
        outcome
    }

    fn reset(&mut self) {
        self.phase = BuildPhase::Idle;
        self.job = None;
        self.running = None;
    }
}

/// Render an error and its source chain on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        text.push_str(": ");
        text.push_str(&e.to_string());
        source = e.source();
    }
    text
}
