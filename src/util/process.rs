//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use anyhow::{Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Display the command for log and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Spawn the process with captured output, without waiting for it.
    ///
    /// A detached thread waits on the child and delivers a single
    /// [`ProcessExit`] through the returned handle. Dropping the handle
    /// before the process exits is safe; the exit is discarded.
    pub fn spawn_captured(&self) -> Result<SpawnedProcess> {
        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null());

        let child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        let (tx, rx) = mpsc::sync_channel(1);
        let program = self.program.clone();

        std::thread::spawn(move || {
            let exit = match child.wait_with_output() {
                Ok(output) => {
                    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                    text.push_str(&String::from_utf8_lossy(&output.stderr));
                    ProcessExit {
                        code: output.status.code(),
                        output: text,
                    }
                }
                Err(e) => ProcessExit {
                    code: None,
                    output: format!("failed to wait for `{}`: {}", program.display(), e),
                },
            };

            // The receiver may be gone if the owner was torn down.
            let _ = tx.send(exit);
        });

        Ok(SpawnedProcess { receiver: rx })
    }
}

/// Terminal state of a spawned process.
#[derive(Debug, Clone)]
pub struct ProcessExit {
    /// Exit code for a normal exit; `None` for an abnormal termination
    /// (e.g. killed by a signal).
    pub code: Option<i32>,

    /// Full captured stdout followed by stderr.
    pub output: String,
}

impl ProcessExit {
    /// Whether the process exited normally.
    pub fn normal_exit(&self) -> bool {
        self.code.is_some()
    }

    /// Whether the process exited normally with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Handle to a spawned subprocess.
///
/// The exit is delivered exactly once, on a single-slot channel.
#[derive(Debug)]
pub struct SpawnedProcess {
    receiver: Receiver<ProcessExit>,
}

impl SpawnedProcess {
    /// Check for completion without blocking.
    pub fn try_wait(&self) -> Option<ProcessExit> {
        match self.receiver.try_recv() {
            Ok(exit) => Some(exit),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the process exits.
    ///
    /// Returns `None` only if the waiter thread died without reporting,
    /// which should not happen in practice.
    pub fn wait(&self) -> Option<ProcessExit> {
        self.receiver.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("RunUAT.sh").args(["BuildPlugin", "-Rocket"]);
        assert_eq!(pb.display_command(), "RunUAT.sh BuildPlugin -Rocket");
    }

    #[test]
    fn test_spawn_missing_program_fails() {
        let pb = ProcessBuilder::new("/no/such/program-upbt");
        assert!(pb.spawn_captured().is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_spawn_captured_reports_exit_and_output() {
        let pb = ProcessBuilder::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]);
        let spawned = pb.spawn_captured().unwrap();

        let exit = spawned.wait().unwrap();
        assert_eq!(exit.code, Some(3));
        assert!(exit.normal_exit());
        assert!(!exit.success());
        assert!(exit.output.contains("out"));
        assert!(exit.output.contains("err"));
    }

    #[test]
    #[cfg(unix)]
    fn test_try_wait_eventually_sees_exit() {
        let pb = ProcessBuilder::new("true");
        let spawned = pb.spawn_captured().unwrap();

        // Spin until the waiter thread reports.
        let exit = loop {
            if let Some(exit) = spawned.try_wait() {
                break exit;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert!(exit.success());
    }
}
