//! Build event types.
//!
//! The orchestrator reports its lifecycle through these events; the
//! presentation layer decides how to render them. In `--message-format=json`
//! mode each event is serialized as one JSON object per line.
//!
//! # Ordering
//!
//! For a started job, `build-started` precedes `build-progress`, which
//! precedes the terminal `build-succeeded`/`build-failed` event. Terminal
//! events are delivered exactly once per started job.

use std::path::PathBuf;

use serde::Serialize;

/// An event emitted during a plugin build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum BuildEvent {
    /// A build request was accepted.
    BuildStarted {
        /// Plugin descriptor path being built.
        plugin: String,
        /// Engine install name selected for the build.
        engine: String,
    },

    /// Progress update. The automation tool reports no granular progress,
    /// so an in-flight build sits at 50 until it completes.
    BuildProgress { percent: u8 },

    /// The automation tool exited normally with code 0.
    BuildSucceeded {
        /// Directory the packaged plugin was written to.
        target_path: PathBuf,
    },

    /// The build failed, either before launch or because the tool exited
    /// abnormally or with a non-zero code.
    BuildFailed {
        /// Full captured tool output, or the error text for failures that
        /// happened before launch.
        output: String,
    },
}

impl BuildEvent {
    /// Serialize this event to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Receiver for build events, registered per `start_build` call.
pub trait BuildNotifier {
    fn notify(&mut self, event: BuildEvent);
}

/// Adapter that forwards events to a function.
pub struct FnNotifier<F: FnMut(BuildEvent)>(pub F);

impl<F: FnMut(BuildEvent)> BuildNotifier for FnNotifier<F> {
    fn notify(&mut self, event: BuildEvent) {
        (self.0)(event)
    }
}

/// Notifier that discards all events.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl BuildNotifier for NullNotifier {
    fn notify(&mut self, _event: BuildEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_serialization() {
        let event = BuildEvent::BuildStarted {
            plugin: "/plugins/Foo.uplugin".to_string(),
            engine: "UE_4.17".to_string(),
        };
        let json = event.to_json();
        assert!(json.contains("\"reason\":\"build-started\""));
        assert!(json.contains("\"engine\":\"UE_4.17\""));
    }

    #[test]
    fn test_progress_serialization() {
        let json = BuildEvent::BuildProgress { percent: 50 }.to_json();
        assert!(json.contains("\"reason\":\"build-progress\""));
        assert!(json.contains("\"percent\":50"));
    }

    #[test]
    fn test_failed_serialization() {
        let event = BuildEvent::BuildFailed {
            output: "line one\nline two".to_string(),
        };
        let json = event.to_json();
        assert!(json.contains("\"reason\":\"build-failed\""));
        assert!(json.contains("line one\\nline two"));
    }

    #[test]
    fn test_fn_notifier() {
        let mut seen = Vec::new();
        {
            let mut notifier = FnNotifier(|event| seen.push(event));
            notifier.notify(BuildEvent::BuildProgress { percent: 50 });
        }
        assert_eq!(seen, vec![BuildEvent::BuildProgress { percent: 50 }]);
    }
}
