//! Workflow runs: trigger, wait for completion, show and follow logs

use tracing::debug;

use crate::domain::entities::{RunInfo, RunStatus};
use crate::domain::ports::{PlatformApi, RunEvent, RunEventSink, Sleeper};
use crate::domain::services::{LogCursor, RunObservation, RunOutcome, RunPoll, RunPollSettings};
use crate::domain::value_objects::Tier;
use crate::error::{SolidError, SolidResult};

/// Parse `--input`; absent input is an empty object.
pub fn parse_input(input: Option<&str>) -> SolidResult<serde_json::Value> {
    match input {
        None => Ok(serde_json::json!({})),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| SolidError::InvalidInput("Invalid JSON input.".to_string())),
    }
}

/// Result of `RunMonitor::show_logs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogsOutcome {
    pub status: RunStatus,
    /// Logs were streamed until the run finished
    pub followed: bool,
}

impl LogsOutcome {
    /// Showing logs fails only when a followed run ends without completing.
    pub fn into_result(self, run_id: &str) -> SolidResult<RunStatus> {
        if self.followed && !self.status.is_success() {
            return Err(SolidError::RunFailed {
                id: run_id.to_string(),
                status: self.status.to_string(),
            });
        }
        Ok(self.status)
    }
}

pub struct RunMonitor<'a, A, S>
where
    A: PlatformApi + ?Sized,
    S: Sleeper + ?Sized,
{
    api: &'a A,
    sleeper: &'a S,
}

impl<'a, A, S> RunMonitor<'a, A, S>
where
    A: PlatformApi + ?Sized,
    S: Sleeper + ?Sized,
{
    pub fn new(api: &'a A, sleeper: &'a S) -> Self {
        Self { api, sleeper }
    }

    /// Trigger `workflow` in the tier's project.
    pub fn trigger(
        &self,
        project: &str,
        workflow: &str,
        tier: Tier,
        input: &serde_json::Value,
        events: &dyn RunEventSink,
    ) -> SolidResult<RunInfo> {
        let slug = tier.project_slug(project);
        let run = self.api.trigger_run(&slug, workflow, input).map_err(|e| {
            e.or_not_found(
                format!("Workflow \"{}\" in project \"{}\"", workflow, slug),
                None,
            )
        })?;
        events.on_event(RunEvent::Triggered {
            id: run.id.to_string(),
        });
        Ok(run)
    }

    /// Poll run status until terminal or the wait cap.
    pub fn wait(&self, run_id: &str, settings: RunPollSettings, events: &dyn RunEventSink) -> RunOutcome {
        let mut poll = RunPoll::new(settings);
        loop {
            self.sleeper.sleep(settings.interval);
            let status = match self.api.get_run(run_id) {
                Ok(run) => Some(run.status()),
                Err(e) => {
                    debug!(run_id, error = %e, "run poll failed");
                    None
                }
            };
            let tick = poll.tick(RunObservation { logs: None, status });
            match tick.outcome {
                Some(outcome) => {
                    emit_outcome(&outcome, events);
                    return outcome;
                }
                None => events.on_event(RunEvent::Waiting),
            }
        }
    }

    /// Print the run's current logs; when `follow` is set and the run is
    /// still running, stream new logs until it finishes.
    ///
    /// Only runs that are `running` are followed; any other status is final
    /// as far as this call is concerned.
    pub fn show_logs(
        &self,
        run_id: &str,
        follow: bool,
        events: &dyn RunEventSink,
    ) -> SolidResult<LogsOutcome> {
        let run = self
            .api
            .get_run(run_id)
            .map_err(|e| e.or_not_found("Run", None))?;
        let status = run.status();
        let logs = self
            .api
            .get_run_logs(run_id)
            .map_err(|e| e.or_not_found("Run", None))?;

        let mut cursor = LogCursor::new();
        cursor.advance(&logs);
        events.on_event(RunEvent::Snapshot {
            status: status.to_string(),
            logs,
        });

        if !follow || status != RunStatus::Running {
            return Ok(LogsOutcome {
                status,
                followed: false,
            });
        }

        events.on_event(RunEvent::Following);
        Ok(LogsOutcome {
            status: self.follow(run_id, cursor, events),
            followed: true,
        })
    }

    fn follow(&self, run_id: &str, cursor: LogCursor, events: &dyn RunEventSink) -> RunStatus {
        let settings = RunPollSettings::FOLLOW;
        let mut poll = RunPoll::with_cursor(settings, cursor);
        loop {
            self.sleeper.sleep(settings.interval);
            let logs = self
                .api
                .get_run_logs(run_id)
                .map_err(|e| debug!(run_id, error = %e, "log poll failed"))
                .ok();
            let status = self
                .api
                .get_run(run_id)
                .map_err(|e| debug!(run_id, error = %e, "status poll failed"))
                .ok()
                .map(|run| run.status());

            let tick = poll.tick(RunObservation { logs, status });
            if let Some(payload) = tick.new_logs {
                events.on_event(RunEvent::Logs { payload });
            }
            match tick.outcome {
                Some(RunOutcome::Finished(status)) => {
                    events.on_event(RunEvent::Finished {
                        status: status.clone(),
                    });
                    return status;
                }
                // Following has no cap
                Some(RunOutcome::TimedOut) | None => {}
            }
        }
    }
}

fn emit_outcome(outcome: &RunOutcome, events: &dyn RunEventSink) {
    match outcome {
        RunOutcome::Finished(status) => events.on_event(RunEvent::Finished {
            status: status.clone(),
        }),
        RunOutcome::TimedOut => events.on_event(RunEvent::TimedOut),
    }
}

/// Map a wait outcome onto the error taxonomy.
pub fn outcome_result(run_id: &str, outcome: RunOutcome, settings: RunPollSettings) -> SolidResult<()> {
    match outcome {
        RunOutcome::Finished(status) if status.is_success() => Ok(()),
        RunOutcome::Finished(status) => Err(SolidError::RunFailed {
            id: run_id.to_string(),
            status: status.to_string(),
        }),
        RunOutcome::TimedOut => Err(SolidError::Timeout {
            what: "workflow".to_string(),
            waited: settings.interval * settings.max_attempts.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeApi;
    use crate::domain::ports::NoSleep;
    use crate::domain::services::{LogEntry, LogPayload};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<RunEvent>>);

    impl RunEventSink for Recorder {
        fn on_event(&self, event: RunEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    fn raw(s: &str) -> Option<LogPayload> {
        Some(LogPayload::Raw(s.to_string()))
    }

    #[test]
    fn input_must_be_json() {
        assert_eq!(parse_input(None).unwrap(), serde_json::json!({}));
        assert_eq!(
            parse_input(Some(r#"{"n":1}"#)).unwrap(),
            serde_json::json!({"n": 1})
        );
        assert_eq!(
            parse_input(Some("{nope")).unwrap_err().to_string(),
            "Invalid JSON input."
        );
    }

    #[test]
    fn trigger_targets_tier_project() {
        let api = FakeApi::new();
        let events = Recorder::default();
        let run = RunMonitor::new(&api, &NoSleep)
            .trigger("shop", "nightly", Tier::Staging, &serde_json::json!({}), &events)
            .unwrap();

        assert_eq!(run.id.as_str(), "run-1");
        assert_eq!(api.triggered.borrow()[0].0, "shop-staging");
        assert_eq!(
            events.0.borrow()[0],
            RunEvent::Triggered { id: "run-1".into() }
        );
    }

    #[test]
    fn wait_emits_a_tick_per_pending_poll() {
        let api = FakeApi::new();
        api.script_run(vec![Some("queued"), None, Some("running"), Some("completed")]);
        let events = Recorder::default();

        let outcome = RunMonitor::new(&api, &NoSleep).wait("run-1", RunPollSettings::WAIT, &events);

        assert_eq!(outcome, RunOutcome::Finished(RunStatus::Completed));
        let waiting = events
            .0
            .borrow()
            .iter()
            .filter(|e| **e == RunEvent::Waiting)
            .count();
        assert_eq!(waiting, 3);
        assert!(outcome_result("run-1", outcome, RunPollSettings::WAIT).is_ok());
    }

    #[test]
    fn failed_run_is_an_error() {
        let api = FakeApi::new();
        api.script_run(vec![Some("failed")]);
        let outcome = RunMonitor::new(&api, &NoSleep).wait("run-1", RunPollSettings::WAIT, &Recorder::default());
        assert!(matches!(
            outcome_result("run-1", outcome, RunPollSettings::WAIT),
            Err(SolidError::RunFailed { .. })
        ));
    }

    #[test]
    fn wait_times_out() {
        let api = FakeApi::new();
        api.script_run(vec![Some("running"), Some("running")]);
        let settings = RunPollSettings {
            max_attempts: Some(2),
            ..RunPollSettings::WAIT
        };
        let events = Recorder::default();
        let outcome = RunMonitor::new(&api, &NoSleep).wait("run-1", settings, &events);
        assert_eq!(outcome, RunOutcome::TimedOut);
        assert_eq!(events.0.borrow().last(), Some(&RunEvent::TimedOut));
    }

    #[test]
    fn logs_without_follow_return_current_status() {
        let api = FakeApi::new();
        api.script_run(vec![Some("running")]);
        api.script_logs(vec![raw("hello\n")]);
        let events = Recorder::default();

        let outcome = RunMonitor::new(&api, &NoSleep)
            .show_logs("run-1", false, &events)
            .unwrap();

        assert_eq!(outcome.status, RunStatus::Running);
        assert!(!outcome.followed);
        assert!(outcome.into_result("run-1").is_ok());
        assert_eq!(
            events.0.borrow()[0],
            RunEvent::Snapshot {
                status: "running".into(),
                logs: LogPayload::Raw("hello\n".into())
            }
        );
    }

    #[test]
    fn follow_streams_only_new_content() {
        let api = FakeApi::new();
        api.script_run(vec![Some("running"), Some("running"), None, Some("failed")]);
        api.script_logs(vec![
            raw("a\n"),
            raw("a\n"),
            None,
            raw("a\nb\n"),
        ]);
        let events = Recorder::default();

        let outcome = RunMonitor::new(&api, &NoSleep)
            .show_logs("run-1", true, &events)
            .unwrap();

        assert_eq!(outcome.status, RunStatus::Failed);
        assert!(outcome.followed);
        assert!(matches!(
            outcome.into_result("run-1"),
            Err(SolidError::RunFailed { .. })
        ));
        let events = events.0.borrow();
        let streamed: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RunEvent::Logs { payload } => Some(payload.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(streamed, vec![LogPayload::Raw("b\n".into())]);
        assert_eq!(
            events.last(),
            Some(&RunEvent::Finished {
                status: RunStatus::Failed
            })
        );
    }

    #[test]
    fn follow_diffs_structured_entries_by_count() {
        let entry = |m: &str| LogEntry {
            message: Some(m.to_string()),
            ..Default::default()
        };
        let api = FakeApi::new();
        api.script_run(vec![Some("running"), Some("completed")]);
        api.script_logs(vec![
            Some(LogPayload::Entries(vec![entry("one")])),
            Some(LogPayload::Entries(vec![entry("one"), entry("two")])),
        ]);
        let events = Recorder::default();

        RunMonitor::new(&api, &NoSleep)
            .show_logs("run-1", true, &events)
            .unwrap();

        assert!(events.0.borrow().contains(&RunEvent::Logs {
            payload: LogPayload::Entries(vec![entry("two")])
        }));
    }

    #[test]
    fn unknown_run_is_not_found() {
        let api = FakeApi::new();
        let err = RunMonitor::new(&api, &NoSleep)
            .show_logs("nope", false, &Recorder::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Run not found.");
    }
}
