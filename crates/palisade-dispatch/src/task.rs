//! Per-node power-control task
//!
//! A [`ChildTask`] owns one power-tool invocation for one node: its
//! capture buffer, its lifecycle state, and the terminal outcome. Tasks
//! are created by the dispatcher, run to completion exactly once, and
//! collapse into a [`TaskReport`].

use std::sync::Arc;

use palisade_bmc::{ChassisControl, ChassisSession, ExitOutcome, PowerCommand};
use palisade_common::NodeEntry;
use tracing::debug;

/// Upper bound on captured diagnostic text per task, including the
/// `Node: <name> ` prefix. Overflow is truncated silently.
pub const CAPTURE_LIMIT: usize = 256;

/// Lifecycle of one power-control task.
///
/// `Succeeded` and `Failed` are terminal; a task is never reused or
/// restarted within a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Built, nothing launched yet
    Created,
    /// Capture channel acquired, external process launched
    Spawned,
    /// Process executing
    Running,
    /// Reading captured output until end-of-stream
    Collecting,
    /// Blocking on the process's terminal status
    Joined,
    /// Exited normally with status zero
    Succeeded,
    /// Launch failed, nonzero exit, or killed by a signal
    Failed,
}

impl TaskState {
    /// Legal successor states. A launch failure jumps straight from
    /// `Created` to `Failed` without ever entering `Running`.
    fn can_advance_to(self, next: TaskState) -> bool {
        use TaskState::*;
        matches!(
            (self, next),
            (Created, Spawned)
                | (Created, Failed)
                | (Spawned, Running)
                | (Running, Collecting)
                | (Collecting, Joined)
                | (Joined, Succeeded)
                | (Joined, Failed)
        )
    }
}

/// One external power-control invocation for one node
#[derive(Debug)]
pub struct ChildTask {
    node: NodeEntry,
    state: TaskState,
    captured: Vec<u8>,
    outcome: Option<ExitOutcome>,
}

impl ChildTask {
    pub fn new(node: NodeEntry) -> Self {
        Self {
            node,
            state: TaskState::Created,
            captured: Vec::with_capacity(CAPTURE_LIMIT),
            outcome: None,
        }
    }

    fn advance(&mut self, next: TaskState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal task transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    /// Run the task to a terminal state: launch the power tool, collect
    /// its combined output, wait for it to exit.
    ///
    /// Every failure is local to this task; the report always carries the
    /// `Node: <name> `-prefixed diagnostic text.
    pub async fn run<C>(mut self, control: Arc<C>, command: PowerCommand) -> TaskReport
    where
        C: ChassisControl,
    {
        self.captured
            .extend_from_slice(format!("Node: {} ", self.node.name).as_bytes());

        let mut session = match control.open(&self.node.ip, command).await {
            Ok(session) => session,
            Err(err) => {
                self.advance(TaskState::Failed);
                return self.into_report_with(&err.to_string());
            }
        };
        self.advance(TaskState::Spawned);
        self.advance(TaskState::Running);

        self.advance(TaskState::Collecting);
        session.drain(&mut self.captured, CAPTURE_LIMIT).await;

        let outcome = session.finish().await;
        self.advance(TaskState::Joined);

        match outcome {
            Ok(outcome) => {
                self.advance(if outcome.success {
                    TaskState::Succeeded
                } else {
                    TaskState::Failed
                });
                self.outcome = Some(outcome);
                debug!(node = %self.node.name, code = ?outcome.code, "power tool exited");
                self.into_report()
            }
            Err(err) => {
                self.advance(TaskState::Failed);
                self.into_report_with(&err.to_string())
            }
        }
    }

    fn into_report(self) -> TaskReport {
        TaskReport {
            diagnostic: String::from_utf8_lossy(&self.captured).into_owned(),
            node: self.node.name,
            state: self.state,
            code: self.outcome.and_then(|outcome| outcome.code),
        }
    }

    fn into_report_with(mut self, detail: &str) -> TaskReport {
        let room = CAPTURE_LIMIT.saturating_sub(self.captured.len());
        let bytes = detail.as_bytes();
        self.captured
            .extend_from_slice(&bytes[..room.min(bytes.len())]);
        self.into_report()
    }
}

/// What a joined task yields to the aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    /// Name of the node the task acted on
    pub node: String,
    /// Terminal state of the task
    pub state: TaskState,
    /// Exit code, when the process exited normally
    pub code: Option<i32>,
    /// Captured diagnostic text, `Node: <name> `-prefixed
    pub diagnostic: String,
}

impl TaskReport {
    pub fn success(&self) -> bool {
        self.state == TaskState::Succeeded
    }

    /// Report for a task whose worker died before yielding a report
    pub(crate) fn aborted(node: String, reason: &str) -> Self {
        Self {
            diagnostic: format!("Node: {} {}", node, reason),
            node,
            state: TaskState::Failed,
            code: None,
        }
    }
}
