//! File-level compile/run pipeline state.

use serde::{Deserialize, Serialize};

/// Stage the open file is at in the lint → compile → run pipeline.
///
/// The flow is linear with one branch point after compiling:
/// `NeedsStartup → ReadyQueue → Compiling → {CompileFailed | NeedsRun}`,
/// then `NeedsRun → Running → {RunFailed | RunSucceeded}`. Terminal
/// outcomes settle back to `Idle` on the next dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileState {
    NeedsStartup,
    ReadyQueue,
    Compiling,
    CompileFailed,
    NeedsRun,
    Running,
    RunFailed,
    RunSucceeded,
    Idle,
}

impl CompileState {
    /// Footer message for the current stage
    pub fn describe(&self) -> &'static str {
        match self {
            CompileState::NeedsStartup => "Starting up",
            CompileState::ReadyQueue => "Ready",
            CompileState::Compiling => "Compiling",
            CompileState::CompileFailed => "Compilation failed",
            CompileState::NeedsRun => "Compiled",
            CompileState::Running => "Running",
            CompileState::RunFailed => "Run failed",
            CompileState::RunSucceeded => "Run completed",
            CompileState::Idle => "Idle",
        }
    }

    /// Whether a worker request is in flight. New run triggers are
    /// coalesced rather than queued while this holds.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            CompileState::Compiling | CompileState::NeedsRun | CompileState::Running
        )
    }

    /// Whether a run command may be dispatched from this state
    pub fn can_start_run(&self) -> bool {
        matches!(
            self,
            CompileState::ReadyQueue
                | CompileState::Idle
                | CompileState::CompileFailed
                | CompileState::RunFailed
                | CompileState::RunSucceeded
        )
    }

    pub fn is_terminal_outcome(&self) -> bool {
        matches!(
            self,
            CompileState::CompileFailed | CompileState::RunFailed | CompileState::RunSucceeded
        )
    }
}

/// How the worker should execute the program: straight through, or
/// instrumented so it can be interrupted by a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Sync,
    Async,
}

/// The single pipeline instance for the open file. Created on file open,
/// reset on file close/switch; transitions only through dispatched
/// pipeline messages.
#[derive(Debug)]
pub struct Pipeline {
    pub state: CompileState,
    pub type_check: bool,
    pub auto_run: bool,
    pub run_kind: RunKind,
    /// Bumped on every buffer edit; auto-run triggers carry the revision
    /// they were scheduled at so settled stale triggers can be dropped.
    pub revision: u64,
    /// Request id of the in-flight compile or run, if any. Worker replies
    /// answering any other id are stale and discarded.
    pub active_request: Option<u64>,
    next_request_id: u64,
}

impl Pipeline {
    pub fn new(type_check: bool, auto_run: bool, run_kind: RunKind) -> Self {
        Self {
            state: CompileState::NeedsStartup,
            type_check,
            auto_run,
            run_kind,
            revision: 0,
            active_request: None,
            next_request_id: 1,
        }
    }

    /// Allocate a fresh monotonic request id and make it the active one
    pub fn begin_request(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.active_request = Some(id);
        id
    }

    /// Whether a worker reply answers a request other than the active one.
    /// Unsolicited events (no request id) are never stale.
    pub fn is_stale(&self, request_id: Option<u64>) -> bool {
        match request_id {
            None => false,
            Some(id) => self.active_request != Some(id),
        }
    }

    pub fn bump_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    /// Reset for a newly opened file. Worker startup survives the switch;
    /// everything request-scoped does not.
    pub fn reset_for_file(&mut self) {
        self.revision = 0;
        self.active_request = None;
        if self.state != CompileState::NeedsStartup {
            self.state = CompileState::ReadyQueue;
        }
    }
}
