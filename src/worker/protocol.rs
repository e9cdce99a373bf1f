//! Wire protocol spoken with the worker process.
//!
//! Requests and events travel as newline-delimited JSON objects tagged by
//! `type`. Each request carries a monotonically increasing `request_id`;
//! events answering a request echo that id, while unsolicited events
//! (log lines, setup completion) omit it. The session discards events
//! answering any id other than the most recently issued one, so replies
//! from a superseded compile after rapid edits cannot corrupt state.
//!
//! Lint results are reported per compilation unit. In the chunked view
//! units are named `chunk-<index>` in document order; in the text view the
//! unit name is the program filename.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::chunk::Highlight;
use crate::model::pipeline::RunKind;
use crate::model::rhs::{CheckResult, Interaction};

/// Marker the worker embeds in a runtime error caused by the program using
/// definitions from the `global` module without importing it. The session
/// rewrites such errors into an actionable hint.
pub const MISSING_GLOBAL_MARKER: &str = "module-not-found: global";

/// Requests the session sends to the worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerRequest {
    Compile {
        dir: PathBuf,
        filename: String,
        type_check: bool,
    },
    Run {
        path: PathBuf,
        kind: RunKind,
    },
    Stop,
}

/// A request stamped with the id its replies must echo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerCommand {
    pub request_id: u64,
    #[serde(flatten)]
    pub request: WorkerRequest,
}

/// One compile diagnostic: a message plus the document-absolute ranges it
/// points at. An empty range list means the error has no source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileError {
    pub message: String,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// Values and check results produced by a completed run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub checks: Vec<CheckResult>,
}

/// Events the worker sends back to the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerEvent {
    Log {
        message: String,
    },
    SetupFinished,
    /// Lint diagnostics for one unit; highlights are unit-local
    LintFailure {
        name: String,
        errors: Vec<String>,
        #[serde(default)]
        highlights: Vec<Highlight>,
    },
    LintSuccess {
        name: String,
    },
    /// Compile diagnostics; highlights are document-absolute
    CompileFailure {
        errors: Vec<CompileError>,
    },
    CompileSuccess,
    RuntimeFailure {
        errors: Vec<String>,
    },
    RunFinished {
        result: RunResult,
    },
    Stopped,
}

/// An event plus the request id it answers, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerReply {
    #[serde(default)]
    pub request_id: Option<u64>,
    #[serde(flatten)]
    pub event: WorkerEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_command_wire_shape() {
        let cmd = WorkerCommand {
            request_id: 3,
            request: WorkerRequest::Compile {
                dir: PathBuf::from("/projects"),
                filename: "program.arr".to_string(),
                type_check: true,
            },
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"compile\""));
        assert!(json.contains("\"request_id\":3"));

        let back: WorkerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_unsolicited_event_has_no_request_id() {
        let reply: WorkerReply =
            serde_json::from_str(r#"{"type":"setupFinished"}"#).unwrap();
        assert_eq!(reply.request_id, None);
        assert_eq!(reply.event, WorkerEvent::SetupFinished);
    }

    #[test]
    fn test_compile_failure_round_trip() {
        let reply = WorkerReply {
            request_id: Some(7),
            event: WorkerEvent::CompileFailure {
                errors: vec![CompileError {
                    message: "unbound identifier x".to_string(),
                    highlights: vec![Highlight {
                        from_line: 5,
                        from_column: 2,
                        to_line: 5,
                        to_column: 8,
                    }],
                }],
            },
        };
        let json = serde_json::to_string(&reply).unwrap();
        let back: WorkerReply = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reply);
    }

    #[test]
    fn test_run_finished_defaults_missing_fields() {
        let reply: WorkerReply =
            serde_json::from_str(r#"{"type":"runFinished","request_id":2,"result":{}}"#).unwrap();
        match reply.event {
            WorkerEvent::RunFinished { result } => {
                assert!(result.interactions.is_empty());
                assert!(result.checks.is_empty());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
