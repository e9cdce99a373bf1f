//! The external compile/lint/run worker: wire protocol and process bridge.

pub mod bridge;
pub mod protocol;

pub use bridge::WorkerBridge;
pub use protocol::{
    CompileError, RunResult, WorkerCommand, WorkerEvent, WorkerReply, WorkerRequest,
};
