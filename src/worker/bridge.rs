//! Process bridge to the worker.
//!
//! The worker runs as a child process and is reachable only through
//! asynchronous message passing: requests are written to its stdin as
//! newline-delimited JSON, and a reader thread forwards every reply line
//! into the session's message channel. The session thread never blocks on
//! the worker.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};

use super::protocol::{WorkerCommand, WorkerReply};
use crate::config::BackendConfig;
use crate::messages::{Msg, PipelineMsg};

pub struct WorkerBridge {
    child: Child,
    stdin: ChildStdin,
    reader: Option<JoinHandle<()>>,
}

impl WorkerBridge {
    /// Spawn the backend process and start forwarding its replies into the
    /// session channel as pipeline messages.
    pub fn spawn(backend: &BackendConfig, tx: Sender<Msg>) -> Result<Self> {
        let mut child = Command::new(&backend.program)
            .args(&backend.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn worker backend '{}'", backend.program))?;

        let stdin = child
            .stdin
            .take()
            .context("worker backend has no stdin pipe")?;
        let stdout = child
            .stdout
            .take()
            .context("worker backend has no stdout pipe")?;

        tracing::info!("Started worker backend: {}", backend.program);

        let reader = thread::spawn(move || {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!("Worker stdout read failed: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<WorkerReply>(&line) {
                    Ok(reply) => {
                        if tx.send(Msg::Pipeline(PipelineMsg::Worker(reply))).is_err() {
                            // Session is gone; stop forwarding.
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Discarding malformed worker reply: {} ({})", line, e);
                    }
                }
            }
            tracing::info!("Worker reply stream closed");
        });

        Ok(Self {
            child,
            stdin,
            reader: Some(reader),
        })
    }

    /// Write one request to the worker's stdin
    pub fn send(&mut self, command: &WorkerCommand) -> Result<()> {
        let line =
            serde_json::to_string(command).context("failed to serialize worker request")?;
        tracing::debug!("worker <- {}", line);
        writeln!(self.stdin, "{}", line).context("failed to write to worker stdin")?;
        self.stdin.flush().context("failed to flush worker stdin")?;
        Ok(())
    }
}

impl Drop for WorkerBridge {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            tracing::debug!("Worker already exited: {}", e);
        }
        let _ = self.child.wait();
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}
