//! Pipeline update handlers: explicit run/stop commands, coalesced
//! auto-run triggers, and inbound worker events.

use crate::commands::Cmd;
use crate::messages::PipelineMsg;
use crate::model::chunk::{Effect, ErrorState};
use crate::model::pipeline::CompileState;
use crate::model::{AppModel, EditorView};
use crate::worker::protocol::{
    WorkerCommand, WorkerEvent, WorkerReply, WorkerRequest, MISSING_GLOBAL_MARKER,
};

/// Auto-run debounce delay in milliseconds. Long enough to coalesce a
/// typing burst into one run; the latest edit wins.
pub const AUTO_RUN_DEBOUNCE_MS: u64 = 250;

/// Handle pipeline messages
pub fn update_pipeline(model: &mut AppModel, msg: PipelineMsg) -> Option<Cmd> {
    match msg {
        PipelineMsg::BeginStartup => {
            if model.pipeline.state != CompileState::NeedsStartup {
                return None;
            }
            tracing::info!("Worker message channel installed, waiting for setup");
            None
        }

        PipelineMsg::Run => {
            if !model.pipeline.state.can_start_run() {
                tracing::debug!(
                    "Run ignored in state {:?}",
                    model.pipeline.state
                );
                return None;
            }
            start_run(model)
        }

        PipelineMsg::AutoRunSettled { revision } => {
            if !model.pipeline.auto_run {
                return None;
            }
            if revision != model.pipeline.revision {
                tracing::debug!(
                    "Skipping stale auto-run trigger: revision {} != {}",
                    revision,
                    model.pipeline.revision
                );
                return None;
            }
            if !model.pipeline.state.can_start_run() {
                // A compile or run is in flight; the next edit reschedules.
                tracing::debug!("Coalescing auto-run while {:?}", model.pipeline.state);
                return None;
            }
            start_run(model)
        }

        PipelineMsg::Stop => {
            if model.pipeline.state != CompileState::Running {
                tracing::debug!("Stop ignored outside Running");
                return None;
            }
            let request_id = model.pipeline.active_request?;
            Some(Cmd::SendWorker(WorkerCommand {
                request_id,
                request: WorkerRequest::Stop,
            }))
        }

        PipelineMsg::Settle => {
            if model.pipeline.state.is_terminal_outcome() {
                model.pipeline.state = CompileState::Idle;
                model.pipeline.active_request = None;
            }
            None
        }

        PipelineMsg::Worker(reply) => handle_worker_reply(model, reply),
    }
}

/// Persist the buffer and dispatch a compile request
fn start_run(model: &mut AppModel) -> Option<Cmd> {
    let (dir, filename) = model.file.dir_and_name();
    let request_id = model.pipeline.begin_request();
    model.pipeline.state = CompileState::Compiling;
    model.interaction_errors.clear();

    match &mut model.view {
        EditorView::Chunks(doc) => {
            for chunk in &mut doc.chunks {
                chunk.error_state = ErrorState::Linting;
            }
        }
        EditorView::Text(buf) => buf.highlights.clear(),
    }

    let type_check = model.pipeline.type_check;
    let save = save_file_cmd(model);
    Some(Cmd::batch(vec![
        save,
        Cmd::SendWorker(WorkerCommand {
            request_id,
            request: WorkerRequest::Compile {
                dir,
                filename,
                type_check,
            },
        }),
    ]))
}

fn handle_worker_reply(model: &mut AppModel, reply: WorkerReply) -> Option<Cmd> {
    if model.pipeline.is_stale(reply.request_id) {
        tracing::debug!(
            "Discarding stale worker reply for request {:?} (active {:?})",
            reply.request_id,
            model.pipeline.active_request
        );
        return None;
    }

    match reply.event {
        WorkerEvent::Log { message } => {
            tracing::info!(target: "worker", "{}", message);
            None
        }

        WorkerEvent::SetupFinished => {
            if model.pipeline.state == CompileState::NeedsStartup {
                model.pipeline.state = CompileState::ReadyQueue;
                tracing::info!("Worker setup finished");
            }
            None
        }

        WorkerEvent::LintFailure {
            name,
            errors,
            highlights,
        } => {
            if let Some(doc) = model.view.as_chunks_mut() {
                if let Some(i) =
                    lint_chunk_index(&name).filter(|&i| i < doc.chunks.len())
                {
                    doc.chunks[i].error_state = ErrorState::Failed {
                        effect: Effect::Lint,
                        highlights,
                        failures: errors,
                    };
                    return None;
                }
            }
            // No chunk owns this unit (text view, or a stale name after a
            // restructure); surface the messages in the error panel.
            model.interaction_errors.extend(errors);
            None
        }

        WorkerEvent::LintSuccess { name } => {
            if let Some(doc) = model.view.as_chunks_mut() {
                if let Some(i) =
                    lint_chunk_index(&name).filter(|&i| i < doc.chunks.len())
                {
                    doc.chunks[i].error_state = ErrorState::Succeeded;
                }
            }
            None
        }

        WorkerEvent::CompileFailure { errors } => {
            if model.pipeline.state != CompileState::Compiling {
                tracing::debug!("CompileFailure outside Compiling ignored");
                return None;
            }
            model.pipeline.state = CompileState::CompileFailed;
            model.pipeline.active_request = None;

            match &mut model.view {
                EditorView::Chunks(doc) => {
                    for err in &errors {
                        if err.highlights.is_empty() {
                            model.interaction_errors.push(err.message.clone());
                            continue;
                        }
                        for h in &err.highlights {
                            let Some(i) = doc.chunk_at_line(h.from_line) else {
                                model.interaction_errors.push(err.message.clone());
                                continue;
                            };
                            match &mut doc.chunks[i].error_state {
                                ErrorState::Failed {
                                    effect: Effect::Compile,
                                    highlights,
                                    failures,
                                } => {
                                    highlights.push(*h);
                                    if !failures.contains(&err.message) {
                                        failures.push(err.message.clone());
                                    }
                                }
                                state => {
                                    *state = ErrorState::Failed {
                                        effect: Effect::Compile,
                                        highlights: vec![*h],
                                        failures: vec![err.message.clone()],
                                    };
                                }
                            }
                        }
                    }
                }
                EditorView::Text(buf) => {
                    buf.highlights = errors
                        .iter()
                        .flat_map(|e| e.highlights.iter().copied())
                        .collect();
                    model
                        .interaction_errors
                        .extend(errors.iter().map(|e| e.message.clone()));
                }
            }
            None
        }

        WorkerEvent::CompileSuccess => {
            if model.pipeline.state != CompileState::Compiling {
                tracing::debug!("CompileSuccess outside Compiling ignored");
                return None;
            }
            // Lint units that never reported individually are clean now
            if let Some(doc) = model.view.as_chunks_mut() {
                for chunk in &mut doc.chunks {
                    if chunk.error_state == ErrorState::Linting {
                        chunk.error_state = ErrorState::Succeeded;
                    }
                }
            }
            // A successful compile immediately queues the run
            model.pipeline.state = CompileState::NeedsRun;
            let request_id = model.pipeline.begin_request();
            model.pipeline.state = CompileState::Running;
            Some(Cmd::SendWorker(WorkerCommand {
                request_id,
                request: WorkerRequest::Run {
                    path: model.file.path.clone(),
                    kind: model.pipeline.run_kind,
                },
            }))
        }

        WorkerEvent::RuntimeFailure { errors } => {
            if model.pipeline.state != CompileState::Running {
                tracing::debug!("RuntimeFailure outside Running ignored");
                return None;
            }
            model.pipeline.state = CompileState::RunFailed;
            model.pipeline.active_request = None;
            model.interaction_errors = errors
                .iter()
                .map(|e| rewrite_runtime_error(e))
                .collect();
            None
        }

        WorkerEvent::RunFinished { result } => {
            if model.pipeline.state != CompileState::Running {
                tracing::debug!("RunFinished outside Running ignored");
                return None;
            }
            model.pipeline.state = CompileState::RunSucceeded;
            model.pipeline.active_request = None;
            model.rhs.replace(result.interactions, result.checks);
            None
        }

        WorkerEvent::Stopped => {
            if model.pipeline.state == CompileState::Running {
                model.pipeline.state = CompileState::Idle;
                model.pipeline.active_request = None;
                tracing::info!("Run stopped");
            }
            None
        }
    }
}

/// Command that persists the logical whole-document text to the file
pub fn save_file_cmd(model: &AppModel) -> Cmd {
    Cmd::SaveFile {
        path: model.file.path.clone(),
        content: model.view.logical_text(),
    }
}

/// Schedule a debounced auto-run (call after buffer edits).
/// Returns `None` when auto-run is disabled.
pub fn schedule_auto_run(model: &AppModel) -> Option<Cmd> {
    if !model.pipeline.auto_run {
        return None;
    }
    Some(Cmd::ScheduleAutoRun {
        revision: model.pipeline.revision,
        delay_ms: AUTO_RUN_DEBOUNCE_MS,
    })
}

/// Resolve a lint unit name of the form `chunk-<index>`
fn lint_chunk_index(name: &str) -> Option<usize> {
    name.strip_prefix("chunk-")?.parse().ok()
}

/// The well-known missing-global runtime failure is rewritten into an
/// actionable hint; everything else passes through verbatim.
fn rewrite_runtime_error(error: &str) -> String {
    if error.contains(MISSING_GLOBAL_MARKER) {
        "The program uses definitions from the global module, but it was never imported. \
         Add `include global` at the top of the file."
            .to_string()
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_chunk_index_parses_unit_names() {
        assert_eq!(lint_chunk_index("chunk-0"), Some(0));
        assert_eq!(lint_chunk_index("chunk-12"), Some(12));
        assert_eq!(lint_chunk_index("program.arr"), None);
        assert_eq!(lint_chunk_index("chunk-x"), None);
    }

    #[test]
    fn test_missing_global_rewrite() {
        let raw = format!("{MISSING_GLOBAL_MARKER}: could not load module");
        let rewritten = rewrite_runtime_error(&raw);
        assert!(rewritten.contains("include global"));

        let other = "field lookup failed";
        assert_eq!(rewrite_runtime_error(other), other);
    }
}
