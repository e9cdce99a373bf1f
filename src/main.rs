//! Headless session driver: open a program, run it through the worker
//! pipeline once, print the results, and exit.
//!
//! The rendering layer that mounts editable widgets is not part of this
//! binary; focus and key-forwarding commands are no-ops here.

use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use chunkpad::cli::CliArgs;
use chunkpad::clipboard;
use chunkpad::commands::Cmd;
use chunkpad::config::IdeConfig;
use chunkpad::messages::{AppMsg, Msg, PipelineMsg};
use chunkpad::model::{AppModel, EditorMode, ErrorState};
use chunkpad::update::{sync_widgets, update};
use chunkpad::worker::WorkerBridge;

struct Session {
    model: AppModel,
    bridge: WorkerBridge,
    tx: Sender<Msg>,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) -> Result<()> {
        let cmd = update(&mut self.model, msg);
        if let Some(cmd) = cmd {
            self.execute(cmd)?;
        }
        if let Some(doc) = self.model.view.as_chunks() {
            sync_widgets(doc);
        }
        Ok(())
    }

    fn execute(&mut self, cmd: Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd)?;
                }
            }
            Cmd::SaveFile { path, content } => {
                let result = std::fs::write(&path, &content).map_err(|e| e.to_string());
                self.dispatch(Msg::App(AppMsg::SaveCompleted(result)))?;
            }
            Cmd::SendWorker(command) => self.bridge.send(&command)?,
            Cmd::ScheduleAutoRun { revision, delay_ms } => {
                let tx = self.tx.clone();
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(delay_ms));
                    let _ = tx.send(Msg::Pipeline(PipelineMsg::AutoRunSettled { revision }));
                });
            }
            Cmd::CopyToClipboard(text) => {
                if let Err(e) = clipboard::copy_text(&text) {
                    tracing::warn!("Clipboard copy failed: {}", e);
                }
            }
            // Focus and key forwarding belong to the rendering layer; the
            // headless driver has none.
            Cmd::FocusChunk(_) | Cmd::ForwardKeyToWidget { .. } => {}
        }
        Ok(())
    }
}

fn main() -> Result<ExitCode> {
    chunkpad::tracing::init();

    let args = CliArgs::parse();
    let mut config = IdeConfig::load();
    args.apply_overrides(&mut config);

    let contents = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let mut model = AppModel::new(args.path.clone(), &contents, config);
    if args.editor_mode() == EditorMode::Text {
        update(&mut model, Msg::App(AppMsg::SetEditorMode(EditorMode::Text)));
    }

    let (tx, rx) = mpsc::channel();
    let bridge = WorkerBridge::spawn(&model.config.backend, tx.clone())
        .context("could not start the worker backend")?;

    let mut session = Session { model, bridge, tx };
    session.dispatch(Msg::Pipeline(PipelineMsg::BeginStartup))?;

    let exit_code = drive(&mut session, &rx)?;
    print_results(&session.model);

    Ok(ExitCode::from(exit_code))
}

/// Drain the message loop until the first run reaches a terminal outcome
fn drive(session: &mut Session, rx: &Receiver<Msg>) -> Result<u8> {
    let mut run_requested = false;
    let mut last_footer = String::new();

    loop {
        let footer = session.model.footer_message();
        if footer != last_footer {
            println!("[{}]", footer);
            last_footer = footer;
        }

        let state = session.model.pipeline.state;
        if !run_requested && state.can_start_run() {
            run_requested = true;
            session.dispatch(Msg::Pipeline(PipelineMsg::Run))?;
            continue;
        }
        if run_requested && state.is_terminal_outcome() {
            return Ok(match state {
                chunkpad::model::CompileState::RunSucceeded => 0,
                _ => 1,
            });
        }

        match rx.recv() {
            Ok(msg) => session.dispatch(msg)?,
            Err(_) => {
                tracing::warn!("Worker channel closed before the run finished");
                return Ok(1);
            }
        }
    }
}

fn print_results(model: &AppModel) {
    for check in &model.rhs.checks {
        let status = if check.passed { "ok" } else { "FAILED" };
        println!("check {} ... {}", check.name, status);
        if let Some(message) = &check.message {
            println!("  {}", message);
        }
    }
    for interaction in &model.rhs.interactions {
        println!("{} = {}", interaction.name, interaction.value);
    }
    for error in &model.interaction_errors {
        eprintln!("error: {}", error);
    }
    if let Some(doc) = model.view.as_chunks() {
        for (i, chunk) in doc.chunks.iter().enumerate() {
            if let ErrorState::Failed { failures, .. } = &chunk.error_state {
                for failure in failures {
                    eprintln!("chunk {} (line {}): {}", i, chunk.start_line, failure);
                }
            }
        }
    }
}
