//! Editor mode switching and file lifecycle tests

mod common;

use std::path::PathBuf;

use common::chunk_model;
use chunkpad::messages::{AppMsg, Msg, TextMsg};
use chunkpad::model::{CompileState, EditorMode};
use chunkpad::update::update;

#[test]
fn test_mode_switch_preserves_logical_text() {
    let mut model = chunk_model(&["x = 1", "fun f():\n  x\nend"]);
    let logical = model.view.logical_text();

    update(&mut model, Msg::App(AppMsg::SetEditorMode(EditorMode::Text)));
    assert_eq!(model.view.mode(), EditorMode::Text);
    assert_eq!(model.view.logical_text(), logical);

    update(
        &mut model,
        Msg::App(AppMsg::SetEditorMode(EditorMode::Chunks)),
    );
    assert_eq!(model.view.mode(), EditorMode::Chunks);
    assert_eq!(model.view.logical_text(), logical);
}

#[test]
fn test_switching_to_current_mode_is_a_noop() {
    let mut model = chunk_model(&["a"]);
    let cmd = update(
        &mut model,
        Msg::App(AppMsg::SetEditorMode(EditorMode::Chunks)),
    );
    assert!(cmd.is_none());
    assert_eq!(model.view.mode(), EditorMode::Chunks);
}

#[test]
fn test_text_edit_invalidates_results() {
    let mut model = chunk_model(&["a"]);
    update(&mut model, Msg::App(AppMsg::SetEditorMode(EditorMode::Text)));

    let revision_before = model.pipeline.revision;
    update(
        &mut model,
        Msg::Text(TextMsg::Edited {
            contents: "b".to_string(),
        }),
    );

    assert!(model.rhs.outdated);
    assert!(model.file.is_modified);
    assert_eq!(model.pipeline.revision, revision_before + 1);
    assert_eq!(model.view.logical_text(), "b");
}

#[test]
fn test_file_load_resets_session_state() {
    let mut model = chunk_model(&["a"]);
    model.pipeline.state = CompileState::RunSucceeded;
    model.rhs.outdated = true;
    model.interaction_errors.push("leftover".to_string());

    update(
        &mut model,
        Msg::App(AppMsg::FileLoaded {
            path: PathBuf::from("/tmp/chunkpad-test/other.arr"),
            result: Ok("p = 1\n\nq = 2".to_string()),
        }),
    );

    assert_eq!(model.file.path, PathBuf::from("/tmp/chunkpad-test/other.arr"));
    assert!(!model.file.is_modified);
    assert_eq!(model.pipeline.state, CompileState::ReadyQueue);
    assert!(!model.rhs.outdated);
    assert!(model.interaction_errors.is_empty());

    let doc = model.view.as_chunks().unwrap();
    assert_eq!(doc.chunks.len(), 2);
    assert_eq!(doc.chunks[1].start_line, 2);
}

#[test]
fn test_failed_load_keeps_current_document() {
    let mut model = chunk_model(&["a"]);

    update(
        &mut model,
        Msg::App(AppMsg::FileLoaded {
            path: PathBuf::from("/tmp/chunkpad-test/missing.arr"),
            result: Err("no such file".to_string()),
        }),
    );

    assert_eq!(model.view.logical_text(), "a");
    assert_eq!(
        model.file.path,
        PathBuf::from("/tmp/chunkpad-test/program.arr")
    );
}
