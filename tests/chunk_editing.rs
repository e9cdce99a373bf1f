//! Boundary-key restructuring tests: blank-chunk removal, split/merge, and
//! the selection-deletion focus rules.

mod common;

use common::{chunk_model, chunk_model_manual_run};
use chunkpad::commands::Cmd;
use chunkpad::messages::{ChunkMsg, Msg};
use chunkpad::model::{ErrorState, Position};
use chunkpad::update::update;

fn chunk_texts(model: &chunkpad::model::AppModel) -> Vec<String> {
    model
        .view
        .as_chunks()
        .unwrap()
        .chunks
        .iter()
        .map(|c| c.text.clone())
        .collect()
}

fn has_focus_cmd(cmd: &Option<Cmd>, index: usize) -> bool {
    cmd.as_ref()
        .map(|c| {
            c.flatten()
                .iter()
                .any(|leaf| matches!(leaf, Cmd::FocusChunk(i) if *i == index))
        })
        .unwrap_or(false)
}

fn has_forward_cmd(cmd: &Option<Cmd>) -> bool {
    cmd.as_ref()
        .map(|c| {
            c.flatten()
                .iter()
                .any(|leaf| matches!(leaf, Cmd::ForwardKeyToWidget { .. }))
        })
        .unwrap_or(false)
}

// ========================================================================
// Backspace
// ========================================================================

#[test]
fn test_backspace_removes_trailing_blank_chunk() {
    // chunks = ["x = 1", ""], cursor at start of chunk 1, press Backspace
    let mut model = chunk_model(&["x = 1", ""]);
    model.view.as_chunks_mut().unwrap().focused = Some(1);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 1,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["x = 1"]);
    assert_eq!(model.view.as_chunks().unwrap().focused, Some(0));
    assert!(has_focus_cmd(&cmd, 0));
    assert!(model.rhs.outdated);
}

#[test]
fn test_backspace_removes_blank_first_chunk() {
    let mut model = chunk_model(&["", "a"]);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 0,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["a"]);
    assert_eq!(model.view.as_chunks().unwrap().chunks[0].start_line, 1);
    assert!(has_focus_cmd(&cmd, 0));
}

#[test]
fn test_backspace_removes_blank_middle_chunk() {
    let mut model = chunk_model(&["a", "  ", "b"]);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 1,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["a", "b"]);
    assert_eq!(model.view.as_chunks().unwrap().chunks[1].start_line, 2);
    assert!(has_focus_cmd(&cmd, 0));
}

#[test]
fn test_backspace_at_chunk_start_merges_with_previous() {
    let mut model = chunk_model(&["abc", "def"]);
    model.view.as_chunks_mut().unwrap().focused = Some(1);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 1,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["abcdef"]);
    assert_eq!(model.view.as_chunks().unwrap().focused, Some(0));
    assert!(has_focus_cmd(&cmd, 0));
}

#[test]
fn test_backspace_mid_chunk_forwards_to_widget() {
    let mut model = chunk_model(&["abc", "def"]);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 1,
            cursor: Position::new(0, 2),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["abc", "def"]);
    assert!(has_forward_cmd(&cmd));
}

// ========================================================================
// Delete
// ========================================================================

#[test]
fn test_delete_removes_next_blank_chunk() {
    let mut model = chunk_model(&["a", "", "b"]);

    update(
        &mut model,
        Msg::Chunk(ChunkMsg::Delete {
            index: 0,
            cursor: Position::new(0, 1),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["a", "b"]);
    // Focus never left the deleting chunk
    assert_eq!(model.view.as_chunks().unwrap().focused, Some(0));
}

#[test]
fn test_delete_does_not_apply_from_last_chunk() {
    let mut model = chunk_model(&["a", ""]);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Delete {
            index: 1,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["a", ""]);
    assert!(has_forward_cmd(&cmd));
}

#[test]
fn test_delete_at_chunk_end_merges_next() {
    let mut model = chunk_model(&["ab", "cd"]);

    update(
        &mut model,
        Msg::Chunk(ChunkMsg::Delete {
            index: 0,
            cursor: Position::new(0, 2),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["abcd"]);
}

// ========================================================================
// Enter / split
// ========================================================================

#[test]
fn test_enter_splits_chunk_at_cursor() {
    let mut model = chunk_model_manual_run(&["ab\ncd"]);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Enter {
            index: 0,
            cursor: Position::new(1, 0),
            shift: false,
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["ab\n", "cd"]);
    assert_eq!(model.view.as_chunks().unwrap().focused, Some(1));
    assert!(has_focus_cmd(&cmd, 1));
    // A split persists the restructured document
    assert!(cmd
        .unwrap()
        .flatten()
        .iter()
        .any(|leaf| matches!(leaf, Cmd::SaveFile { .. })));
}

#[test]
fn test_split_then_backspace_merge_round_trips() {
    let original = "fun f():\n  body\nend";
    let mut model = chunk_model(&[original]);

    update(
        &mut model,
        Msg::Chunk(ChunkMsg::Enter {
            index: 0,
            cursor: Position::new(1, 2),
            shift: false,
        }),
    );
    assert_eq!(model.view.as_chunks().unwrap().chunks.len(), 2);

    update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 1,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(chunk_texts(&model), vec![original]);
}

#[test]
fn test_shift_enter_saves_without_splitting() {
    let mut model = chunk_model(&["x = 1"]);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Enter {
            index: 0,
            cursor: Position::new(0, 5),
            shift: true,
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["x = 1"]);
    assert!(matches!(cmd, Some(Cmd::SaveFile { .. })));
}

// ========================================================================
// Selection deletion focus rules
// ========================================================================

#[test]
fn test_backspace_selection_deletion_refocuses_before_first_selected() {
    let mut model = chunk_model(&["aa", "bb", "cc"]);
    {
        let doc = model.view.as_chunks_mut().unwrap();
        doc.chunks[1].select_all();
        doc.focused = Some(1);
    }

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 1,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["aa", "cc"]);
    assert_eq!(model.view.as_chunks().unwrap().focused, Some(0));
    assert!(has_focus_cmd(&cmd, 0));
    // The trigger chunk had a selection, so the key was swallowed
    assert!(!has_forward_cmd(&cmd));
}

#[test]
fn test_delete_selection_deletion_refocuses_after_first_selected() {
    let mut model = chunk_model(&["aa", "bb", "cc"]);
    {
        let doc = model.view.as_chunks_mut().unwrap();
        doc.chunks[0].select_all();
        doc.focused = Some(0);
    }

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Delete {
            index: 0,
            cursor: Position::new(0, 0),
        }),
    );

    // Chunk 0 was dropped entirely; refocus lands past the first selected
    assert_eq!(chunk_texts(&model), vec!["bb", "cc"]);
    assert_eq!(model.view.as_chunks().unwrap().focused, Some(1));
    assert!(has_focus_cmd(&cmd, 1));
}

#[test]
fn test_unmoved_focus_after_deletion_emits_save_instead() {
    let mut model = chunk_model(&["aa", "bb"]);
    {
        let doc = model.view.as_chunks_mut().unwrap();
        doc.chunks[0].select_all();
        doc.focused = Some(0);
    }

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 0,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(chunk_texts(&model), vec!["bb"]);
    // Focus target max(0, 0-1) == 0 is where focus already was: persist
    assert!(cmd
        .unwrap()
        .flatten()
        .iter()
        .any(|leaf| matches!(leaf, Cmd::SaveFile { .. })));
}

#[test]
fn test_deleting_every_chunk_leaves_one_clean_empty_chunk() {
    let mut model = chunk_model(&["aa", "bb"]);
    {
        let doc = model.view.as_chunks_mut().unwrap();
        doc.chunks[0].select_all();
        doc.chunks[1].select_all();
    }

    update(
        &mut model,
        Msg::Chunk(ChunkMsg::Backspace {
            index: 0,
            cursor: Position::new(0, 0),
        }),
    );

    let doc = model.view.as_chunks().unwrap();
    assert_eq!(doc.chunks.len(), 1);
    assert_eq!(doc.chunks[0].text, "");
    assert_eq!(doc.chunks[0].error_state, ErrorState::Succeeded);
    assert_eq!(doc.chunks[0].start_line, 1);
}

// ========================================================================
// Edits and arrows
// ========================================================================

#[test]
fn test_edit_rebases_later_chunks_and_invalidates() {
    let mut model = chunk_model(&["a", "b"]);
    let revision_before = model.pipeline.revision;

    update(
        &mut model,
        Msg::Chunk(ChunkMsg::Edited {
            index: 0,
            text: "a1\na2\na3".to_string(),
        }),
    );

    let doc = model.view.as_chunks().unwrap();
    assert_eq!(doc.chunks[0].error_state, ErrorState::NotLinted);
    assert_eq!(doc.chunks[1].start_line, 4);
    assert!(model.rhs.outdated);
    assert!(model.file.is_modified);
    assert_eq!(model.pipeline.revision, revision_before + 1);
}

#[test]
fn test_arrow_up_crosses_chunk_boundary_from_first_line() {
    let mut model = chunk_model(&["a", "b\nc"]);
    model.view.as_chunks_mut().unwrap().focused = Some(1);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::ArrowUp {
            index: 1,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(model.view.as_chunks().unwrap().focused, Some(0));
    assert!(has_focus_cmd(&cmd, 0));
}

#[test]
fn test_arrow_down_stays_inside_chunk_above_last_line() {
    let mut model = chunk_model(&["a\nb", "c"]);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::ArrowDown {
            index: 0,
            cursor: Position::new(0, 0),
        }),
    );

    assert_eq!(model.view.as_chunks().unwrap().focused, Some(0));
    assert!(has_forward_cmd(&cmd));
}

#[test]
fn test_arrow_down_crosses_chunk_boundary_from_last_line() {
    let mut model = chunk_model(&["a\nb", "c"]);

    let cmd = update(
        &mut model,
        Msg::Chunk(ChunkMsg::ArrowDown {
            index: 0,
            cursor: Position::new(1, 0),
        }),
    );

    assert_eq!(model.view.as_chunks().unwrap().focused, Some(1));
    assert!(has_focus_cmd(&cmd, 1));
}
