//! Chunked-view update functions: the per-chunk controller side of every
//! widget event, including the boundary-key restructuring rules.

use crate::commands::Cmd;
use crate::messages::{ChunkMsg, SelectionOrigin};
use crate::model::chunk::ErrorState;
use crate::model::selection::{Position, Selection};
use crate::model::AppModel;

use super::pipeline::{save_file_cmd, schedule_auto_run};

/// Which neighbor a deleting key refocuses toward after a multi-chunk
/// selection deletion
#[derive(Debug, Clone, Copy)]
enum DeleteDirection {
    Backward,
    Forward,
}

/// Handle chunked-view messages
pub fn update_chunks(model: &mut AppModel, msg: ChunkMsg) -> Option<Cmd> {
    match msg {
        ChunkMsg::Edited { index, text } => {
            {
                let doc = model.view.as_chunks_mut()?;
                if index >= doc.chunks.len() {
                    return None;
                }
                let chunk = &mut doc.chunks[index];
                chunk.text = text;
                chunk.error_state = ErrorState::NotLinted;
                doc.rebase_from(index);
            }
            note_buffer_edit(model)
        }

        ChunkMsg::Enter {
            index,
            cursor,
            shift,
        } => {
            if shift {
                // Shift+Enter commits without splitting
                let doc = model.view.as_chunks_mut()?;
                doc.should_advance_cursor = false;
                return Some(save_file_cmd(model));
            }
            let target = {
                let doc = model.view.as_chunks_mut()?;
                if index >= doc.chunks.len() {
                    return None;
                }
                doc.split_chunk(index, cursor);
                let target = index + 1;
                doc.focused = Some(target);
                doc.should_advance_cursor = false;
                target
            };
            let edit = note_buffer_edit(model);
            Some(Cmd::batch(vec![
                Cmd::FocusChunk(target),
                save_file_cmd(model),
                edit.into(),
            ]))
        }

        ChunkMsg::Backspace { index, cursor } => handle_backspace(model, index, cursor),
        ChunkMsg::Delete { index, cursor } => handle_delete(model, index, cursor),

        ChunkMsg::ArrowUp { index, cursor } => {
            let doc = model.view.as_chunks_mut()?;
            if cursor.line == 0 && index > 0 {
                doc.focused = Some(index - 1);
                doc.should_advance_cursor = false;
                Some(Cmd::FocusChunk(index - 1))
            } else {
                Some(Cmd::ForwardKeyToWidget { index })
            }
        }

        ChunkMsg::ArrowDown { index, cursor } => {
            let doc = model.view.as_chunks_mut()?;
            if index >= doc.chunks.len() {
                return None;
            }
            let last_line = doc.chunks[index].line_count() - 1;
            if cursor.line == last_line && index < doc.chunks.len() - 1 {
                doc.focused = Some(index + 1);
                doc.should_advance_cursor = false;
                Some(Cmd::FocusChunk(index + 1))
            } else {
                Some(Cmd::ForwardKeyToWidget { index })
            }
        }

        ChunkMsg::MouseDown {
            index,
            primary_button,
        } => {
            let doc = model.view.as_chunks_mut()?;
            if index >= doc.chunks.len() {
                return None;
            }
            doc.should_advance_cursor = false;
            doc.focused = Some(index);
            if primary_button {
                doc.begin_drag(index);
            }
            None
        }

        ChunkMsg::MouseEnter {
            index,
            buttons_held,
        } => {
            if !buttons_held {
                return None;
            }
            let doc = model.view.as_chunks_mut()?;
            if index >= doc.chunks.len() {
                return None;
            }
            doc.drag_into(index);
            None
        }

        ChunkMsg::DragFinished => {
            let doc = model.view.as_chunks_mut()?;
            doc.end_drag();
            None
        }

        ChunkMsg::SelectionChanged {
            index,
            anchor,
            head,
            origin,
        } => {
            if origin != SelectionOrigin::Pointer {
                // Echo of a programmatic set_selection; applying it would
                // feed the model's own push back into itself.
                return None;
            }
            let doc = model.view.as_chunks_mut()?;
            if index >= doc.chunks.len() {
                return None;
            }
            doc.chunks[index].selection = Selection::normalized(anchor, head);
            None
        }

        ChunkMsg::CopySelection => {
            let doc = model.view.as_chunks()?;
            doc.selected_export_text().map(Cmd::CopyToClipboard)
        }
    }
}

/// Backspace restructuring rules, in priority order: drop a blank chunk,
/// merge across the boundary from the chunk's first position, then fall
/// back to multi-chunk selection deletion.
fn handle_backspace(model: &mut AppModel, index: usize, cursor: Position) -> Option<Cmd> {
    enum Action {
        RemoveFirstBlank,
        RemoveBlank,
        MergePrevious,
        Fallback,
    }

    let action = {
        let doc = model.view.as_chunks()?;
        if index >= doc.chunks.len() {
            return None;
        }
        let any_selection = doc.chunks.iter().any(|c| !c.selection.is_empty());
        if index == 0 && doc.chunks.len() > 1 && doc.chunks[0].is_blank() {
            Action::RemoveFirstBlank
        } else if index > 0 && doc.chunks[index].is_blank() {
            Action::RemoveBlank
        } else if !any_selection && index > 0 && cursor == Position::default() {
            Action::MergePrevious
        } else {
            Action::Fallback
        }
    };

    match action {
        Action::RemoveFirstBlank => {
            let doc = model.view.as_chunks_mut()?;
            doc.remove_chunk(0);
            doc.focused = Some(0);
            let edit = note_buffer_edit(model);
            Some(Cmd::batch(vec![Cmd::FocusChunk(0), edit.into()]))
        }
        Action::RemoveBlank => {
            let doc = model.view.as_chunks_mut()?;
            doc.remove_chunk(index);
            doc.focused = Some(index - 1);
            let edit = note_buffer_edit(model);
            Some(Cmd::batch(vec![Cmd::FocusChunk(index - 1), edit.into()]))
        }
        Action::MergePrevious => {
            let doc = model.view.as_chunks_mut()?;
            doc.merge_with_previous(index);
            doc.focused = Some(index - 1);
            let edit = note_buffer_edit(model);
            Some(Cmd::batch(vec![Cmd::FocusChunk(index - 1), edit.into()]))
        }
        Action::Fallback => {
            apply_selection_deletion(model, index, DeleteDirection::Backward)
        }
    }
}

/// Delete mirrors Backspace but looks forward: drop the next blank chunk,
/// merge the next chunk in from the end position, then fall back to
/// multi-chunk selection deletion. Never applies from the last chunk.
fn handle_delete(model: &mut AppModel, index: usize, cursor: Position) -> Option<Cmd> {
    enum Action {
        RemoveNextBlank,
        MergeNext,
        Fallback,
    }

    let action = {
        let doc = model.view.as_chunks()?;
        if index >= doc.chunks.len() {
            return None;
        }
        let any_selection = doc.chunks.iter().any(|c| !c.selection.is_empty());
        let not_last = index < doc.chunks.len() - 1;
        if not_last && doc.chunks[index + 1].is_blank() {
            Action::RemoveNextBlank
        } else if !any_selection && not_last && cursor == doc.chunks[index].end_position() {
            Action::MergeNext
        } else {
            Action::Fallback
        }
    };

    match action {
        Action::RemoveNextBlank => {
            let doc = model.view.as_chunks_mut()?;
            doc.remove_chunk(index + 1);
            let edit = note_buffer_edit(model);
            Some(Cmd::batch(vec![edit.into()]))
        }
        Action::MergeNext => {
            let doc = model.view.as_chunks_mut()?;
            doc.merge_with_next(index);
            let edit = note_buffer_edit(model);
            Some(Cmd::batch(vec![edit.into()]))
        }
        Action::Fallback => apply_selection_deletion(model, index, DeleteDirection::Forward),
    }
}

/// Run the generic multi-chunk selection deletion and apply its focus rule:
/// when the chunk count shrank, refocus next to the first selected chunk;
/// when that focus move would be a no-op, persist instead, because content
/// changed with no structural change visible to the user.
fn apply_selection_deletion(
    model: &mut AppModel,
    index: usize,
    direction: DeleteDirection,
) -> Option<Cmd> {
    let (first_selected, count_changed, had_selection, new_len) = {
        let doc = model.view.as_chunks_mut()?;
        let report = doc.delete_selected_chunks(index);
        let out = (
            report.first_selected_chunk,
            report.chunk_count_changed,
            report.trigger_had_selection,
            report.chunks.len(),
        );
        doc.chunks = report.chunks;
        out
    };

    let mut cmds = Vec::new();
    let mut focus_unmoved = false;

    if count_changed {
        if let Some(first) = first_selected {
            let target = match direction {
                DeleteDirection::Forward => (first + 1).min(new_len - 1),
                DeleteDirection::Backward => first.saturating_sub(1),
            };
            let doc = model.view.as_chunks_mut()?;
            if doc.focused == Some(target) {
                focus_unmoved = true;
            } else {
                doc.focused = Some(target);
                cmds.push(Cmd::FocusChunk(target));
            }
        }
    }

    if first_selected.is_some() {
        let edit = note_buffer_edit(model);
        cmds.push(edit.into());
        if focus_unmoved {
            cmds.push(save_file_cmd(model));
        }
    }

    if !had_selection {
        cmds.push(Cmd::ForwardKeyToWidget { index });
    }

    Some(Cmd::batch(cmds))
}

/// Bookkeeping shared by every mutation of the buffer text: results go
/// stale immediately, the file needs saving, and auto-run may be scheduled.
fn note_buffer_edit(model: &mut AppModel) -> Option<Cmd> {
    model.pipeline.bump_revision();
    model.rhs.mark_outdated();
    model.file.is_modified = true;
    schedule_auto_run(model)
}
