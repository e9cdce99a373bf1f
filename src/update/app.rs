//! App message handlers (file operations, mode and preference changes)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{
    AppModel, ChunkDocument, EditorMode, EditorView, ProgramFile, RhsObjects, TextBuffer,
};

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::SetEditorMode(mode) => {
            if model.view.mode() == mode {
                return None;
            }
            let contents = model.view.logical_text();
            model.view = match mode {
                EditorMode::Text => EditorView::Text(TextBuffer::from_text(&contents)),
                EditorMode::Chunks => EditorView::Chunks(ChunkDocument::from_chunks(
                    crate::chunker::chunks_from_source(&contents),
                )),
            };
            None
        }

        AppMsg::FileLoaded { path, result } => match result {
            Ok(contents) => {
                model.view.replace_contents(&contents);
                model.file = ProgramFile::new(path);
                model.pipeline.reset_for_file();
                model.rhs = RhsObjects::default();
                model.interaction_errors.clear();
                tracing::info!("Loaded: {}", model.file.path.display());
                None
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", path.display(), e);
                None
            }
        },

        AppMsg::SaveCompleted(result) => match result {
            Ok(()) => {
                model.file.is_modified = false;
                tracing::debug!("Saved: {}", model.file.path.display());
                None
            }
            Err(e) => {
                tracing::warn!("Save failed: {}", e);
                None
            }
        },

        AppMsg::SetTypeCheck(value) => {
            model.pipeline.type_check = value;
            model.config.type_check = value;
            persist_config(model);
            None
        }

        AppMsg::SetAutoRun(value) => {
            model.pipeline.auto_run = value;
            model.config.auto_run = value;
            persist_config(model);
            None
        }

        AppMsg::SetRunKind(kind) => {
            model.pipeline.run_kind = kind;
            model.config.run_kind = kind;
            persist_config(model);
            None
        }
    }
}

fn persist_config(model: &AppModel) {
    if let Err(e) = model.config.save() {
        tracing::warn!("Failed to save config: {}", e);
    }
}
