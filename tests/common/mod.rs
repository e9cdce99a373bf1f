//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use chunkpad::config::IdeConfig;
use chunkpad::model::{AppModel, Chunk, Position, Selection};
use chunkpad::widget::{EditorWidget, WidgetHandle};

/// Create a session model over the given chunk texts, opened at a fixed
/// scratch path.
pub fn chunk_model(texts: &[&str]) -> AppModel {
    let chunks = texts.iter().map(|t| Chunk::new(*t)).collect();
    AppModel::with_chunks(
        PathBuf::from("/tmp/chunkpad-test/program.arr"),
        chunks,
        IdeConfig::default(),
    )
}

/// Same, but with auto-run disabled so edit messages return no timer command
pub fn chunk_model_manual_run(texts: &[&str]) -> AppModel {
    let chunks = texts.iter().map(|t| Chunk::new(*t)).collect();
    let config = IdeConfig {
        auto_run: false,
        ..IdeConfig::default()
    };
    AppModel::with_chunks(
        PathBuf::from("/tmp/chunkpad-test/program.arr"),
        chunks,
        config,
    )
}

/// A fake editable widget that records what the model pushes at it
#[derive(Debug, Default)]
pub struct RecordingWidget {
    pub selection: Option<Selection>,
    pub marks: Vec<(Position, Position)>,
    pub clear_count: usize,
    pub focused: bool,
}

impl EditorWidget for RecordingWidget {
    fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    fn clear_marks(&mut self) {
        self.marks.clear();
        self.clear_count += 1;
    }

    fn mark_error(&mut self, from: Position, to: Position) {
        self.marks.push((from, to));
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

/// Mount a recording widget on a chunk and return the owning handle so the
/// test can inspect what got pushed.
pub fn mount_widget(chunk: &mut Chunk) -> Rc<RefCell<RecordingWidget>> {
    let widget = Rc::new(RefCell::new(RecordingWidget::default()));
    let as_dyn: Rc<RefCell<dyn EditorWidget>> = widget.clone();
    chunk.editor = WidgetHandle::mounted(&as_dyn);
    widget
}
