//! Chunk model - one independently editable segment of the program

use serde::{Deserialize, Serialize};

use super::selection::{Position, Selection};
use crate::widget::WidgetHandle;

/// A text range reported by the worker. Lines and columns are 1-based,
/// the way the compiler reports source locations.
///
/// Whether the range is chunk-local or document-absolute depends on the
/// [`Effect`] it arrived with; see [`ErrorState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub from_line: usize,
    pub from_column: usize,
    pub to_line: usize,
    pub to_column: usize,
}

/// Which pipeline stage produced a failure, and therefore which coordinate
/// space its highlights are in: lint highlights are relative to the chunk's
/// own first line, compile highlights are relative to the whole program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Lint,
    Compile,
}

/// Per-chunk lint/compile status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorState {
    NotLinted,
    Linting,
    Succeeded,
    Failed {
        effect: Effect,
        highlights: Vec<Highlight>,
        failures: Vec<String>,
    },
}

/// One independently editable segment of the logical document.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// The chunk's own source text, no surrounding markers
    pub text: String,
    /// Absolute 1-based line at which this chunk begins in the logical
    /// whole-document text. Derived; rebased after every structural change.
    pub start_line: usize,
    /// Local selection, always forward-ordered
    pub selection: Selection,
    /// Lint/compile status for this chunk
    pub error_state: ErrorState,
    /// Weak back-reference to the widget currently rendering this chunk.
    /// Owned by the rendering layer; upgrades to `None` once unmounted.
    pub editor: WidgetHandle,
}

impl Chunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_line: 1,
            selection: Selection::default(),
            error_state: ErrorState::NotLinted,
            editor: WidgetHandle::unmounted(),
        }
    }

    /// The empty chunk synthesized when a deletion would otherwise leave the
    /// document with no chunks at all. Starts out lint-clean.
    pub fn empty() -> Self {
        Self {
            error_state: ErrorState::Succeeded,
            ..Self::new("")
        }
    }

    /// Number of lines in this chunk's text (an empty chunk is one line)
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Whitespace-only chunks are "blank" for boundary-key purposes
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Position just past the last character of the chunk
    pub fn end_position(&self) -> Position {
        let last = self.line_count() - 1;
        let column = self
            .text
            .rsplit('\n')
            .next()
            .map(|line| line.chars().count())
            .unwrap_or(0);
        Position::new(last, column)
    }

    /// Byte offset of a local position, clamped to the text's bounds
    pub fn offset_at(&self, pos: Position) -> usize {
        let mut base = 0;
        for (i, line) in self.text.split('\n').enumerate() {
            if i == pos.line {
                let in_line = line
                    .char_indices()
                    .nth(pos.column)
                    .map(|(byte, _)| byte)
                    .unwrap_or(line.len());
                return base + in_line;
            }
            base += line.len() + 1;
        }
        self.text.len()
    }

    /// The text covered by the current selection
    pub fn selected_text(&self) -> &str {
        let from = self.offset_at(self.selection.start());
        let to = self.offset_at(self.selection.end());
        &self.text[from..to]
    }

    /// Copy of this chunk with the selected text stripped out and the
    /// selection collapsed to the cut point
    pub fn with_selection_removed(&self) -> Chunk {
        let from = self.offset_at(self.selection.start());
        let to = self.offset_at(self.selection.end());
        let mut text = String::with_capacity(self.text.len() - (to - from));
        text.push_str(&self.text[..from]);
        text.push_str(&self.text[to..]);
        Chunk {
            text,
            start_line: self.start_line,
            selection: Selection::collapsed(self.selection.start()),
            error_state: ErrorState::NotLinted,
            editor: self.editor.clone(),
        }
    }

    /// Select the chunk's entire text
    pub fn select_all(&mut self) {
        self.selection = Selection {
            anchor: Position::default(),
            head: self.end_position(),
        };
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }
}
