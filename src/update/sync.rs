//! Widget synchronization: push model state back onto mounted widgets.
//!
//! The model only ever writes through the weak handle; chunks whose widget
//! has been unmounted by the rendering layer are skipped silently.

use crate::model::chunk::{Effect, ErrorState, Highlight};
use crate::model::chunks::ChunkDocument;
use crate::model::selection::Position;

/// Push selection, error decorations, and focus onto every mounted widget
pub fn sync_widgets(doc: &ChunkDocument) {
    for (i, chunk) in doc.chunks.iter().enumerate() {
        let Some(widget) = chunk.editor.upgrade() else {
            continue;
        };
        let mut widget = widget.borrow_mut();

        widget.set_selection(chunk.selection);

        widget.clear_marks();
        if let ErrorState::Failed {
            effect, highlights, ..
        } = &chunk.error_state
        {
            for h in highlights {
                let (from, to) = localize(*effect, h, chunk.start_line);
                widget.mark_error(from, to);
            }
        }

        if doc.focused == Some(i) {
            widget.focus();
        }
    }
}

/// Translate a worker highlight into the widget's 0-based local space.
/// Lint ranges are chunk-local and 1-based; compile ranges are
/// document-absolute and shift by the chunk's start line.
fn localize(effect: Effect, h: &Highlight, start_line: usize) -> (Position, Position) {
    let shift = match effect {
        Effect::Lint => 1,
        Effect::Compile => start_line,
    };
    (
        Position::new(h.from_line.saturating_sub(shift), h.from_column),
        Position::new(h.to_line.saturating_sub(shift), h.to_column),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_highlights_shift_to_zero_based() {
        let h = Highlight {
            from_line: 1,
            from_column: 3,
            to_line: 2,
            to_column: 5,
        };
        let (from, to) = localize(Effect::Lint, &h, 10);
        assert_eq!(from, Position::new(0, 3));
        assert_eq!(to, Position::new(1, 5));
    }

    #[test]
    fn test_compile_highlights_shift_by_start_line() {
        let h = Highlight {
            from_line: 5,
            from_column: 2,
            to_line: 5,
            to_column: 8,
        };
        let (from, to) = localize(Effect::Compile, &h, 4);
        assert_eq!(from, Position::new(1, 2));
        assert_eq!(to, Position::new(1, 8));
    }
}
