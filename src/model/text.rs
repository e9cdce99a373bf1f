//! The single-editor view of the document: one continuous text buffer.

use ropey::Rope;

use super::chunk::Highlight;
use super::selection::Selection;

/// Text-mode state. Compile errors land here as whole-document highlights;
/// no per-chunk localization is needed.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    pub buffer: Rope,
    pub selection: Selection,
    /// Compile error ranges, document-absolute
    pub highlights: Vec<Highlight>,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            selection: Selection::default(),
            highlights: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_contents() {
        let buf = TextBuffer::from_text("a\nb\nc");
        assert_eq!(buf.text(), "a\nb\nc");
        assert_eq!(buf.line_count(), 3);
    }
}
