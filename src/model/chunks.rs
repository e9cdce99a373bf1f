//! The chunked view of the document: an ordered sequence of chunks plus the
//! transient cross-chunk selection state.
//!
//! The chunk sequence is treated as an immutable value: structural
//! operations either rebuild the vector or mutate a single index and then
//! rebase the derived `start_line` fields for everything after it.

use super::chunk::{Chunk, ErrorState};
use super::selection::{Position, Selection};

/// Separator token used when exporting a multi-chunk selection to the
/// clipboard. Chunk boundaries are never written to disk in this form.
pub const CHUNK_SEPARATOR: &str = "#.CHUNK#";

/// Result of a multi-chunk selection deletion, reported back to the
/// boundary-key handler so it can decide focus movement and whether the
/// widget's default single-character delete must be suppressed.
#[derive(Debug)]
pub struct DeletionReport {
    /// The rebuilt chunk sequence (never empty)
    pub chunks: Vec<Chunk>,
    /// Whether the chunk count changed, meaning focus must move
    pub chunk_count_changed: bool,
    /// Whether the chunk the key event landed in had a selection
    pub trigger_had_selection: bool,
    /// Index of the first chunk that had a selection, for refocusing
    pub first_selected_chunk: Option<usize>,
}

/// Recompute `start_line` for every chunk at `from` and after.
/// `start_line(0) = 1`; each later chunk starts where the previous ended.
pub fn rebase_start_lines(chunks: &mut [Chunk], from: usize) {
    for i in from..chunks.len() {
        chunks[i].start_line = if i == 0 {
            1
        } else {
            chunks[i - 1].start_line + chunks[i - 1].line_count()
        };
    }
}

#[derive(Debug, Default)]
pub struct ChunkDocument {
    pub chunks: Vec<Chunk>,
    /// The chunk whose widget currently has keyboard focus
    pub focused: Option<usize>,
    /// Index where a cross-chunk mouse drag began; `None` outside a drag
    pub first_selected_chunk: Option<usize>,
    /// Whether the next focus change should advance the widget's cursor
    pub should_advance_cursor: bool,
}

impl ChunkDocument {
    /// Build a document from a chunk list, healing the empty-list case and
    /// assigning start lines.
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        let mut chunks = chunks;
        if chunks.is_empty() {
            chunks.push(Chunk::empty());
        }
        rebase_start_lines(&mut chunks, 0);
        Self {
            chunks,
            focused: Some(0),
            first_selected_chunk: None,
            should_advance_cursor: false,
        }
    }

    /// The logical whole-document text: chunk texts joined by the implicit
    /// newline separator.
    pub fn logical_text(&self) -> String {
        let texts: Vec<&str> = self.chunks.iter().map(|c| c.text.as_str()).collect();
        texts.join("\n")
    }

    /// Find the chunk containing an absolute 1-based line
    pub fn chunk_at_line(&self, line: usize) -> Option<usize> {
        self.chunks
            .iter()
            .position(|c| line >= c.start_line && line < c.start_line + c.line_count())
    }

    pub fn rebase_from(&mut self, from: usize) {
        rebase_start_lines(&mut self.chunks, from);
    }

    /// Remove a chunk outright and rebase everything after it
    pub fn remove_chunk(&mut self, index: usize) {
        self.chunks.remove(index);
        if self.chunks.is_empty() {
            self.chunks.push(Chunk::empty());
        }
        self.rebase_from(index.min(self.chunks.len() - 1));
    }

    /// Split the chunk at `index` at a local position. The text before the
    /// position stays; the text after it becomes a new chunk at `index + 1`.
    /// Merging the two halves back yields the original text.
    pub fn split_chunk(&mut self, index: usize, at: Position) {
        let offset = self.chunks[index].offset_at(at);
        let chunk = &mut self.chunks[index];
        let tail = chunk.text.split_off(offset);
        chunk.error_state = ErrorState::NotLinted;
        chunk.clear_selection();
        self.chunks.insert(index + 1, Chunk::new(tail));
        self.rebase_from(index);
    }

    /// Merge the chunk at `index` into its predecessor by direct
    /// concatenation, removing the implicit boundary between them.
    /// Returns the junction position inside the merged chunk.
    pub fn merge_with_previous(&mut self, index: usize) -> Position {
        let removed = self.chunks.remove(index);
        let prev = &mut self.chunks[index - 1];
        let junction = prev.end_position();
        prev.text.push_str(&removed.text);
        prev.error_state = ErrorState::NotLinted;
        prev.selection = Selection::collapsed(junction);
        self.rebase_from(index - 1);
        junction
    }

    /// Merge the chunk after `index` into the chunk at `index`
    pub fn merge_with_next(&mut self, index: usize) -> Position {
        self.merge_with_previous(index + 1)
    }

    /// Generic multi-chunk selection deletion. Pure: returns a report with
    /// the rebuilt sequence; the caller replaces the chunk list wholesale.
    pub fn delete_selected_chunks(&self, trigger_index: usize) -> DeletionReport {
        let mut first_selected_chunk = None;
        let mut trigger_had_selection = false;
        let mut rebuilt: Vec<Chunk> = Vec::with_capacity(self.chunks.len());

        for (i, chunk) in self.chunks.iter().enumerate() {
            if chunk.selection.is_empty() {
                rebuilt.push(chunk.clone());
                continue;
            }

            if first_selected_chunk.is_none() {
                first_selected_chunk = Some(i);
            }
            if i == trigger_index {
                trigger_had_selection = true;
            }

            let stripped = chunk.with_selection_removed();
            if stripped.text.is_empty() {
                continue;
            }
            rebuilt.push(stripped);
        }

        let chunk_count_changed = rebuilt.len() != self.chunks.len();
        if rebuilt.is_empty() {
            rebuilt.push(Chunk::empty());
        }
        rebase_start_lines(&mut rebuilt, 0);

        DeletionReport {
            chunks: rebuilt,
            chunk_count_changed,
            trigger_had_selection,
            first_selected_chunk,
        }
    }

    // === Cross-chunk drag selection ===

    /// Mouse-down inside a chunk: drop any existing multi-chunk selection
    /// and anchor a new drag at that chunk.
    pub fn begin_drag(&mut self, index: usize) {
        for chunk in &mut self.chunks {
            chunk.clear_selection();
        }
        self.first_selected_chunk = Some(index);
    }

    /// The pointer entered a chunk while the button is held. Selects the
    /// full span of chunks between the drag anchor and the entered chunk,
    /// clearing every chunk outside that span, so N independent widgets
    /// appear to carry one continuous selection.
    pub fn drag_into(&mut self, index: usize) {
        match self.first_selected_chunk {
            None => {
                self.first_selected_chunk = Some(index);
                self.chunks[index].select_all();
            }
            Some(anchor) if index <= anchor => {
                // selecting from bottom to the top
                for (i, chunk) in self.chunks.iter_mut().enumerate() {
                    if i < index || i > anchor {
                        chunk.clear_selection();
                    } else {
                        chunk.select_all();
                    }
                }
            }
            Some(anchor) => {
                // selecting from top to bottom
                for (i, chunk) in self.chunks.iter_mut().enumerate() {
                    if i > index || i < anchor {
                        chunk.clear_selection();
                    } else {
                        chunk.select_all();
                    }
                }
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.first_selected_chunk = None;
    }

    /// Text exported when copying a multi-chunk selection: each chunk's
    /// selected text, with the separator token and a newline between
    /// non-empty contributions. Chunks with no selection contribute nothing.
    pub fn selected_export_text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .chunks
            .iter()
            .filter(|c| !c.selection.is_empty())
            .map(|c| c.selected_text())
            .filter(|t| !t.is_empty())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(parts.join(&format!("{CHUNK_SEPARATOR}\n")))
    }
}
