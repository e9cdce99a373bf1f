//! Application model - the complete state of the editor session
//!
//! This module contains all the state types following the Elm Architecture
//! pattern.

pub mod chunk;
pub mod chunks;
pub mod pipeline;
pub mod rhs;
pub mod selection;
pub mod text;

pub use chunk::{Chunk, Effect, ErrorState, Highlight};
pub use chunks::{rebase_start_lines, ChunkDocument, DeletionReport, CHUNK_SEPARATOR};
pub use pipeline::{CompileState, Pipeline, RunKind};
pub use rhs::{CheckResult, Interaction, RhsObjects};
pub use selection::{Position, Selection};
pub use text::TextBuffer;

use std::path::PathBuf;

use crate::config::IdeConfig;

/// Which editing surface the user is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Text,
    Chunks,
}

/// The editing surface: one continuous buffer or the chunked view.
/// Both variants expose the same logical document.
#[derive(Debug)]
pub enum EditorView {
    Text(TextBuffer),
    Chunks(ChunkDocument),
}

impl EditorView {
    pub fn mode(&self) -> EditorMode {
        match self {
            EditorView::Text(_) => EditorMode::Text,
            EditorView::Chunks(_) => EditorMode::Chunks,
        }
    }

    /// The logical whole-document text, independent of the view
    pub fn logical_text(&self) -> String {
        match self {
            EditorView::Text(buf) => buf.text(),
            EditorView::Chunks(doc) => doc.logical_text(),
        }
    }

    /// Replace the entire document contents in whichever view is active.
    /// Text mode swaps the buffer; chunk mode re-chunks the contents.
    pub fn replace_contents(&mut self, contents: &str) {
        match self {
            EditorView::Text(buf) => *buf = TextBuffer::from_text(contents),
            EditorView::Chunks(doc) => {
                *doc = ChunkDocument::from_chunks(crate::chunker::chunks_from_source(contents));
            }
        }
    }

    pub fn as_chunks(&self) -> Option<&ChunkDocument> {
        match self {
            EditorView::Chunks(doc) => Some(doc),
            EditorView::Text(_) => None,
        }
    }

    pub fn as_chunks_mut(&mut self) -> Option<&mut ChunkDocument> {
        match self {
            EditorView::Chunks(doc) => Some(doc),
            EditorView::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextBuffer> {
        match self {
            EditorView::Text(buf) => Some(buf),
            EditorView::Chunks(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextBuffer> {
        match self {
            EditorView::Text(buf) => Some(buf),
            EditorView::Chunks(_) => None,
        }
    }
}

/// The program file backing this session
#[derive(Debug, Clone)]
pub struct ProgramFile {
    pub path: PathBuf,
    pub is_modified: bool,
}

impl ProgramFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            is_modified: false,
        }
    }

    /// Split the path into the (dir, filename) pair the compile request
    /// wants. Falls back to "." and the whole path when there is no parent.
    pub fn dir_and_name(&self) -> (PathBuf, String) {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string());
        (dir, name)
    }
}

/// The complete session model
#[derive(Debug)]
pub struct AppModel {
    /// The program file being edited
    pub file: ProgramFile,
    /// The active editing surface
    pub view: EditorView,
    /// File-level compile/run pipeline state
    pub pipeline: Pipeline,
    /// Results of the last successful run
    pub rhs: RhsObjects,
    /// Runtime failures for the dedicated error panel
    pub interaction_errors: Vec<String>,
    /// Persisted session configuration
    pub config: IdeConfig,
}

impl AppModel {
    /// Create a session over file contents, opening in the chunked view
    pub fn new(path: PathBuf, contents: &str, config: IdeConfig) -> Self {
        Self::with_chunks(path, crate::chunker::chunks_from_source(contents), config)
    }

    /// Create a session from an already reconstructed chunk list
    pub fn with_chunks(path: PathBuf, chunks: Vec<Chunk>, config: IdeConfig) -> Self {
        let pipeline = Pipeline::new(config.type_check, config.auto_run, config.run_kind);
        Self {
            file: ProgramFile::new(path),
            view: EditorView::Chunks(ChunkDocument::from_chunks(chunks)),
            pipeline,
            rhs: RhsObjects::default(),
            interaction_errors: Vec::new(),
            config,
        }
    }

    /// Footer message summarizing pipeline state and result freshness
    pub fn footer_message(&self) -> String {
        if self.rhs.outdated && self.pipeline.state.is_terminal_outcome() {
            format!("{} (results outdated)", self.pipeline.state.describe())
        } else {
            self.pipeline.state.describe().to_string()
        }
    }
}
