//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::model::pipeline::RunKind;
use crate::model::selection::Position;
use crate::model::EditorMode;
use crate::worker::protocol::WorkerReply;

/// Where a widget selection event originated. Only genuine pointer drags
/// are applied to the model; programmatic `set_selection` echoes must be
/// ignored to avoid a feedback loop between model pushes and widget events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    Pointer,
    Programmatic,
}

/// Per-chunk controller messages: user intents forwarded from one
/// editable-widget instance.
#[derive(Debug, Clone)]
pub enum ChunkMsg {
    /// The widget's text changed
    Edited { index: usize, text: String },
    /// Enter pressed; splits the chunk at the cursor unless shifted
    Enter {
        index: usize,
        cursor: Position,
        shift: bool,
    },
    /// Backspace pressed with the cursor at the given local position
    Backspace { index: usize, cursor: Position },
    /// Delete pressed with the cursor at the given local position
    Delete { index: usize, cursor: Position },
    /// Arrow-Up pressed; crosses to the previous chunk from the first line
    ArrowUp { index: usize, cursor: Position },
    /// Arrow-Down pressed; crosses to the next chunk from the last line
    ArrowDown { index: usize, cursor: Position },
    /// Mouse button pressed inside a chunk
    MouseDown { index: usize, primary_button: bool },
    /// Pointer entered a chunk (drag detection uses the held-button flag)
    MouseEnter { index: usize, buttons_held: bool },
    /// Mouse button released; ends any cross-chunk drag
    DragFinished,
    /// The widget reported a selection change
    SelectionChanged {
        index: usize,
        anchor: Position,
        head: Position,
        origin: SelectionOrigin,
    },
    /// Copy the multi-chunk selection to the clipboard
    CopySelection,
}

/// Text-mode messages for the single-editor view
#[derive(Debug, Clone)]
pub enum TextMsg {
    /// The whole buffer contents changed
    Edited { contents: String },
}

/// Pipeline messages: explicit commands, coalesced auto-run triggers, and
/// inbound worker events.
#[derive(Debug, Clone)]
pub enum PipelineMsg {
    /// Fired once after the worker message channel is installed
    BeginStartup,
    /// Explicit run command
    Run,
    /// Stop the running program; a no-op unless running
    Stop,
    /// Debounced auto-run trigger, stamped with the revision it saw
    AutoRunSettled { revision: u64 },
    /// Settle a terminal outcome back to the quiescent state
    Settle,
    /// An event from the worker process
    Worker(WorkerReply),
}

/// Application-level messages (file operations, mode and preference changes)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Switch between the single-editor and chunked views
    SetEditorMode(EditorMode),
    /// File load completed (async result)
    FileLoaded {
        path: PathBuf,
        result: Result<String, String>,
    },
    /// File save completed (async result)
    SaveCompleted(Result<(), String>),
    SetTypeCheck(bool),
    SetAutoRun(bool),
    SetRunKind(RunKind),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Chunked-view messages (per-chunk controller)
    Chunk(ChunkMsg),
    /// Text-view messages
    Text(TextMsg),
    /// Pipeline messages (commands and worker events)
    Pipeline(PipelineMsg),
    /// App messages (file I/O, preferences)
    App(AppMsg),
}
