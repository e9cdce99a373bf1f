//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::worker::protocol::WorkerCommand;

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Persist buffer contents to the backing store
    SaveFile { path: PathBuf, content: String },
    /// Send a request to the worker process
    SendWorker(WorkerCommand),
    /// Start the auto-run debounce timer.
    /// After delay_ms, sends PipelineMsg::AutoRunSettled with this revision.
    ScheduleAutoRun { revision: u64, delay_ms: u64 },
    /// Move keyboard focus to a chunk's widget
    FocusChunk(usize),
    /// Let the widget perform its default handling of the key the model
    /// chose not to swallow (ordinary single-character delete, cursor move)
    ForwardKeyToWidget { index: usize },
    /// Put text on the system clipboard
    CopyToClipboard(String),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, collapsing the trivial cases
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Cmd::None))
            .collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Iterate the leaf commands, flattening batches
    pub fn flatten(&self) -> Vec<&Cmd> {
        match self {
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.flatten()).collect(),
            other => vec![other],
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_collapses_empty_and_single() {
        assert!(matches!(Cmd::batch(vec![]), Cmd::None));
        assert!(matches!(Cmd::batch(vec![Cmd::None]), Cmd::None));
        assert!(matches!(
            Cmd::batch(vec![Cmd::FocusChunk(1), Cmd::None]),
            Cmd::FocusChunk(1)
        ));
    }

    #[test]
    fn test_flatten_reaches_nested_leaves() {
        let cmd = Cmd::Batch(vec![
            Cmd::FocusChunk(0),
            Cmd::Batch(vec![Cmd::ForwardKeyToWidget { index: 2 }]),
        ]);
        let leaves = cmd.flatten();
        assert_eq!(leaves.len(), 2);
        assert!(matches!(leaves[1], Cmd::ForwardKeyToWidget { index: 2 }));
    }
}
