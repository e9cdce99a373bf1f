//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Every reducer is
//! synchronous; the only suspension point in the system is the worker
//! process on the far side of the message channel.

mod app;
mod chunks;
mod pipeline;
mod sync;
mod text;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

pub use app::update_app;
pub use chunks::update_chunks;
pub use pipeline::{save_file_cmd, schedule_auto_run, update_pipeline, AUTO_RUN_DEBOUNCE_MS};
pub use sync::sync_widgets;
pub use text::update_text;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    tracing::debug!(target: "message", "processing {}", msg_name(&msg));
    match msg {
        Msg::Chunk(m) => chunks::update_chunks(model, m),
        Msg::Text(m) => text::update_text(model, m),
        Msg::Pipeline(m) => pipeline::update_pipeline(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

fn msg_name(msg: &Msg) -> String {
    match msg {
        Msg::Chunk(m) => format!("Chunk::{:?}", m),
        Msg::Text(m) => format!("Text::{:?}", m),
        Msg::Pipeline(m) => format!("Pipeline::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
