//! chunkpad - chunk-based program editor core
//!
//! This crate provides the document model and pipeline logic for an editor
//! that shows one program either as a single text buffer or as an ordered
//! sequence of independently editable chunks, implementing the Elm
//! Architecture pattern.

pub mod chunker;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod tracing;
pub mod update;
pub mod widget;
pub mod worker;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::IdeConfig;
pub use messages::Msg;
pub use model::AppModel;
