//! Command-line argument parsing for the session driver

use clap::Parser;
use std::path::PathBuf;

use crate::config::IdeConfig;
use crate::model::EditorMode;

/// A chunk-based program editor
#[derive(Parser, Debug)]
#[command(name = "chunkpad", version, about = "A chunk-based program editor")]
pub struct CliArgs {
    /// Program file to open
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Open as one continuous buffer instead of chunks
    #[arg(long)]
    pub text: bool,

    /// Enable the type checker for this session
    #[arg(long)]
    pub type_check: bool,

    /// Disable auto-run after edits
    #[arg(long)]
    pub no_auto_run: bool,

    /// Worker backend command, overriding the configured one
    #[arg(long, value_name = "CMD")]
    pub backend: Option<String>,
}

impl CliArgs {
    pub fn editor_mode(&self) -> EditorMode {
        if self.text {
            EditorMode::Text
        } else {
            EditorMode::Chunks
        }
    }

    /// Fold CLI overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut IdeConfig) {
        if self.type_check {
            config.type_check = true;
        }
        if self.no_auto_run {
            config.auto_run = false;
        }
        if let Some(backend) = &self.backend {
            let mut parts = backend.split_whitespace();
            if let Some(program) = parts.next() {
                config.backend.program = program.to_string();
                config.backend.args = parts.map(str::to_string).collect();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(path: &str) -> CliArgs {
        CliArgs {
            path: PathBuf::from(path),
            text: false,
            type_check: false,
            no_auto_run: false,
            backend: None,
        }
    }

    #[test]
    fn test_default_mode_is_chunks() {
        assert_eq!(args("program.arr").editor_mode(), EditorMode::Chunks);
    }

    #[test]
    fn test_text_flag_selects_text_mode() {
        let mut a = args("program.arr");
        a.text = true;
        assert_eq!(a.editor_mode(), EditorMode::Text);
    }

    #[test]
    fn test_overrides_only_apply_when_set() {
        let mut config = IdeConfig::default();
        config.type_check = false;
        args("program.arr").apply_overrides(&mut config);
        assert!(!config.type_check);
        assert!(config.auto_run);

        let mut a = args("program.arr");
        a.type_check = true;
        a.no_auto_run = true;
        a.apply_overrides(&mut config);
        assert!(config.type_check);
        assert!(!config.auto_run);
    }

    #[test]
    fn test_backend_override_splits_program_and_args() {
        let mut config = IdeConfig::default();
        let mut a = args("program.arr");
        a.backend = Some("node worker.js --stdio".to_string());
        a.apply_overrides(&mut config);
        assert_eq!(config.backend.program, "node");
        assert_eq!(config.backend.args, vec!["worker.js", "--stdio"]);
    }
}
