//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::classify::DetectMode;

/// Live preview for diagrams, Markdown and JSON
#[derive(Parser, Debug)]
#[command(
    name = "glimpse",
    version,
    about = "Render a diagram, Markdown or JSON preview from a file or stdin"
)]
pub struct CliArgs {
    /// File to preview; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Force a content type instead of auto-detection
    #[arg(short, long, value_enum, default_value_t = ModeArg::Auto)]
    pub mode: ModeArg,

    /// Print the saved history list and exit
    #[arg(long)]
    pub history: bool,

    /// Print the favorites list and exit
    #[arg(long)]
    pub favorites: bool,

    /// Do not record this render into history
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Auto,
    Diagram,
    Markdown,
    Json,
    Plain,
}

impl ModeArg {
    pub fn detect_mode(self) -> DetectMode {
        match self {
            ModeArg::Auto => DetectMode::Auto,
            ModeArg::Diagram => DetectMode::Diagram,
            ModeArg::Markdown => DetectMode::Markdown,
            ModeArg::Json => DetectMode::Json,
            ModeArg::Plain => DetectMode::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["glimpse"]);
        assert!(args.path.is_none());
        assert_eq!(args.mode, ModeArg::Auto);
        assert!(!args.no_save);
    }

    #[test]
    fn test_mode_flag() {
        let args = CliArgs::parse_from(["glimpse", "--mode", "json", "data.txt"]);
        assert_eq!(args.mode, ModeArg::Json);
        assert_eq!(args.path, Some(PathBuf::from("data.txt")));
        assert_eq!(args.mode.detect_mode(), DetectMode::Json);
    }

    #[test]
    fn test_list_flags() {
        let args = CliArgs::parse_from(["glimpse", "--history"]);
        assert!(args.history);
        assert!(!args.favorites);
    }
}
