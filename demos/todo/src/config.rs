//! Command-line configuration

use std::path::PathBuf;

use clap::Parser;

use crate::components::TodoOwnProps;

/// Todo list TUI - tui-store binding example
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "todo")]
#[command(about = "A todo list TUI demonstrating tui-store bindings")]
pub struct Args {
    /// Title shown on the panel (defaults to "Untitled")
    #[arg(long, short)]
    pub title: Option<String>,

    /// Replay actions from a JSON-lines log before starting
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Write the applied actions to a JSON-lines log on exit
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Own props for the root panel
    pub fn own_props(&self) -> TodoOwnProps {
        TodoOwnProps {
            title: self.title.clone(),
        }
    }
}
