//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Smelter: edit frontmatter data through a generated form
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: smelter.toml)
    #[arg(short = 'C', long, global = true, default_value = "smelter.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the inferred field schema as JSON
    #[command(visible_alias = "s")]
    Schema {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Write the editable form as HTML
    #[command(visible_alias = "r")]
    Render {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Rebuild data from an edited form and write it back
    #[command(visible_alias = "a")]
    Apply {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// The edited form (HTML written by `render`)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        form: PathBuf,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Apply scripted form edits and write the result back
    #[command(visible_alias = "e")]
    Edit {
        #[command(flatten)]
        args: EditArgs,
    },

    /// Check that files survive infer -> render -> rebuild unchanged
    #[command(visible_alias = "c")]
    Check {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

/// Shared output options for commands that write data back.
#[derive(clap::Args, Debug, Clone)]
pub struct WriteArgs {
    /// Print the result instead of writing the file
    #[arg(long)]
    pub dry: bool,
}

/// Edit command arguments.
///
/// Operations run in this order: sets, duplicates, removes, moves, then
/// undos. Elements are addressed by their shown label.
#[derive(clap::Args, Debug, Clone)]
pub struct EditArgs {
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Set a value: `LABEL=VALUE`
    #[arg(long = "set", value_name = "LABEL=VALUE")]
    pub sets: Vec<String>,

    /// Duplicate an element
    #[arg(long = "duplicate", value_name = "LABEL")]
    pub duplicates: Vec<String>,

    /// Remove an element
    #[arg(long = "remove", value_name = "LABEL")]
    pub removes: Vec<String>,

    /// Move an element before another: `LABEL=TARGET`
    #[arg(long = "move", value_name = "LABEL=TARGET")]
    pub moves: Vec<String>,

    /// Undo the last N operations
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    #[command(flatten)]
    pub write: WriteArgs,
}
