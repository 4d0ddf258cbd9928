//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::export::ExportKind;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Game data metadata exporter
#[derive(Parser)]
#[command(
    name = "metamap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export index and hierarchy maps from game data snapshots",
    long_about = "Read a host snapshot of game records and write the JSON metadata files used by downstream generators.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Write metadata maps
    #[command(
        about = "Write index and hierarchy maps to the output folder",
        after_help = "Examples:\n  metamap export --snapshot game.snapshot.json\n  metamap export sounds sprites\n  metamap export object-tree --stdout\n  metamap export --out build/meta --json\n\nFiles:\n  sounds       sound_index_map.json\n  sprites      sprite_index_map.json\n  objects      object_index_map.json\n  object-tree  object_tree.json"
    )]
    Export {
        /// Exporters to run (all when omitted)
        #[arg(value_name = "KIND")]
        kinds: Vec<ExportKind>,

        /// Host snapshot file (overrides settings)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// paths.json location (overrides settings)
        #[arg(long)]
        paths: Option<PathBuf>,

        /// Write here instead of the folder named in paths.json
        #[arg(short, long, conflicts_with = "paths")]
        out: Option<PathBuf>,

        /// Print a single map to stdout instead of writing files
        #[arg(long, conflicts_with_all = ["out", "json"])]
        stdout: bool,

        /// Print a JSON result envelope
        #[arg(long)]
        json: bool,
    },

    /// Initialize project
    #[command(about = "Create .metamap/settings.toml and a paths.json template")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,

    /// Query an exported object tree
    #[command(
        about = "List the descendants of an object in object_tree.json",
        after_help = "Examples:\n  metamap tree o_enemy\n  metamap tree o_skill_ico --direct\n  metamap tree o_npc --file reference/data/object_tree.json --json"
    )]
    Tree {
        /// Object whose descendants to list
        root: String,

        /// Tree file (defaults to object_tree.json in the output folder)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only list direct children
        #[arg(long)]
        direct: bool,

        /// Print a JSON result envelope
        #[arg(long)]
        json: bool,
    },
}
