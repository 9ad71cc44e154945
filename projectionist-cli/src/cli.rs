use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "projectionist")]
#[command(version)]
#[command(about = "Look up properties that per-directory projection registries declare for a file")]
#[command(long_about = "
projectionist answers questions such as \"which test file belongs to this
source file?\" from .projections.json registries. Every directory holding a
.projections.json declares a registry whose patterns apply below it; the
registries of a file are the ones in its directory and every ancestor.

Global arguments can be used with any command:
  --verbose     Show detailed tracing of every match decision
  --debug       Show stage summaries and dropped candidates
  --quiet       Suppress all log output except errors
  --format      Set output format (text, json)
  --from        Discover registries from this directory instead of the file

Example usage:
  projectionist file alternate src/net/codec.rs      # Alternate files
  projectionist scalar type src/net/codec.rs         # Declared types
  projectionist rec related src/net/codec.rs         # Everything related
  projectionist --format json query alternate a.c    # Roots and values as JSON
  projectionist transforms                           # Placeholder transforms
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Global output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Directory to discover registries from (defaults to the queried file)
    #[arg(long, value_name = "DIR", global = true)]
    pub from: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Unexpanded templates declared for a property, with their match context
    Raw(QueryArgs),

    /// Expanded values of a property, each with the root declaring it
    Query(QueryArgs),

    /// Expanded values of a property
    Scalar(QueryArgs),

    /// Expanded values of a property as paths under their roots
    File(QueryArgs),

    /// Paths reachable by following a property transitively
    Rec {
        #[command(flatten)]
        query: QueryArgs,

        /// Maximum number of rounds to follow
        #[arg(long, default_value_t = 10)]
        max_depth: usize,
    },

    /// Registry files applying to a path, nearest first
    Detect {
        /// File or directory to start from
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Transform names usable inside `{...}` placeholders
    Transforms,
}

#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    /// Property to look up
    pub key: String,

    /// File to look the property up for
    pub file: PathBuf,
}
