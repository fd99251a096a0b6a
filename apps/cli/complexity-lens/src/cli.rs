//! CLI definitions for complexity-lens.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Estimate time and space complexity of LeetCode solutions.
#[derive(Debug, Parser)]
#[command(name = "complexity-lens")]
#[command(about = "Extract code from a LeetCode page and ask Gemini for its complexity")]
#[command(version)]
pub struct Cli {
    /// Directory holding config.json and storage.json
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory for complexity-lens.log (default: <config dir>/logs)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full analysis cycle against a saved page
    Analyze {
        /// Saved HTML of the page
        #[arg(long)]
        page: PathBuf,

        /// URL the page was saved from
        #[arg(long)]
        url: String,
    },

    /// Print the code the extractor finds on a saved page
    Extract {
        /// Saved HTML of the page
        #[arg(long)]
        page: PathBuf,
    },

    /// Manage the stored Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum KeyAction {
    /// Show whether a key is stored (never prints the key)
    Show,

    /// Store a key; surrounding whitespace is dropped
    Set {
        /// The API key
        key: String,
    },

    /// Remove the stored key
    Clear,
}
