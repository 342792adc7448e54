use std::path::PathBuf;

use clap::{Parser, Subcommand};

use podvault::model::Platform;

#[derive(Parser, Debug)]
#[command(name = "podvault")]
#[command(about = "Archive podcast episodes as Markdown notes in an Obsidian vault")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print full error details on failure
    #[arg(long, global = true)]
    pub debug: bool,

    /// Override the data directory (database, ID cache, state files)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new episode from fetcher metadata
    AddPodcast {
        /// Source platform
        #[arg(long, value_enum)]
        platform: Platform,

        /// Source URL of the episode
        #[arg(long)]
        url: String,

        /// Metadata JSON file produced by the platform fetcher
        #[arg(long, value_name = "FILE")]
        metadata: PathBuf,

        /// Overwrite an existing entry for the same URL without prompting
        #[arg(long)]
        yes: bool,
    },

    /// Generate the vault notes for a registered episode
    ProcessPodcast {
        #[arg(long)]
        episode_id: String,

        /// Fetched transcript file (WebVTT or plain text)
        #[arg(long, value_name = "FILE")]
        transcript: Option<PathBuf>,
    },

    /// Delete an episode's artifacts and database entry
    CleanupPodcast {
        #[arg(long)]
        episode_id: String,

        /// Keep the entry, returning it to pending with empty file fields
        #[arg(long)]
        reset: bool,
    },

    /// List episodes in the database
    #[command(alias = "ls")]
    List,

    /// Show the most recently processed episode
    Status {
        /// Restrict to one platform's state
        #[arg(long, value_enum)]
        platform: Option<Platform>,
    },
}
