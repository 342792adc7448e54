use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;

use podvault::api::PodvaultApi;
use podvault::commands::{CmdMessage, CmdResult, MessageLevel};
use podvault::config::VaultConfig;
use podvault::error::{Result, VaultError};
use podvault::model::{Episode, Metadata, Platform};
use podvault::store::fs::FileStore;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;
    if let Err(e) = run(cli) {
        if debug {
            eprintln!("{} {:?}", "Error:".red().bold(), e);
        } else {
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let config = VaultConfig::load(data_dir)?;
    config.ensure_dirs()?;

    let store = FileStore::new(config.database_path());
    let mut api = PodvaultApi::new(store, &config)?;

    match cli.command {
        Commands::AddPodcast {
            platform,
            url,
            metadata,
            yes,
        } => handle_add(&mut api, platform, &url, &metadata, yes),
        Commands::ProcessPodcast {
            episode_id,
            transcript,
        } => {
            let result = api.process_podcast(&episode_id, transcript.as_deref())?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::CleanupPodcast { episode_id, reset } => {
            let result = api.cleanup_podcast(&episode_id, reset)?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::List => {
            let result = api.list_podcasts()?;
            print_episode_table(&result);
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Status { platform } => {
            let result = api.processing_status(platform)?;
            print_messages(&result.messages);
            Ok(())
        }
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "podvault", "podvault")
        .ok_or_else(|| VaultError::Store("could not determine a data directory".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn handle_add(
    api: &mut PodvaultApi<FileStore>,
    platform: Platform,
    url: &str,
    metadata_path: &Path,
    yes: bool,
) -> Result<()> {
    let metadata = Metadata::from_path(metadata_path)?;

    match api.add_podcast(url, platform, &metadata, yes) {
        Ok(result) => {
            print_messages(&result.messages);
            print_next_step(&result.episodes[0]);
            Ok(())
        }
        Err(VaultError::DuplicateUrl { episode_id, .. }) => {
            let existing = api.get_episode(&episode_id)?;
            println!("\nPodcast already exists:");
            println!("Episode ID: {}", existing.episode_id);
            println!("Title: {}", existing.title);
            println!("Podcast: {}", existing.podcast_name);
            println!("Interviewee: {}", existing.interviewee.name);
            println!("Status: {}", existing.status);

            if !confirm("\nWould you like to overwrite this entry? (y/N): ")? {
                println!("Operation cancelled.");
                return Ok(());
            }

            let result = api.add_podcast(url, platform, &metadata, true)?;
            print_messages(&result.messages);
            print_next_step(&result.episodes[0]);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_next_step(episode: &Episode) {
    println!("\nRun next command:");
    println!(
        "{}",
        format!("podvault process-podcast --episode-id {}", episode.episode_id).cyan()
    );
}

fn print_episode_table(result: &CmdResult) {
    for episode in &result.episodes {
        let status = match episode.status {
            podvault::model::Status::Complete => episode.status.to_string().green(),
            podvault::model::Status::Error => episode.status.to_string().red(),
            podvault::model::Status::Processing => episode.status.to_string().yellow(),
            podvault::model::Status::Pending => episode.status.to_string().normal(),
        };
        println!(
            "{}  {:<10}  {}",
            episode.episode_id.bold(),
            status,
            episode.title
        );
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
