//! # Podvault Architecture
//!
//! Podvault is a podcast-archiving library that happens to have a CLI
//! client, not the other way around. Episodes are registered from fetcher
//! metadata, given stable human-readable IDs, tracked through a small
//! processing pipeline, and filed as Markdown notes into an Obsidian vault.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs)                              │
//! │  - Parses arguments, formats output, prompts, exit codes    │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, wires components together     │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add / process / cleanup / list / status business logic   │
//! │  - No I/O assumptions beyond the stores it is handed        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity and State
//!
//! Episode IDs are deterministic and sortable:
//! `24_09_24_danny_jones_jack_kruse_youtube_01` — date, sanitized podcast
//! and interviewee names, platform, and a per-(podcast, interviewee)
//! sequence counter persisted in its own cache file ([`id`]).
//!
//! Multi-step workflows persist a single current-episode marker per
//! platform ([`state`]) so `process-podcast` failures are visible to the
//! next invocation.
//!
//! ## What stays outside
//!
//! Platform fetchers (YouTube API, Vimeo scraping) are external: the CLI
//! consumes the JSON metadata and WebVTT transcripts they produce. Nothing
//! in this crate performs network I/O.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade — entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Episode`, `Metadata`, `Platform`, `Status`)
//! - [`id`]: Episode ID generation, parsing, and counter cache
//! - [`state`]: Per-platform processing-state files
//! - [`config`]: Explicit run configuration (no global singleton)
//! - [`markdown`], [`transcript`]: Vault note generation
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod id;
pub mod markdown;
pub mod model;
pub mod state;
pub mod store;
pub mod transcript;
