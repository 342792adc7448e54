//! Transcript ingestion: turn a fetcher-supplied WebVTT (or plain text) file
//! into the standard transcript note in the vault.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::VaultConfig;
use crate::error::Result;

static CUE_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:(\d+):)?(\d{2}):(\d{2})\.(\d{3})\s*-->\s*(?:(\d+):)?(\d{2}):(\d{2})\.(\d{3})")
        .unwrap()
});

/// One timestamped span of speech.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Cue {
    /// `[HH:MM:SS.mmm --> HH:MM:SS.mmm]`
    fn header(&self) -> String {
        format!("[{} --> {}]", format_clock(self.start), format_clock(self.end))
    }
}

fn format_clock(seconds: f64) -> String {
    let h = (seconds / 3600.0) as u64;
    let m = ((seconds % 3600.0) / 60.0) as u64;
    let s = seconds % 60.0;
    format!("{:02}:{:02}:{:06.3}", h, m, s)
}

/// Parse WebVTT content into cues. Header lines, cue identifiers, and blank
/// lines are skipped; consecutive text lines under one timing are joined
/// with spaces.
pub fn parse_webvtt(content: &str) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut current: Option<Cue> = None;

    for line in content.lines() {
        let line = line.trim();
        if let Some(caps) = CUE_TIMING.captures(line) {
            if let Some(cue) = current.take() {
                if !cue.text.is_empty() {
                    cues.push(cue);
                }
            }
            current = Some(Cue {
                start: clock_seconds(&caps, 1),
                end: clock_seconds(&caps, 5),
                text: String::new(),
            });
        } else if let Some(cue) = current.as_mut() {
            if line.is_empty() {
                continue;
            }
            if !cue.text.is_empty() {
                cue.text.push(' ');
            }
            cue.text.push_str(line);
        }
    }
    if let Some(cue) = current {
        if !cue.text.is_empty() {
            cues.push(cue);
        }
    }
    cues
}

fn clock_seconds(caps: &regex::Captures<'_>, base: usize) -> f64 {
    let hours: f64 = caps
        .get(base)
        .map(|m| m.as_str().parse().unwrap_or(0.0))
        .unwrap_or(0.0);
    let minutes: f64 = caps[base + 1].parse().unwrap_or(0.0);
    let seconds: f64 = caps[base + 2].parse().unwrap_or(0.0);
    let millis: f64 = caps[base + 3].parse().unwrap_or(0.0);
    hours * 3600.0 + minutes * 60.0 + seconds + millis / 1000.0
}

/// Render cues in the standard transcript note format.
pub fn render_transcript(cues: &[Cue]) -> String {
    let mut lines = vec!["# Transcript".to_string(), String::new(), "```timestamp-transcript".to_string()];
    for cue in cues {
        lines.push(String::new());
        lines.push(cue.header());
        lines.push(cue.text.clone());
    }
    lines.push("```".to_string());
    lines.join("\n") + "\n"
}

/// Writes transcript notes into the vault's Transcripts directory.
pub struct TranscriptWriter {
    transcripts_dir: PathBuf,
}

impl TranscriptWriter {
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            transcripts_dir: config.transcripts_dir(),
        }
    }

    /// Convert the fetched transcript at `source` into
    /// `Transcripts/{episode_id}_transcript.md`. WebVTT input is parsed into
    /// timestamped cues; anything else is carried over as plain text.
    pub fn write_note(&self, episode_id: &str, source: &Path) -> Result<PathBuf> {
        let raw = fs::read_to_string(source)?;
        let content = if raw.contains("-->") {
            render_transcript(&parse_webvtt(&raw))
        } else {
            format!("# Transcript\n\n{}\n", raw.trim_end())
        };

        fs::create_dir_all(&self.transcripts_dir)?;
        let path = self
            .transcripts_dir
            .join(format!("{}_transcript.md", episode_id));
        fs::write(&path, content)?;
        Ok(path)
    }
}
