use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const CONFIG_FILENAME: &str = "config.json";
const DATABASE_FILENAME: &str = "podcasts.json";
const ID_CACHE_FILENAME: &str = "id_cache.json";

/// Environment variable pointing at the Obsidian vault; overrides the
/// configured vault directory.
pub const VAULT_ENV_VAR: &str = "OBSIDIAN_VAULT_PATH";

/// On-disk shape of `config.json`. Only overrides are stored.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vault_dir: Option<PathBuf>,
}

/// Explicit configuration for one process run, constructed once at startup
/// and passed to each component. No global singleton, no import-time side
/// effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Database, ID cache, state files, config.json.
    pub data_dir: PathBuf,
    /// Obsidian vault root holding Episodes/, Claims/, Transcripts/.
    pub vault_dir: PathBuf,
}

impl VaultConfig {
    /// Resolve configuration for a data directory. Precedence for the vault
    /// location: `OBSIDIAN_VAULT_PATH` env var, then `config.json`, then
    /// `<data_dir>/vault`.
    pub fn load(data_dir: PathBuf) -> Result<Self> {
        let file = Self::read_config_file(&data_dir)?;
        let vault_dir = env::var_os(VAULT_ENV_VAR)
            .map(PathBuf::from)
            .or(file.vault_dir)
            .unwrap_or_else(|| data_dir.join("vault"));
        Ok(Self {
            data_dir,
            vault_dir,
        })
    }

    fn read_config_file(data_dir: &Path) -> Result<ConfigFile> {
        let path = data_dir.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist the vault override to `config.json`.
    pub fn save(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)?;
        }
        let file = ConfigFile {
            vault_dir: Some(self.vault_dir.clone()),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(self.data_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILENAME)
    }

    pub fn id_cache_path(&self) -> PathBuf {
        self.data_dir.join(ID_CACHE_FILENAME)
    }

    /// State files live next to the database.
    pub fn state_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    pub fn episodes_dir(&self) -> PathBuf {
        self.vault_dir.join("Episodes")
    }

    pub fn claims_dir(&self) -> PathBuf {
        self.vault_dir.join("Claims")
    }

    pub fn transcripts_dir(&self) -> PathBuf {
        self.vault_dir.join("Transcripts")
    }

    /// Create the data directory and the vault content directories.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            self.data_dir.clone(),
            self.episodes_dir(),
            self.claims_dir(),
            self.transcripts_dir(),
        ] {
            if !dir.exists() {
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
