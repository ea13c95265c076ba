use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Rendering defaults read from `config.toml`. Command-line flags win over
/// every field here.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub title: Option<String>,
    pub author: Option<String>,
    /// `article` or `book`.
    pub style: Option<String>,
    pub include_toc: Option<bool>,
    /// Extra YAML language registry merged over the built-in one.
    pub languages: Option<PathBuf>,
}

impl Config {
    /// Reads the config at `path`. A missing file is not an error.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            log::debug!("No config at {}", path.display());
            return Ok(None);
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(languages) = config.languages.take() {
            config.languages = Some(expand_path(&languages));
        }

        Ok(Some(config))
    }

    /// Reads the config from its default location.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// `~/.config/ecrivain/config.toml`, with the home directory resolved.
    pub fn config_path() -> PathBuf {
        expand_path(Path::new(CONFIG_FILE))
    }
}

const CONFIG_FILE: &str = "~/.config/ecrivain/config.toml";

/// Expands `~` and `$VARS`; paths that cannot be expanded are kept as written.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            log::warn!("Cannot expand {raw}: {e}");
            path.to_path_buf()
        }
    }
}
