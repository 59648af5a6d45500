use crate::{drainage::DrainOptions, queue::TieBreak, solver::SolverOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the configuration file.
pub fn path() -> Result<PathBuf, Error> {
    Ok(dirs::config_dir()
        .ok_or(Error::NoConfigDir)?
        .join("drainage")
        .join("config.toml"))
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shortest-path solver settings.
    pub solver: SolverOptions,

    /// Source queue settings.
    pub queue: Queue,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Queue {
    /// Order among cells of equal elevation.
    pub tie_break: TieBreak,
}

impl Config {
    pub fn save(&self) -> Result<PathBuf, Error> {
        let path = path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serialized = toml::to_string_pretty(self)?;
        std::fs::write(path, serialized.as_bytes()).map_err(Into::into)
    }

    pub fn load() -> Result<Self, Error> {
        Self::load_from(&path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path)?;
        toml::from_str(&data).map_err(Into::into)
    }

    /// Load the configuration at `path`, or at the default location when `None`.
    ///
    /// A missing file is not an error: it produces the default configuration.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match self::path() {
                Ok(path) => path,
                Err(Error::NoConfigDir) => return Ok(Config::default()),
                Err(err) => return Err(err),
            },
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file; using defaults");
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    pub fn drain_options(&self) -> DrainOptions {
        DrainOptions {
            solver: self.solver,
            tie_break: self.queue.tie_break,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration could not be loaded")]
    CouldNotLoad(#[from] std::io::Error),
    #[error("malformed configuration")]
    Malformed(#[from] toml::de::Error),
    #[error("failed to serialize")]
    CouldNotSerialize(#[from] toml::ser::Error),
    #[error("no configuration directory for this user")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.solver.verify);
        assert!(config.solver.early_exit);
        assert_eq!(config.queue.tie_break, TieBreak::RowMajor);
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
[solver]
early_exit = false

[queue]
tie_break = "reverse_row_major"
"#,
        )
        .unwrap();
        assert!(!config.solver.early_exit);
        assert!(config.solver.verify);
        assert_eq!(config.queue.tie_break, TieBreak::ReverseRowMajor);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            solver: SolverOptions {
                early_exit: false,
                verify: false,
            },
            queue: Queue {
                tie_break: TieBreak::ReverseRowMajor,
            },
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(Config::load_or_default(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[queue]\ntie_break = \"sideways\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path).unwrap_err(),
            Error::Malformed(_)
        ));
    }
}
