use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, IoError, Result},
    resolver::{parse_file_list, parse_loop_list, resolve, TaskList},
};

/// Output name used when none is given
pub const DEFAULT_OUTPUT: &str = "merged.gif";

/// Output path meaning "write to standard output"
pub const STDOUT_OUTPUT: &str = "-";

/// Everything one run needs
///
/// Built from command-line flags, optionally layered over a TOML file:
///
/// ```toml
/// files = ["intro.gif", "loop.gif"]
/// loops = [1, 3]
/// output = "merged.gif"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input files, in output order
    pub files: Vec<String>,

    /// Repeat count per file; empty means once each
    pub loops: Vec<u32>,

    /// Where to write the merged animation (`-` for stdout)
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            loops: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeFailed {
            reason: e.to_string(),
        })?;

        std::fs::write(path.as_ref(), content).map_err(|source| IoError::Output {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Apply raw command-line values on top of this configuration
    ///
    /// `files` and `loops` are the comma-separated strings exactly as given;
    /// `None` keeps the current value.
    pub fn with_overrides(
        mut self,
        files: Option<&str>,
        loops: Option<&str>,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(raw) = files {
            self.files = parse_file_list(raw)?;
        }
        if let Some(raw) = loops {
            self.loops = parse_loop_list(raw)?;
        }
        if let Some(output) = output {
            self.output = output;
        }
        Ok(self)
    }

    /// Resolve files and loop counts into tasks
    pub fn tasks(&self) -> Result<TaskList> {
        resolve(&self.files, &self.loops)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.tasks()?;
        Ok(())
    }

    /// Whether the merged animation goes to standard output
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == STDOUT_OUTPUT
    }
}
