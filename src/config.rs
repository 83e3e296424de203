use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default config file name, looked up in the site root.
pub const CONFIG_FILE: &str = "site.toml";

/// Site layout, relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markdown sources, walked recursively.
    pub content_dir: PathBuf,
    /// Page template containing `{{ Title }}` and `{{ Content }}`.
    pub template: PathBuf,
    /// Assets copied verbatim into the output.
    pub static_dir: PathBuf,
    /// Output directory. Wiped on every build.
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            template: PathBuf::from("template.html"),
            static_dir: PathBuf::from("static"),
            public_dir: PathBuf::from("public"),
        }
    }
}

/// Absolute locations for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    pub content_dir: PathBuf,
    pub template: PathBuf,
    pub static_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Join every configured path onto `root`. Absolute entries are kept.
    pub fn resolve(&self, root: &Path) -> SitePaths {
        SitePaths {
            content_dir: root.join(&self.content_dir),
            template: root.join(&self.template),
            static_dir: root.join(&self.static_dir),
            public_dir: root.join(&self.public_dir),
        }
    }
}
