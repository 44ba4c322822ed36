//! The `KEY=VALUE` properties file holding the CLI's persistent settings.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::OpsError;

/// Environment variable overriding the properties file location.
pub const CONFIG_FILE_ENV: &str = "WSK_CONFIG_FILE";

/// File name used in the home directory.
pub const DEFAULT_FILE_NAME: &str = ".wskprops";

pub const APIHOST: &str = "APIHOST";
pub const AUTH: &str = "AUTH";
pub const NAMESPACE: &str = "NAMESPACE";
pub const APIVERSION: &str = "APIVERSION";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry { key: String, value: String },
    /// Comments, blank lines and anything unparseable, kept verbatim.
    Verbatim(String),
}

/// An ordered properties file.
///
/// Comments, blank lines and unknown keys survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    lines: Vec<Line>,
}

impl Properties {
    /// `$WSK_CONFIG_FILE`, else `~/.wskprops`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_FILE_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(DEFAULT_FILE_NAME))
    }

    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return Line::Verbatim(line.to_string());
                }
                match trimmed.split_once('=') {
                    Some((key, value)) if !key.trim().is_empty() => Line::Entry {
                        key: key.trim().to_string(),
                        value: value.trim().to_string(),
                    },
                    _ => {
                        warn!(line = index + 1, "ignoring malformed properties line");
                        Line::Verbatim(line.to_string())
                    }
                }
            })
            .collect();
        Self { lines }
    }

    /// Load from `path`; a missing file yields empty properties.
    pub fn load(path: &Path) -> Result<Self, OpsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "loaded properties");
                Ok(Self::parse(&text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(OpsError::Properties {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), OpsError> {
        std::fs::write(path, self.render()).map_err(|source| OpsError::Properties {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "saved properties");
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Entry { key, value } => {
                    let _ = writeln!(out, "{key}={value}");
                }
                Line::Verbatim(text) => {
                    let _ = writeln!(out, "{text}");
                }
            }
        }
        out
    }

    /// Value of the last entry for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|line| match line {
            Line::Entry { key: k, value } if k.as_str() == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set `key`, replacing every existing entry for it in place.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut found = false;
        self.lines.retain_mut(|line| match line {
            Line::Entry { key: k, value: v } if k.as_str() == key => {
                if found {
                    return false;
                }
                found = true;
                *v = value.to_string();
                true
            }
            _ => true,
        });
        if !found {
            self.lines.push(Line::Entry {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    /// Remove `key`; returns whether it was present.
    pub fn unset(&mut self, key: &str) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|line| !matches!(line, Line::Entry { key: k, .. } if k.as_str() == key));
        self.lines.len() != before
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry { key, value } => Some((key.as_str(), value.as_str())),
            Line::Verbatim(_) => None,
        })
    }
}
