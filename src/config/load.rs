use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::{CompressConfig, SheetConfig};
use crate::cli::CompressionLevel;

/// Newest project file version this build understands
pub const CONFIG_VERSION: u32 = 1;

/// A project file together with the directory its paths are relative to
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SheetConfig,
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse project file text as if it had been read from `path`.
    /// Files written by a newer version are rejected.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: SheetConfig = serde_json::from_str(content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if config.version > CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {} (expected at most {})",
                config.version,
                path.display(),
                CONFIG_VERSION
            );
        }

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Expand the `input` entries into paths.
    ///
    /// Glob patterns expand in sorted order and must match at least one
    /// path. Plain entries (files or directories) are passed through for
    /// input discovery to check.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut results = Vec::new();

        for pattern in &self.config.input {
            if !is_glob_pattern(pattern) {
                results.push(self.config_dir.join(pattern));
                continue;
            }

            let full_pattern = self.config_dir.join(pattern);
            let matched = glob::glob(&full_pattern.to_string_lossy())
                .with_context(|| format!("invalid glob pattern: {}", pattern))?
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("failed to read glob entry: {}", pattern))?;

            if matched.is_empty() {
                bail!("input pattern matched nothing: {}", pattern);
            }
            results.extend(matched);
        }

        Ok(results)
    }

    pub fn input_list(&self) -> Option<PathBuf> {
        self.resolve_path(self.config.input_list.as_deref())
    }

    pub fn image(&self) -> Option<PathBuf> {
        self.resolve_path(self.config.image.as_deref())
    }

    pub fn map(&self) -> Option<PathBuf> {
        self.resolve_path(self.config.map.as_deref())
    }

    /// PNG compression requested by the project file, validated like `--compress`
    pub fn compression(&self) -> Result<Option<CompressionLevel>> {
        let level = match &self.config.compress {
            None => return Ok(None),
            Some(CompressConfig::Level(n)) => n.to_string().parse(),
            Some(CompressConfig::Max(s)) => s.parse(),
        };

        level.map(Some).map_err(anyhow::Error::msg)
    }

    fn resolve_path(&self, path: Option<&str>) -> Option<PathBuf> {
        path.map(|p| self.config_dir.join(p))
    }
}

/// Check if a pattern contains glob characters.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}
