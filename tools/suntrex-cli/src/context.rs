//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use suntrex_catalog::catalog::Catalog;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration was loaded from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Read and ingest the catalog, from `path` or the configured one.
    pub async fn load_catalog(&self, path: Option<&str>) -> Result<Catalog> {
        let Some(path) = path.or(self.config.catalog.path.as_deref()) else {
            bail!("No catalog given. Pass --catalog or set catalog.path in suntrex.toml.");
        };
        let path = self.resolve_path(path);

        let spinner = self.output.spinner(&format!("Loading {}", path.display()));
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()));
        spinner.finish_and_clear();

        let catalog = Catalog::from_json(&content?)
            .with_context(|| format!("Invalid catalog: {}", path.display()))?;

        self.output.debug(&format!(
            "Loaded {} products ({}) from {}",
            catalog.len(),
            catalog.version(),
            path.display()
        ));
        Ok(catalog)
    }
}
