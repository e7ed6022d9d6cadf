mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./vidshelf.toml",
        "~/.config/vidshelf/config.toml",
        "/etc/vidshelf/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Parse configuration from TOML text without touching the filesystem.
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

fn expand_paths(config: &mut Config) {
    config.library.media_dir = expand(&config.library.media_dir);
    config.library.metadata_dir = expand(&config.library.metadata_dir);
}

fn expand(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    // Validate server config
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    // Validate library roots
    if config.library.media_dir == config.library.metadata_dir {
        anyhow::bail!(
            "media_dir and metadata_dir must differ (both are {:?})",
            config.library.media_dir
        );
    }
    if !config.library.media_dir.exists() {
        tracing::warn!(
            "Media directory does not exist and will be created: {:?}",
            config.library.media_dir
        );
    }

    // Validate provider
    if config.provider.enabled {
        let endpoint = config.provider.endpoint.as_deref().unwrap_or("");
        if endpoint.trim().is_empty() {
            anyhow::bail!("Metadata provider is enabled but has no endpoint");
        }
        if config.provider.timeout_secs == 0 {
            anyhow::bail!("Metadata provider timeout cannot be 0");
        }
    }

    Ok(())
}
