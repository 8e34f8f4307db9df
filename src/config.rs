use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub tmdb: TmdbConfig,
  /// Custom title for the header (defaults to "flicks" if not set)
  pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbConfig {
  /// API base URL; the default is the public v3 endpoint
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Language code sent with every request
  #[serde(default = "default_language")]
  pub language: String,
}

impl Default for TmdbConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      language: default_language(),
    }
  }
}

fn default_base_url() -> String {
  "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
  "en-US".to_string()
}

impl Config {
  /// Load configuration.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./flicks.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/flicks/config.yaml
  ///
  /// Unlike the token, the config file is optional: without one, defaults
  /// apply.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Config::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("flicks.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("flicks").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Get the TMDB API read access token from environment variables.
  ///
  /// Checks FLICKS_TMDB_TOKEN first, then TMDB_ACCESS_TOKEN as fallback.
  pub fn get_api_token() -> Result<String> {
    std::env::var("FLICKS_TMDB_TOKEN")
      .or_else(|_| std::env::var("TMDB_ACCESS_TOKEN"))
      .map_err(|_| {
        eyre!(
          "TMDB access token not found. Set FLICKS_TMDB_TOKEN or TMDB_ACCESS_TOKEN environment variable."
        )
      })
  }

  /// Header title: configured value or the app name.
  pub fn header_title(&self) -> &str {
    self.title.as_deref().unwrap_or("flicks")
  }
}
