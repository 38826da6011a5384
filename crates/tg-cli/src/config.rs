//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use tg_client::SslVerify;
use thiserror::Error;

/// Directory under the platform config dir holding the config file.
const APP_DIR_NAME: &str = "timetagger_cli";
const CONFIG_FILE_NAME: &str = "config.txt";
const ENV_PREFIX: &str = "TIMETAGGER_";

/// Written by `setup` when the config file is missing or blank.
pub const INITIAL_CONFIG: &str = r#"# This is the TimeTagger CLI configuration, in toml format.
# Clear or remove this file to reset to factory defaults.

# Set the base API URL, for example:
# - "https://timetagger.app/api/v2/"  -> default
# - "http://localhost/timetagger/api/v2/"  -> a local server
api_url = "https://timetagger.app/api/v2/"

# Set your API token.
# Go to the account page, copy the token, paste it here (between the quotes).
api_token = ""

# If you're self-hosting, you might need to set your own self-signed certificate
# or disable the verification of the SSL certificate. Disabling verification
# might expose your application to attacks.
# You can set the path to a self-signed certificate for verification:
# - ssl_verify = "path/to/certificate"
ssl_verify = true
"#;

/// Configuration errors. Each one tells the user how to recover.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory could be determined.
    #[error("could not determine the config directory, pass --config <PATH>")]
    NoConfigDir,
    /// The config file does not exist.
    #[error("Config not set, run 'timetagger setup' first.")]
    NotFound { path: PathBuf },
    /// The config file could not be parsed.
    #[error("invalid config {}: {source}. Run 'timetagger setup' to fix.", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },
    /// `api_url` is absent.
    #[error("No api_url set in config. Run 'timetagger setup' to fix.")]
    MissingUrl,
    /// `api_url` is not an HTTP(S) URL.
    #[error(
        "The api_url must start with 'http://' or 'https://', got {url:?}. Run 'timetagger setup' to fix."
    )]
    InvalidUrl { url: String },
    /// `api_token` is absent.
    #[error("No api_token set in config. Run 'timetagger setup' to fix.")]
    MissingToken,
}

/// The file as written by the user, before validation.
#[derive(Deserialize)]
struct RawConfig {
    api_url: Option<String>,
    api_token: Option<String>,
    #[serde(default)]
    ssl_verify: SslVerify,
}

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the TimeTagger API.
    pub api_url: String,
    /// Token sent with every request.
    pub api_token: String,
    /// TLS certificate verification.
    pub ssl_verify: SslVerify,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_token", &"[REDACTED]")
            .field("ssl_verify", &self.ssl_verify)
            .finish()
    }
}

impl Config {
    /// Returns `explicit` or the default config file location.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => default_config_path().ok_or(ConfigError::NoConfigDir),
        }
    }

    /// Loads and validates the config file, with `TIMETAGGER_*` environment
    /// variables taking precedence over the file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let raw: RawConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;

        let api_url = raw.api_url.ok_or(ConfigError::MissingUrl)?;
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl { url: api_url });
        }
        let api_token = raw.api_token.ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            api_url,
            api_token,
            ssl_verify: raw.ssl_verify,
        })
    }
}

/// Returns the platform-specific config file path.
///
/// On Linux: `~/.config/timetagger_cli/config.txt`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Writes the initial config when the file is missing or blank.
///
/// The file holds a secret, so on Unix it is made unreadable to others.
pub fn prepare_config_file(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    let needs_template = match std::fs::read_to_string(path) {
        Ok(content) => content.trim().is_empty(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    if needs_template {
        tracing::debug!(path = %path.display(), "writing initial config");
        std::fs::write(path, INITIAL_CONFIG)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o640))
            .with_context(|| format!("failed to restrict permissions of {}", path.display()))?;
    }

    Ok(())
}
