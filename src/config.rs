// client/src/config.rs
// Client configuration (not user-specific), loaded from a JSON file and CLI flags
use crate::cli::Cli;
use crate::error::{AppError, AppResult};
use crate::services::contact::EmailPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Simulated latency of each mock backend call, in milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Delays {
    pub otp_dispatch_ms: u64,
    pub username_check_ms: u64,
    pub account_creation_ms: u64,
    pub password_reset_ms: u64,
    pub social_sign_in_ms: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            otp_dispatch_ms: 2000,
            username_check_ms: 500,
            account_creation_ms: 2000,
            password_reset_ms: 2000,
            social_sign_in_ms: 500,
        }
    }
}

impl Delays {
    pub fn instant() -> Self {
        Self {
            otp_dispatch_ms: 0,
            username_check_ms: 0,
            account_creation_ms: 0,
            password_reset_ms: 0,
            social_sign_in_ms: 0,
        }
    }

    pub fn otp_dispatch(&self) -> Duration {
        Duration::from_millis(self.otp_dispatch_ms)
    }

    pub fn username_check(&self) -> Duration {
        Duration::from_millis(self.username_check_ms)
    }

    pub fn account_creation(&self) -> Duration {
        Duration::from_millis(self.account_creation_ms)
    }

    pub fn password_reset(&self) -> Duration {
        Duration::from_millis(self.password_reset_ms)
    }

    pub fn social_sign_in(&self) -> Duration {
        Duration::from_millis(self.social_sign_in_ms)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Email domain accepted on the login and password reset screens.
    /// `None` accepts any well-formed address.
    pub login_email_domain: Option<String>,
    pub desktop_notifications_enabled: bool,
    pub default_city: String,
    pub log_filter: String,
    pub delays: Delays,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            login_email_domain: Some("gmail.com".to_string()),
            desktop_notifications_enabled: true,
            default_city: "Delhi".to_string(),
            log_filter: "info".to_string(),
            delays: Delays::default(),
        }
    }
}

impl ClientConfig {
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".sel_marketplace.json")
    }

    /// Reads the config at `path`. A missing file yields the defaults,
    /// a malformed one is an error.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        serde_json::from_str(&data).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let data = serde_json::to_string_pretty(self).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, data)?;
        info!("Wrote config to {}", path.display());
        Ok(())
    }

    /// Loads the file named on the command line (or the default one) and
    /// applies the CLI overrides on top.
    pub fn resolve(cli: &Cli) -> AppResult<Self> {
        let path = cli.config.clone().unwrap_or_else(Self::default_path);
        let mut config = Self::load_from(&path)?;
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.any_email {
            self.login_email_domain = None;
        } else if let Some(domain) = &cli.email_domain {
            self.login_email_domain = Some(domain.trim_start_matches('@').to_string());
        }
        if cli.no_desktop_notifications {
            self.desktop_notifications_enabled = false;
        }
        if cli.fast {
            self.delays = Delays::instant();
        }
    }

    pub fn login_email_policy(&self) -> EmailPolicy {
        match &self.login_email_domain {
            Some(domain) => EmailPolicy::Domain(domain.clone()),
            None => EmailPolicy::Any,
        }
    }
}
