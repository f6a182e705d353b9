use clap::Parser;
use std::path::PathBuf;

/// Terminal client for the SEL classifieds marketplace demo.
#[derive(Debug, Parser)]
#[command(name = "sel", version, about)]
pub struct Cli {
    /// Path to the JSON config file (defaults to ~/.sel_marketplace.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of the temp directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Only accept login emails at this domain
    #[arg(long, value_name = "DOMAIN", conflicts_with = "any_email")]
    pub email_domain: Option<String>,

    /// Accept any well-formed email on the login screen
    #[arg(long)]
    pub any_email: bool,

    /// Never raise desktop notifications for demo codes
    #[arg(long)]
    pub no_desktop_notifications: bool,

    /// Skip all simulated network delays
    #[arg(long)]
    pub fast: bool,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    pub write_default_config: bool,
}
