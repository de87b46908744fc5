use clap::{Args, Parser, Subcommand};

use crate::config::BackendKind;

#[derive(Parser)]
#[command(name = "console", version, about = "Console API for scan groups and addresses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP console API server
    Serve(ServeArgs),
    /// Build the module configuration for a scan-group details file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Backend: memory or http (overrides config)
    #[arg(long)]
    pub backend: Option<BackendKind>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// JSON file with scan-group details
    pub details: String,

    /// Treat the organization as entitled to port scanning
    #[arg(long)]
    pub port_scan_enabled: bool,

    /// Subscription id used for the quota check
    #[arg(long)]
    pub subscription: Option<i32>,

    /// Number of groups the organization already has
    #[arg(long, default_value_t = 0)]
    pub existing_groups: usize,
}
