// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: One subcommand per trigger plus probe and init helpers.

use clap::{Parser, Subcommand, ValueEnum};
use medic::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medic")]
#[command(about = "Health-driven restart and verification for a container group")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (default: medic.yml in the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Normal)]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Break an existing restart lease held by another invocation
    #[arg(long, global = true)]
    pub force: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Normal,
    Quiet,
    Json,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Normal => OutputMode::Normal,
            OutputFormat::Quiet => OutputMode::Quiet,
            OutputFormat::Json => OutputMode::Json,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Handle a monitoring alert read as JSON (exit 1 when the heal errors)
    Alert {
        /// Alert payload file, or - for stdin
        #[arg(short, long, default_value = "-")]
        payload: String,
    },

    /// Scheduled check: restart and verify only when the service is unhealthy
    Check,

    /// Restart the container group now, without health checks
    Restart,

    /// Probe a health endpoint once (exit 0 healthy, 1 unhealthy)
    Probe {
        /// Health URL (default: HEALTH_CHECK_URL or health_check_url from config)
        url: Option<String>,
    },

    /// Initialize a new medic.yml configuration file
    Init {
        /// Resource group name
        #[arg(long)]
        resource_group: Option<String>,

        /// Container group name
        #[arg(long)]
        container_group: Option<String>,
    },
}
