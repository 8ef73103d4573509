use std::path::PathBuf;

use clap::Parser;

use license_scanner::models::RiskLevel;

#[derive(Parser, Debug)]
#[command(
    name = "license-scanner",
    about = "Inventory JavaScript dependencies and assess license risk",
    version
)]
pub struct Cli {
    /// Project path to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.license-scanner/config.toml, fallback ~/.config/license-scanner/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub format: ReportFormat,

    /// Exit with code 1 at or above this risk level (overrides config)
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<RiskArg>,

    /// Show all dependencies and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RiskArg {
    Low,
    Medium,
    High,
}

impl From<RiskArg> for RiskLevel {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::Low => RiskLevel::Low,
            RiskArg::Medium => RiskLevel::Medium,
            RiskArg::High => RiskLevel::High,
        }
    }
}
