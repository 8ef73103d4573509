//! `license-scanner`: inventory a JavaScript project's dependencies and assess license risk.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and initialise logging.
//! 2. Load policy config ([`license_scanner::config::load_config`]).
//! 3. Detect the lock file and parse it ([`license_scanner::scanner::Scanner`]).
//! 4. Detect each dependency's license from its install directory.
//! 5. Drop ignored dependencies and analyse risk ([`license_scanner::analyzer::analyze`]).
//! 6. Render the requested report ([`license_scanner::report`]).
//! 7. Exit `0`, or `1` when the risk level reaches the `fail_on` policy.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, ReportFormat};
use license_scanner::analyzer::analyze;
use license_scanner::config::load_config;
use license_scanner::fs::RealFileSystem;
use license_scanner::models::EnrichedDependency;
use license_scanner::report;
use license_scanner::scanner::Scanner;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    // Load policy config; --fail-on wins over the file
    let mut config = load_config(&path, cli.config.as_deref())?;
    if let Some(level) = cli.fail_on {
        config.policy.fail_on = level.into();
    }

    let fs = RealFileSystem::new();
    let scanner = Scanner::new(&path, &fs);

    let (lock_file, package_manager) = scanner
        .detect_lock_file()
        .with_context(|| format!("no supported lock file in {}", path.display()))?;
    let deps = scanner.parse(&lock_file, package_manager)?;

    let show_progress = !cli.quiet && matches!(cli.format, ReportFormat::Terminal);
    if show_progress {
        eprintln!(
            "  {} {} {} dependencies",
            "→".cyan(),
            package_manager,
            deps.len()
        );
    }

    let pb = if show_progress {
        Some(progress_bar(deps.len())?)
    } else {
        None
    };

    let enriched = scanner.enrich_with(package_manager, deps, |dep: &EnrichedDependency| {
        if let Some(pb) = &pb {
            pb.set_message(dep.name.clone());
            pb.inc(1);
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let enriched = config.filter_ignored(enriched);
    let analysis = analyze(&enriched);

    // Render report
    match cli.format {
        ReportFormat::Terminal => report::terminal::render(
            &enriched,
            &analysis,
            &path,
            package_manager,
            cli.verbose,
            cli.quiet,
        ),
        ReportFormat::Json => println!("{}", report::json::render(&enriched, &analysis)?),
    }

    if config.fails(analysis.risk_level) {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}
