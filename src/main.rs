//! Click-Distance main entry point
//!
//! This is the command-line interface for the Click-Distance navigation meter.

use anyhow::Context;
use clap::Parser;
use click_distance::config::{load_config_with_hash, Config, SiteEntry};
use click_distance::navigation::{NavigationRequest, NavigationSearch};
use click_distance::output::{print_table, write_json_lines, SiteReport};
use click_distance::render::build_renderer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Click-Distance: how many clicks from a homepage to the pages that matter
///
/// For every configured site, Click-Distance renders the homepage and follows
/// on-site links level by level until it reaches one of the site's target
/// pages, then reports the number of clicks and the path taken.
#[derive(Parser, Debug)]
#[command(name = "click-distance")]
#[command(version)]
#[command(about = "Measures click distance from a homepage to target pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be measured without rendering anything
    #[arg(long)]
    dry_run: bool,

    /// Only measure the named site (repeatable)
    #[arg(long = "site", value_name = "NAME")]
    sites: Vec<String>,

    /// Print one JSON object per site instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let sites = select_sites(&config, &cli.sites)?;

    if cli.dry_run {
        handle_dry_run(&config, &sites);
        return Ok(());
    }

    let reports = handle_measure(&config, &sites).await?;

    if cli.json {
        write_json_lines(std::io::stdout().lock(), &reports)?;
    } else {
        print_table(&reports);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("click_distance=info,warn"),
            1 => EnvFilter::new("click_distance=debug,info"),
            2 => EnvFilter::new("click_distance=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Picks the sites named on the command line, or all of them
fn select_sites<'c>(config: &'c Config, names: &[String]) -> anyhow::Result<Vec<&'c SiteEntry>> {
    if names.is_empty() {
        return Ok(config.sites.iter().collect());
    }

    names
        .iter()
        .map(|name| {
            config
                .sites
                .iter()
                .find(|site| &site.name == name)
                .with_context(|| format!("no site named '{}' in configuration", name))
        })
        .collect()
}

/// Handles the --dry-run mode: shows what would be measured
fn handle_dry_run(config: &Config, sites: &[&SiteEntry]) {
    println!("=== Click-Distance Dry Run ===\n");

    println!("Navigation:");
    println!("  Level threshold: {}", config.navigation.level_threshold);
    println!(
        "  Max concurrent renders: {}",
        config.navigation.max_concurrent_renders
    );

    println!("\nRenderer:");
    println!("  Mode: {:?}", config.renderer.mode);
    println!("  Headless: {}", config.renderer.headless);
    println!("  Page load timeout: {}s", config.renderer.page_load_timeout);
    println!("  Settle delay: {}ms", config.renderer.settle_delay);
    println!("  Respect robots.txt: {}", config.renderer.respect_robots);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nSites ({}):", sites.len());
    for site in sites {
        println!(
            "  - {} ({}, {} targets, link count {})",
            site.name,
            site.root,
            site.targets.len(),
            site.effective_link_count()
        );
        for target in &site.targets {
            println!("    * {}", target);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Runs one navigation search per site, one site after another
async fn handle_measure(config: &Config, sites: &[&SiteEntry]) -> anyhow::Result<Vec<SiteReport>> {
    let renderer = build_renderer(&config.renderer, &config.user_agent)
        .context("failed to start page renderer")?;
    let search = NavigationSearch::new(&*renderer, config.navigation.clone());

    let mut reports = Vec::with_capacity(sites.len());
    for site in sites {
        tracing::info!("Measuring {}", site.name);

        let request = NavigationRequest::new(site.root.clone(), site.targets.clone())
            .with_link_count(site.effective_link_count());
        let outcome = search.run(&request).await;

        reports.push(SiteReport::from_outcome(site, &outcome));
    }

    let found = reports.iter().filter(|r| r.is_found()).count();
    tracing::info!("Measured {} sites, {} reached a target", reports.len(), found);

    Ok(reports)
}
