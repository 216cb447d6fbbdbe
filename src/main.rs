//! olx-watch - OLX search watcher with mail notifications

use anyhow::Result;
use clap::{Parser, Subcommand};
use olx_watch::commands::{ScrapeCommand, WatchCommand};
use olx_watch::config::{Config, OutputFormat};
use olx_watch::table::SortKey;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "olx-watch",
    version,
    about = "Watches an OLX search and mails you when the cheapest listings change"
)]
struct Cli {
    /// Full OLX search URL (filters included)
    #[arg(short, long, global = true, env = "OLX_URL")]
    url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Column to sort listings by
    #[arg(long, global = true)]
    sort_by: Option<SortKey>,

    /// Send a mail when the top listings change
    #[arg(long, global = true)]
    notify: bool,

    /// Number of top listings compared between passes
    #[arg(long, global = true)]
    num_follow: Option<usize>,

    /// Number of listings included in a notification
    #[arg(long, global = true)]
    num_send: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the search page once and print the listings
    #[command(alias = "s")]
    Scrape {
        /// Maximum number of listings printed
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Scrape periodically until interrupted
    #[command(alias = "w")]
    Watch {
        /// Seconds between passes
        #[arg(short, long)]
        interval: Option<u64>,

        /// Maximum random extra seconds added to each wait
        #[arg(long)]
        jitter: Option<u64>,

        /// Stop after this many passes
        #[arg(long)]
        passes: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(url) = cli.url {
        config.url = url;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(sort_by) = cli.sort_by {
        config.sort_by = sort_by;
    }
    if cli.notify {
        config.send_notification = true;
    }
    if let Some(num_follow) = cli.num_follow {
        config.num_follow = num_follow;
    }
    if let Some(num_send) = cli.num_send {
        config.num_send = num_send;
    }

    match cli.command {
        Commands::Scrape { limit } => {
            if limit.is_some() {
                config.limit = limit;
            }
            config.validate()?;

            let mut cmd = ScrapeCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Watch { interval, jitter, passes } => {
            if let Some(interval) = interval {
                config.interval_secs = interval;
            }
            if let Some(jitter) = jitter {
                config.interval_jitter_secs = jitter;
            }
            config.validate()?;

            let mut cmd = WatchCommand::new(config).with_max_passes(passes);
            let succeeded = cmd.execute().await?;
            eprintln!("{} passes completed", succeeded);
        }
    }

    Ok(())
}
