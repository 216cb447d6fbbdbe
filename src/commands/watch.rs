//! Periodic scrape loop.

use crate::config::Config;
use crate::notify::{Mailer, NoMailer, SmtpMailer};
use crate::olx::{ListingSource, OlxClient};
use crate::pipeline::Pipeline;
use anyhow::{Context, Result};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Runs scrape passes on an interval until interrupted.
///
/// Passes run one after another on a single pipeline; a failed pass is
/// logged and the loop waits for the next tick.
pub struct WatchCommand {
    pipeline: Pipeline,
    max_passes: Option<usize>,
}

impl WatchCommand {
    /// Creates a new watch command.
    pub fn new(config: Config) -> Self {
        Self { pipeline: Pipeline::new(config), max_passes: None }
    }

    /// Stops after `passes` passes instead of running until Ctrl-C.
    pub fn with_max_passes(mut self, passes: Option<usize>) -> Self {
        self.max_passes = passes;
        self
    }

    /// Runs the loop with the real HTTP client and mailer.
    pub async fn execute(&mut self) -> Result<usize> {
        let config = self.pipeline.config();
        let client = OlxClient::new(config).context("Failed to create HTTP client")?;

        if config.send_notification {
            let mailer = SmtpMailer::new(config).context("Failed to configure mailer")?;
            Ok(self.execute_with(&client, &mailer).await)
        } else {
            Ok(self.execute_with(&client, &NoMailer).await)
        }
    }

    /// Runs the loop with provided collaborators and returns the number of
    /// passes that completed without error.
    pub async fn execute_with(&mut self, source: &impl ListingSource, mailer: &impl Mailer) -> usize {
        let mut pass = 0;
        let mut succeeded = 0;

        loop {
            pass += 1;
            debug!("Starting pass {}", pass);

            match self.pipeline.run_with(source, mailer).await {
                Ok(report) => {
                    succeeded += 1;
                    info!(
                        "Pass {}: {} listings{}",
                        pass,
                        report.found,
                        if report.notified { ", notification sent" } else { "" }
                    );
                }
                Err(e) => warn!("Pass {} failed: {}", pass, e),
            }

            if self.max_passes.is_some_and(|max| pass >= max) {
                break;
            }

            let wait = self.next_wait();
            debug!("Next pass in {}s", wait.as_secs());

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping");
                    break;
                }
            }
        }

        succeeded
    }

    /// Interval plus random jitter.
    fn next_wait(&self) -> Duration {
        let config = self.pipeline.config();

        let jitter = if config.interval_jitter_secs > 0 {
            rand::rng().random_range(0..=config.interval_jitter_secs)
        } else {
            0
        };

        Duration::from_secs(config.interval_secs + jitter)
    }
}
