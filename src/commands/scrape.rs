//! Single-pass scrape command.

use crate::config::Config;
use crate::format::Formatter;
use crate::notify::{Mailer, NoMailer, SmtpMailer};
use crate::olx::{ListingSource, OlxClient};
use crate::pipeline::Pipeline;
use anyhow::{Context, Result};
use tracing::info;

/// Fetches the search page once and prints the sorted listings.
pub struct ScrapeCommand {
    pipeline: Pipeline,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { pipeline: Pipeline::new(config) }
    }

    /// Executes the pass and returns formatted output.
    pub async fn execute(&mut self) -> Result<String> {
        let config = self.pipeline.config();
        let client = OlxClient::new(config).context("Failed to create HTTP client")?;

        if config.send_notification {
            let mailer = SmtpMailer::new(config).context("Failed to configure mailer")?;
            self.execute_with(&client, &mailer).await
        } else {
            self.execute_with(&client, &NoMailer).await
        }
    }

    /// Executes the pass with provided collaborators (for testing).
    pub async fn execute_with(
        &mut self,
        source: &impl ListingSource,
        mailer: &impl Mailer,
    ) -> Result<String> {
        let report = self.pipeline.run_with(source, mailer).await.context("Scrape failed")?;

        if report.notified {
            info!("Top listings changed, notification sent");
        }

        let config = self.pipeline.config();
        let mut view = report.view;
        if let Some(limit) = config.limit {
            view.truncate(limit);
        }

        Ok(Formatter::new(config.format).format_listings(&view))
    }
}
