//! One fetch → extract → tabulate → detect → notify pass.

use crate::config::Config;
use crate::error::PipelineError;
use crate::notify::{compose, ChangeDetector, Mailer, RankingState};
use crate::olx::{Listing, ListingExtractor, ListingSource};
use crate::table::ListingTable;
use tracing::{debug, info};

/// Result of a single pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    /// Listing rows found on the page
    pub found: usize,
    /// All listings, sorted by the configured key
    pub view: Vec<Listing>,
    /// Whether a notification was sent
    pub notified: bool,
}

/// Runs scrape passes and remembers what was last notified.
///
/// Passes must not overlap: `run_with` takes `&mut self`, and the ranking
/// state is only meaningful if each pass sees the previous one's result.
pub struct Pipeline {
    config: Config,
    extractor: ListingExtractor,
    detector: ChangeDetector,
    state: RankingState,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let detector = ChangeDetector::new(config.num_follow);
        Self { config, extractor: ListingExtractor::new(), detector, state: RankingState::new() }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ids retained from the last notified pass.
    pub fn state(&self) -> &RankingState {
        &self.state
    }

    /// Runs one pass against the given collaborators.
    pub async fn run_with(
        &mut self,
        source: &impl ListingSource,
        mailer: &impl Mailer,
    ) -> Result<PassReport, PipelineError> {
        let body = source.fetch(&self.config.url).await?;
        let extraction = self.extractor.extract_html(&body)?;

        if extraction.is_empty() {
            info!("No listings found");
            return Ok(PassReport { found: 0, view: Vec::new(), notified: false });
        }

        let found = extraction.found;
        let table = ListingTable::new(extraction.listings);
        let view = table.view(self.config.sort_by, None);
        info!("Found {} listings", found);

        let notified = if self.config.send_notification {
            self.notify_if_changed(&view, mailer).await?
        } else {
            false
        };

        Ok(PassReport { found, view, notified })
    }

    async fn notify_if_changed(
        &mut self,
        view: &[Listing],
        mailer: &impl Mailer,
    ) -> Result<bool, PipelineError> {
        let ids: Vec<u64> = view.iter().map(|l| l.id).collect();

        if !self.detector.has_changed(&ids, &mut self.state) {
            debug!("Nothing new, skipping notification");
            return Ok(false);
        }

        let notification = compose(view, self.config.num_send, &self.config.header);
        mailer.send(&notification).await?;
        info!("Notification sent");

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, FetchError, MailError};
    use crate::notify::Notification;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves queued pages, repeating the last one.
    struct MockSource {
        pages: Mutex<Vec<String>>,
    }

    impl MockSource {
        fn new(pages: Vec<String>) -> Self {
            Self { pages: Mutex::new(pages) }
        }
    }

    #[async_trait]
    impl ListingSource for MockSource {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            let mut pages = self.pages.lock().unwrap();
            let page = if pages.len() > 1 { pages.remove(0) } else { pages[0].clone() };
            Ok(page.into_bytes())
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<Notification>>,
    }

    impl RecordingMailer {
        fn sent(&self) -> Vec<Notification> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, notification: &Notification) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn make_page(rows: &[(u64, &str)]) -> String {
        let mut html = String::from("<html><body><table>");
        for (id, price) in rows {
            html.push_str(&format!(
                r#"<tr class="wrap" rel=""><td><table data-id="{id}"><tbody><tr><td>
                    <strong>Ogłoszenie {id}</strong><strong>{price}</strong>
                    <small class="breadcrumb x-normal"><span>Sport</span></small>
                    <small class="breadcrumb x-normal"><span>Kraków</span></small>
                </td></tr></tbody></table></td></tr>"#
            ));
        }
        html.push_str("</table></body></html>");
        html
    }

    fn make_config(send_notification: bool, num_follow: usize) -> Config {
        Config {
            url: "https://www.olx.pl/oferty/q-test/".to_string(),
            send_notification,
            num_follow,
            num_send: 3,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_pass_sorts_by_price() {
        let source =
            MockSource::new(vec![make_page(&[(5, "10 zł"), (2, "5 zł"), (9, "20 zł"), (1, "1 zł")])]);
        let mailer = RecordingMailer::default();
        let mut pipeline = Pipeline::new(make_config(false, 2));

        let report = pipeline.run_with(&source, &mailer).await.unwrap();
        assert_eq!(report.found, 4);
        assert_eq!(report.view.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2, 5, 9]);
        assert!(!report.notified);
        assert!(mailer.sent().is_empty());
        assert!(pipeline.state().is_empty());
    }

    #[tokio::test]
    async fn test_notifies_only_on_change() {
        let page = make_page(&[(5, "10 zł"), (2, "5 zł"), (9, "20 zł"), (1, "1 zł")]);
        let source = MockSource::new(vec![page]);
        let mailer = RecordingMailer::default();
        let mut pipeline = Pipeline::new(make_config(true, 2));

        let first = pipeline.run_with(&source, &mailer).await.unwrap();
        assert!(first.notified);
        assert_eq!(pipeline.state().ids(), &[1, 2, 5, 9]);

        let second = pipeline.run_with(&source, &mailer).await.unwrap();
        assert!(!second.notified);
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_notification_has_cheapest_rows() {
        let page = make_page(&[(5, "10 zł"), (2, "5 zł"), (9, "20 zł"), (1, "1 zł")]);
        let source = MockSource::new(vec![page]);
        let mailer = RecordingMailer::default();
        let mut pipeline = Pipeline::new(make_config(true, 2));

        pipeline.run_with(&source, &mailer).await.unwrap();

        let sent = mailer.sent();
        assert!(sent[0].plain.starts_with("Znalazłem nowe oferty!"));
        assert!(sent[0].plain.contains("Ogłoszenie 1"));
        assert!(sent[0].plain.contains("Ogłoszenie 5"));
        // num_send = 3
        assert!(!sent[0].plain.contains("Ogłoszenie 9"));
    }

    #[tokio::test]
    async fn test_new_cheapest_listing_triggers_notification() {
        let source = MockSource::new(vec![
            make_page(&[(5, "10 zł"), (2, "5 zł")]),
            make_page(&[(5, "10 zł"), (2, "5 zł"), (7, "2 zł")]),
        ]);
        let mailer = RecordingMailer::default();
        let mut pipeline = Pipeline::new(make_config(true, 2));

        assert!(pipeline.run_with(&source, &mailer).await.unwrap().notified);
        assert!(pipeline.run_with(&source, &mailer).await.unwrap().notified);
        assert_eq!(pipeline.state().ids(), &[7, 2, 5]);
        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_page_skips_detection() {
        let source = MockSource::new(vec![
            make_page(&[(1, "1 zł")]),
            "<html><body></body></html>".to_string(),
        ]);
        let mailer = RecordingMailer::default();
        let mut pipeline = Pipeline::new(make_config(true, 5));

        pipeline.run_with(&source, &mailer).await.unwrap();
        let report = pipeline.run_with(&source, &mailer).await.unwrap();

        assert_eq!(report.found, 0);
        assert!(report.view.is_empty());
        assert!(!report.notified);
        assert_eq!(pipeline.state().ids(), &[1]);
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_structural_error_aborts_pass() {
        let source = MockSource::new(vec![make_page(&[(1, "1 zł")]).replace("data-id=\"1\"", "data-id=\"x\"")]);
        let mailer = RecordingMailer::default();
        let mut pipeline = Pipeline::new(make_config(true, 5));

        let err = pipeline.run_with(&source, &mailer).await.unwrap_err();
        assert!(matches!(err, PipelineError::Extract(ExtractError::InvalidId { .. })));
        assert!(pipeline.state().is_empty());
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        struct FailingSource;

        #[async_trait]
        impl ListingSource for FailingSource {
            async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
                Err(FetchError::Status { url: url.to_string(), status: 500 })
            }
        }

        let mut pipeline = Pipeline::new(make_config(true, 5));
        let err = pipeline.run_with(&FailingSource, &RecordingMailer::default()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Fetch(FetchError::Status { status: 500, .. })));
    }
}
