//! Change detection and mail notifications.

pub mod compose;
pub mod mailer;
pub mod tracker;

pub use compose::{compose, Notification};
pub use mailer::{Mailer, NoMailer, SmtpMailer};
pub use tracker::{ChangeDetector, RankingState};
