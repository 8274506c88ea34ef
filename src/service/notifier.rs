//! Background queue that emails support about user-reported issues.
//!
//! Reports are handed to a worker task and sent after the HTTP response has
//! been produced, so request latency never depends on the email provider.
//! Delivery is best-effort: nothing is persisted or retried, and failures
//! are only logged.

use tokio::sync::mpsc;
use tracing::{Instrument, error, info, instrument};

use crate::{
    base::{
        replies,
        types::{SupportContext, SupportRequest, Void},
    },
    service::email::{EmailClient, OutboundEmail},
};

/// A technical issue reported through the support bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    pub context: SupportContext,
    pub user_id: Option<String>,
    pub message: String,
}

impl From<&SupportRequest> for IssueReport {
    fn from(request: &SupportRequest) -> Self {
        Self {
            context: request.context,
            user_id: request.user_id.clone(),
            message: request.message.clone(),
        }
    }
}

impl IssueReport {
    /// Plain-text body of the notification email.
    pub fn body(&self) -> String {
        let user_id = self.user_id.as_deref().filter(|id| !id.is_empty()).unwrap_or(replies::UNKNOWN_USER);

        [
            "Support issue reported from Road Workers Connect:".to_string(),
            String::new(),
            format!("Context: {}", self.context),
            format!("User ID: {user_id}"),
            String::new(),
            "User message:".to_string(),
            self.message.clone(),
        ]
        .join("\n")
    }

    /// The notification email for this report.
    pub fn to_email(&self, from: &str, to: &str) -> OutboundEmail {
        OutboundEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: replies::ISSUE_EMAIL_SUBJECT.to_string(),
            text: self.body(),
        }
    }
}

/// Handle to the issue notification queue.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct IssueNotifier {
    tx: mpsc::UnboundedSender<IssueReport>,
}

impl IssueNotifier {
    /// Wraps an existing queue; whoever holds the receiver decides what happens to reports.
    pub fn new(tx: mpsc::UnboundedSender<IssueReport>) -> Self {
        Self { tx }
    }

    /// Starts the worker that emails every queued report from `from` to `to`.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(name = "IssueNotifier::start", skip_all)]
    pub fn start(email: EmailClient, from: String, to: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<IssueReport>();

        tokio::spawn(
            async move {
                while let Some(report) = rx.recv().await {
                    let email = email.clone();
                    let message = report.to_email(&from, &to);

                    tokio::spawn(
                        async move {
                            // Process the report.
                            let result = email.send_plain_text(&message).await;

                            // Log any errors.
                            match result {
                                Ok(()) => info!("Issue notification sent for context `{}`.", report.context),
                                Err(err) => error!("Error while sending issue notification: {}", err),
                            }
                        }
                        .in_current_span(),
                    );
                }

                info!("Issue notifier queue closed.");
            }
            .in_current_span(),
        );

        Self { tx }
    }

    /// Queues a report; returns as soon as it is enqueued.
    pub fn schedule(&self, report: IssueReport) -> Void {
        self.tx.send(report).map_err(|_| anyhow::anyhow!("Issue notifier queue is closed."))?;

        Ok(())
    }
}

// Tests.
