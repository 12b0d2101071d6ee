use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use serde::Serialize;

/// OutboundEmail
///
/// A plain-text notification handed to the mail provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    /// Lets the team answer the visitor straight from their inbox.
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail provider rejected the message with status {0}")]
    Rejected(u16),
    #[error("{0}")]
    Simulated(String),
}

// 1. Mailer Contract
/// Mailer
///
/// Delivery of contact-form notifications. The HTTP client talks to the
/// transactional mail provider; the mock stands in during tests.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

pub type MailerState = Arc<dyn Mailer>;

// 2. Provider-backed implementation
/// HttpMailer
///
/// Posts messages as JSON to a Resend-compatible `/emails` endpoint using a
/// bearer API key.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct ProviderPayload<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    /// `timeout` bounds the whole provider call, connect included.
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, MailError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let payload = ProviderPayload {
            from: &email.from,
            to: &email.to,
            reply_to: email.reply_to.as_deref(),
            subject: &email.subject,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailError::Rejected(response.status().as_u16()));
        }
        tracing::debug!(subject = %email.subject, "contact notification delivered");
        Ok(())
    }
}

// 3. Mock implementation
/// MockMailer
///
/// Records every message it is asked to send. Clones share the outbox, so a
/// test can keep one clone and inspect what the router sent through another.
#[derive(Clone, Default)]
pub struct MockMailer {
    /// When true, every send fails.
    pub should_fail: bool,
    outbox: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.outbox.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if self.should_fail {
            return Err(MailError::Simulated(
                "Mock mailer: failure requested".to_string(),
            ));
        }
        self.outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(email.clone());
        Ok(())
    }
}
