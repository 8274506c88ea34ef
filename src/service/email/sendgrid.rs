//! SendGrid implementation of the email service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{Res, Void},
};

use super::{EmailClient, GenericEmailClient, OutboundEmail};

// Extra methods on `EmailClient` applied by the sendgrid implementation.

impl EmailClient {
    pub fn sendgrid(config: &Config) -> Res<Self> {
        let client = SendGridEmailClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// SendGrid v3 mail-send client.
#[derive(Clone)]
pub struct SendGridEmailClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl SendGridEmailClient {
    /// Create a new SendGrid client.
    #[instrument(name = "SendGridEmailClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().timeout(config.outbound_timeout()).build()?;

        Ok(Self {
            client,
            api_url: config.sendgrid_api_url.trim_end_matches('/').to_string(),
            api_key: config.sendgrid_api_key.clone(),
        })
    }
}

#[async_trait]
impl GenericEmailClient for SendGridEmailClient {
    #[instrument(name = "SendGridEmailClient::send_plain_text", skip_all)]
    async fn send_plain_text(&self, email: &OutboundEmail) -> Void {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": email.to }] }],
            "from": { "email": email.from },
            "subject": email.subject,
            "content": [{ "type": "text/plain", "value": email.text }],
        });

        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("Failed to send email: {}", e))?;

        info!("Email sent to {} (status {}).", email.to, response.status());

        Ok(())
    }
}

// Tests.
