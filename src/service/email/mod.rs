pub mod sendgrid;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::base::types::Void;

// Types.

/// A single plain-text email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

// Traits.

/// Generic email delivery trait that clients must implement.
///
/// Implementing this trait allows different email providers to be used
/// for support notifications.
#[async_trait]
pub trait GenericEmailClient: Send + Sync + 'static {
    /// Send a single plain-text email.
    ///
    /// Any non-success answer from the provider is returned as an error.
    async fn send_plain_text(&self, email: &OutboundEmail) -> Void;
}

// Structs.

/// Email client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct EmailClient {
    inner: Arc<dyn GenericEmailClient>,
}

impl Deref for EmailClient {
    type Target = dyn GenericEmailClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl EmailClient {
    pub fn new(inner: Arc<dyn GenericEmailClient>) -> Self {
        Self { inner }
    }
}
