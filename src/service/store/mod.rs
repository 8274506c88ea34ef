pub mod supabase;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Res, Void, WelcomeMessageRecord};

// Traits.

/// Generic store trait that clients must implement.
///
/// The store owns users and messages; this service only looks up the
/// moderator account and inserts welcome messages on its behalf.
#[async_trait]
pub trait GenericStoreClient: Send + Sync + 'static {
    /// Find the id of the moderator bot account (`is_bot = true`, `bot_role = 'moderator'`).
    ///
    /// Returns `None` when no such account exists.
    async fn find_moderator_id(&self) -> Res<Option<String>>;

    /// Insert a message row.
    async fn insert_message(&self, record: &WelcomeMessageRecord) -> Void;
}

// Structs.

/// Store client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<dyn GenericStoreClient>,
}

impl Deref for StoreClient {
    type Target = dyn GenericStoreClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl StoreClient {
    pub fn new(inner: Arc<dyn GenericStoreClient>) -> Self {
        Self { inner }
    }
}
