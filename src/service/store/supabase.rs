//! Supabase REST implementation of the store service.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{ModeratorAccount, Res, Void, WelcomeMessageRecord},
};

use super::{GenericStoreClient, StoreClient};

// Extra methods on `StoreClient` applied by the supabase implementation.

impl StoreClient {
    pub fn supabase(config: &Config) -> Res<Self> {
        let client = SupabaseStoreClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// Supabase (PostgREST) client authenticated with the service-role key.
#[derive(Clone)]
pub struct SupabaseStoreClient {
    client: reqwest::Client,
    rest_url: String,
    service_role_key: String,
}

impl SupabaseStoreClient {
    /// Create a new Supabase client.
    #[instrument(name = "SupabaseStoreClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder().timeout(config.outbound_timeout()).build()?;

        Ok(Self {
            client,
            rest_url: config.supabase_rest_url(),
            service_role_key: config.supabase_service_role_key.clone(),
        })
    }

    /// Attach the service-role credentials to a request.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.service_role_key).bearer_auth(&self.service_role_key)
    }
}

#[async_trait]
impl GenericStoreClient for SupabaseStoreClient {
    #[instrument(name = "SupabaseStoreClient::find_moderator_id", skip_all)]
    async fn find_moderator_id(&self) -> Res<Option<String>> {
        let request = self
            .client
            .get(format!("{}/users", self.rest_url))
            .query(&[("is_bot", "eq.true"), ("bot_role", "eq.moderator"), ("select", "id"), ("limit", "1")]);

        let rows: Vec<ModeratorAccount> = self
            .authorized(request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("Failed to look up moderator: {}", e))?
            .json()
            .await?;

        debug!("Moderator lookup returned {} row(s).", rows.len());

        Ok(rows.into_iter().next().map(|row| row.id))
    }

    #[instrument(name = "SupabaseStoreClient::insert_message", skip_all)]
    async fn insert_message(&self, record: &WelcomeMessageRecord) -> Void {
        let request = self
            .client
            .post(format!("{}/messages", self.rest_url))
            .header("Prefer", "return=minimal")
            .json(record);

        self.authorized(request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("Failed to insert message: {}", e))?;

        Ok(())
    }
}

// Tests.
