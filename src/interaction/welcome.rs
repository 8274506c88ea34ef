//! The `/welcome-message` endpoint: a DM from the moderator bot to a new user.
//!
//! Call this right after a user signs up. The moderator account is resolved
//! from the store on every call, then the welcome message is inserted with
//! the service-role credentials. Failures never block signup; they are
//! reported in the response body only.

use axum::{Json, extract::State};
use tracing::{error, info, instrument, warn};

use crate::{
    base::types::{Res, WelcomeMessageRecord, WelcomeRequest, WelcomeResponse},
    runtime::Runtime,
    service::store::StoreClient,
};

/// What happened to a welcome DM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WelcomeOutcome {
    /// The message row was inserted.
    Sent,
    /// No moderator account exists; nothing was inserted.
    NoModerator,
}

/// Look up the moderator bot and insert the welcome message for `new_user_id`.
///
/// Lookup then insert, sequentially, with no retry and nothing to roll back.
#[instrument(skip(store))]
pub async fn send_welcome_dm(store: &StoreClient, new_user_id: &str) -> Res<WelcomeOutcome> {
    let Some(moderator_id) = store.find_moderator_id().await? else {
        warn!("No moderator bot found (is_bot = true, bot_role = 'moderator').");
        return Ok(WelcomeOutcome::NoModerator);
    };

    let record = WelcomeMessageRecord::welcome(&moderator_id, new_user_id);
    store.insert_message(&record).await?;

    info!("Welcome DM inserted for user {}.", new_user_id);

    Ok(WelcomeOutcome::Sent)
}

/// Validate the request, dispatch the DM, and map the outcome onto the response body.
///
/// A missing moderator still answers `ok`: the signup flow treats it as done.
#[instrument(skip_all)]
pub async fn handle_welcome_request(store: &StoreClient, request: WelcomeRequest) -> WelcomeResponse {
    let Some(user_id) = request.user_id.filter(|id| !id.is_empty()) else {
        return WelcomeResponse::error("userId is required");
    };

    match send_welcome_dm(store, &user_id).await {
        Ok(_) => WelcomeResponse::Ok,
        Err(err) => {
            error!("Error while sending welcome message: {}", err);
            WelcomeResponse::error("failed to send welcome message")
        }
    }
}

/// `POST /welcome-message`.
#[instrument(skip_all)]
pub async fn welcome_message(State(runtime): State<Runtime>, Json(request): Json<WelcomeRequest>) -> Json<WelcomeResponse> {
    Json(handle_welcome_request(&runtime.store, request).await)
}

// Tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::{
        base::{replies, types::Void},
        service::store::GenericStoreClient,
    };

    mock! {
        pub Store {}

        #[async_trait]
        impl GenericStoreClient for Store {
            async fn find_moderator_id(&self) -> Res<Option<String>>;
            async fn insert_message(&self, record: &WelcomeMessageRecord) -> Void;
        }
    }

    fn store(mock: MockStore) -> StoreClient {
        StoreClient::new(Arc::new(mock))
    }

    fn request(user_id: Option<&str>) -> WelcomeRequest {
        WelcomeRequest {
            user_id: user_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_missing_user_id_makes_no_external_call() {
        let mut mock = MockStore::new();
        mock.expect_find_moderator_id().times(0);
        mock.expect_insert_message().times(0);
        let store = store(mock);

        assert_eq!(handle_welcome_request(&store, request(None)).await, WelcomeResponse::error("userId is required"));
        assert_eq!(handle_welcome_request(&store, request(Some(""))).await, WelcomeResponse::error("userId is required"));
    }

    #[tokio::test]
    async fn test_sends_welcome_from_moderator() {
        let mut mock = MockStore::new();
        mock.expect_find_moderator_id().times(1).returning(|| Ok(Some("moderator-1".to_string())));
        mock.expect_insert_message()
            .withf(|record| {
                record.sender_id == "moderator-1" && record.recipient_id == "user-42" && record.content == replies::WELCOME_MESSAGE && record.is_bot_generated
            })
            .times(1)
            .returning(|_| Ok(()));
        let store = store(mock);

        assert_eq!(send_welcome_dm(&store, "user-42").await.unwrap(), WelcomeOutcome::Sent);
    }

    #[tokio::test]
    async fn test_no_moderator_skips_insert_and_reports_ok() {
        let mut mock = MockStore::new();
        mock.expect_find_moderator_id().times(1).returning(|| Ok(None));
        mock.expect_insert_message().times(0);
        let store = store(mock);

        assert_eq!(handle_welcome_request(&store, request(Some("user-42"))).await, WelcomeResponse::Ok);
    }

    #[tokio::test]
    async fn test_no_moderator_outcome() {
        let mut mock = MockStore::new();
        mock.expect_find_moderator_id().returning(|| Ok(None));
        let store = store(mock);

        assert_eq!(send_welcome_dm(&store, "user-42").await.unwrap(), WelcomeOutcome::NoModerator);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_reported() {
        let mut mock = MockStore::new();
        mock.expect_find_moderator_id().returning(|| Err(anyhow::anyhow!("503 Service Unavailable")));
        mock.expect_insert_message().times(0);
        let store = store(mock);

        assert_eq!(
            handle_welcome_request(&store, request(Some("user-42"))).await,
            WelcomeResponse::error("failed to send welcome message")
        );
    }

    #[tokio::test]
    async fn test_insert_failure_is_reported() {
        let mut mock = MockStore::new();
        mock.expect_find_moderator_id().returning(|| Ok(Some("moderator-1".to_string())));
        mock.expect_insert_message().times(1).returning(|_| Err(anyhow::anyhow!("403 Forbidden")));
        let store = store(mock);

        assert_eq!(
            handle_welcome_request(&store, request(Some("user-42"))).await,
            WelcomeResponse::error("failed to send welcome message")
        );
    }
}
