//! Runtime services and shared state for the support bot.

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::post,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    interaction::{support, welcome},
    service::{email::EmailClient, notifier::IssueNotifier, store::StoreClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration, the store client, and the issue notifier.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The user and message store.
    pub store: StoreClient,
    /// The background issue notification queue.
    pub notifier: IssueNotifier,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the email client and the notification worker.
        let email = EmailClient::sendgrid(&config)?;
        let notifier = IssueNotifier::start(email, config.support_from_email.clone(), config.support_to_email.clone());

        // Initialize the store client.
        let store = StoreClient::supabase(&config)?;

        Ok(Self { config, store, notifier })
    }

    /// Build the HTTP router, including the CORS policy.
    pub fn router(&self) -> Res<Router> {
        let router = Router::new()
            .route("/support-bot", post(support::support_bot))
            .route("/welcome-message", post(welcome::welcome_message))
            .layer(cors_layer(&self.config)?)
            .with_state(self.clone());

        Ok(router)
    }

    /// Bind the configured host and port; the host may be a name, IPv4 or IPv6 address.
    pub async fn bind(&self) -> Res<TcpListener> {
        let host = self.config.server_host.as_str();
        let port = self.config.server_port;

        TcpListener::bind((host, port))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}:{}: {}", host, port, e))
    }

    /// Serve the HTTP API until Ctrl-C.
    pub async fn start(&self) -> Void {
        let listener = self.bind().await?;
        info!("Support bot listening on {} ...", listener.local_addr()?);

        axum::serve(listener, self.router()?).with_graceful_shutdown(shutdown_signal()).await?;

        info!("Support bot stopped.");

        Ok(())
    }
}

/// Only the configured origins, POST and OPTIONS, any request header, with credentials.
///
/// Request headers are mirrored since a wildcard cannot be combined with credentials.
pub fn cors_layer(config: &Config) -> Res<CorsLayer> {
    let origins = config
        .allowed_origins()
        .iter()
        .map(|origin| HeaderValue::from_str(origin).map_err(|e| anyhow::anyhow!("Invalid CORS origin `{}`: {}", origin, e)))
        .collect::<Res<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
