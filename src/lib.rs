//! Library root for `support-bot`.
//!
//! Support-bot is the backend for the Road Workers Connect marketplace assistant:
//! - Answers how-to questions about posting jobs and classifieds
//! - Detects technical complaints and emails the support inbox in the background
//! - Sends a welcome DM from the moderator bot to newly registered users
//!
//! Users and messages live in Supabase, accessed over REST; notifications go
//! through SendGrid. Both sit behind traits so handlers can be tested without them.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up the external clients and serves the HTTP API until Ctrl-C.
pub async fn start(config: Config) -> Void {
    info!("Starting support-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
