//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the support bot:
//! - Email delivery (e.g., SendGrid)
//! - The user and message store (e.g., Supabase REST)
//! - The background issue notification queue
//!
//! Each external service module defines both a generic trait and a concrete implementation,
//! allowing for extensibility and easy testing.

pub mod email;
pub mod notifier;
pub mod store;
