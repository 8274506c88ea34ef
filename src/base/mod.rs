//! Core components, types, and utilities for the support bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Canned reply texts for the support bot and the welcome message.
//! - Common request/response types and result handling.

pub mod config;
pub mod replies;
pub mod types;
