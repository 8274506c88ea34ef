//! HTTP request handling for the support bot.
//!
//! This module provides the two endpoints of the service:
//! - `support`: keyword-driven help replies and issue reporting (`POST /support-bot`)
//! - `welcome`: the moderator welcome DM for new users (`POST /welcome-message`)

pub mod support;
pub mod welcome;
