use std::fmt;

use serde::{Deserialize, Serialize};

use crate::base::replies;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// The marketplace section a support question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportContext {
    Jobs,
    Classifieds,
}

impl fmt::Display for SupportContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportContext::Jobs => write!(f, "jobs"),
            SupportContext::Classifieds => write!(f, "classifieds"),
        }
    }
}

/// Body of `POST /support-bot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub message: String,
    pub context: SupportContext,
}

/// Reply returned by `POST /support-bot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportReply {
    pub role: String,
    pub name: String,
    pub reply: String,
    #[serde(default)]
    pub follow_up_questions: Option<Vec<String>>,
    #[serde(default)]
    pub issue_reported: bool,
}

impl SupportReply {
    /// A plain help-text reply from the bot.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            role: replies::BOT_ROLE.to_string(),
            name: replies::BOT_NAME.to_string(),
            reply: reply.into(),
            follow_up_questions: None,
            issue_reported: false,
        }
    }

    /// A reply that acknowledges a reported issue.
    pub fn issue(reply: impl Into<String>) -> Self {
        Self { issue_reported: true, ..Self::new(reply) }
    }

    pub fn with_follow_ups(mut self, questions: &[&str]) -> Self {
        self.follow_up_questions = Some(questions.iter().map(|q| q.to_string()).collect());
        self
    }
}

/// Body of `POST /welcome-message`.
///
/// `userId` is optional at the parsing level so that a missing id is answered
/// with the documented error body instead of a framework rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body returned by `POST /welcome-message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WelcomeResponse {
    Ok,
    Error { message: String },
}

impl WelcomeResponse {
    pub fn error(message: impl Into<String>) -> Self {
        WelcomeResponse::Error { message: message.into() }
    }
}

/// A row of the external `users` resource, as selected by the moderator lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeratorAccount {
    pub id: String,
}

/// A row inserted into the external `messages` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessageRecord {
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub is_bot_generated: bool,
}

impl WelcomeMessageRecord {
    /// The fixed welcome DM from `moderator_id` to `recipient_id`.
    pub fn welcome(moderator_id: &str, recipient_id: &str) -> Self {
        Self {
            sender_id: moderator_id.to_string(),
            recipient_id: recipient_id.to_string(),
            content: replies::WELCOME_MESSAGE.to_string(),
            is_bot_generated: true,
        }
    }
}

// Tests.
