//! Chat exchanges.
//!
//! Validates the incoming message, asks the dialogue module for a reply and
//! hands both back as records ready to persist, user message first.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dialogue::{chat_intent, render_chat, ChatContext, ChatIntent};
use crate::error::DomainError;

pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            other => Err(format!("unknown chat role: {other}")),
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A user message and the reply it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub context: ChatContext,
    pub intent: ChatIntent,
    pub message: ChatMessage,
    pub reply: ChatMessage,
}

/// Build the exchange for one incoming message.
///
/// # Errors
/// Returns `InvalidArgument` if the message is blank.
pub fn exchange(
    message: &str,
    context: ChatContext,
    username: &str,
    now: DateTime<Utc>,
) -> Result<ChatExchange, DomainError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(DomainError::invalid("message", "must not be empty"));
    }

    let intent = chat_intent(message, context);
    Ok(ChatExchange {
        context,
        intent,
        message: ChatMessage {
            role: ChatRole::User,
            content: message.to_string(),
            created_at: now,
        },
        reply: ChatMessage {
            role: ChatRole::Assistant,
            content: render_chat(intent, username),
            created_at: now,
        },
    })
}
