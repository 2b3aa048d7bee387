//! Template-based reply generation.
//!
//! Two call sites share this module:
//!
//! - exit rendering turns a [`ClassificationResult`] into one of three replies
//! - chat rendering picks a reply from the message, a [`ChatContext`] and the
//!   username
//!
//! Nothing here fails. Unmatched input always falls through to a default
//! template, and persisting the exchange is the caller's job.

pub mod templates;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classifier::{classify_reason, contains_any, Category, ClassificationResult};

/// Phrases meaning "I want to leave" while a session is running.
pub const LEAVE_KEYWORDS: &[&str] = &["chiq", "to'xtat", "bor", "kerak", "ko'r"];
pub const GREETING_KEYWORDS: &[&str] = &["salom", "assalom", "hi"];
pub const BOREDOM_KEYWORDS: &[&str] = &["zerik", "bezdim", "qiyin", "charchad"];
pub const PLANNING_KEYWORDS: &[&str] = &["reja", "plan", "bugun", "nima qil"];
pub const HELP_KEYWORDS: &[&str] = &["yordam", "help", "nima"];

/// Screen the chat message was sent from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatContext {
    Focus,
    #[default]
    Dashboard,
    Review,
}

impl ChatContext {
    /// Names match exactly; anything else is the dashboard.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for ChatContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(ChatContext::Focus),
            "dashboard" => Ok(ChatContext::Dashboard),
            "review" => Ok(ChatContext::Review),
            other => Err(format!("unknown chat context: {other}")),
        }
    }
}

impl fmt::Display for ChatContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChatContext::Focus => "focus",
            ChatContext::Dashboard => "dashboard",
            ChatContext::Review => "review",
        };
        f.write_str(s)
    }
}

/// Which chat template was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatIntent {
    StayInFocus,
    KeepGoing,
    Greeting,
    Boredom,
    Planning,
    Help,
    Encouragement,
}

/// Work out the chat intent. Order matters: the first matching group wins.
pub fn chat_intent(message: &str, context: ChatContext) -> ChatIntent {
    let lowered = message.to_lowercase();

    if context == ChatContext::Focus {
        return if contains_any(&lowered, LEAVE_KEYWORDS) {
            ChatIntent::StayInFocus
        } else {
            ChatIntent::KeepGoing
        };
    }

    let groups: [(&[&str], ChatIntent); 4] = [
        (GREETING_KEYWORDS, ChatIntent::Greeting),
        (BOREDOM_KEYWORDS, ChatIntent::Boredom),
        (PLANNING_KEYWORDS, ChatIntent::Planning),
        (HELP_KEYWORDS, ChatIntent::Help),
    ];
    groups
        .iter()
        .find(|(keywords, _)| contains_any(&lowered, keywords))
        .map(|(_, intent)| *intent)
        .unwrap_or(ChatIntent::Encouragement)
}

/// Render the reply text for a chat intent.
pub fn render_chat(intent: ChatIntent, username: &str) -> String {
    match intent {
        ChatIntent::StayInFocus => templates::focus_stay(),
        ChatIntent::KeepGoing => templates::focus_keep_going(username),
        ChatIntent::Greeting => templates::greeting(username),
        ChatIntent::Boredom => templates::boredom(username),
        ChatIntent::Planning => templates::planning(username),
        ChatIntent::Help => templates::help(username),
        ChatIntent::Encouragement => templates::encouragement(username),
    }
}

/// Reply to a chat message.
pub fn respond_to_chat(message: &str, context: ChatContext, username: &str) -> String {
    render_chat(chat_intent(message, context), username)
}

/// Reply to a classified exit reason.
pub fn respond_to_exit(result: &ClassificationResult) -> String {
    let reason = result.matched_reason.as_str();
    match result.category {
        Category::Distraction => templates::exit_distraction(reason),
        Category::Valid => templates::exit_valid(reason),
        Category::Unknown => templates::exit_unknown(reason),
    }
}

/// Classify a reason and render its exit reply without ending anything.
pub fn analyze_exit(reason: &str) -> (ClassificationResult, String) {
    let result = classify_reason(reason);
    let response = respond_to_exit(&result);
    (result, response)
}

/// Dashboard opener for the given local hour (0-23).
pub fn daily_question(hour: u32) -> &'static str {
    if hour < 12 {
        templates::MORNING_QUESTION
    } else if hour < 17 {
        templates::AFTERNOON_QUESTION
    } else {
        templates::EVENING_QUESTION
    }
}
