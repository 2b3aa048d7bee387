use aliman_core::chat::exchange;
use aliman_core::{ChatContext, Event};
use clap::Subcommand;
use serde_json::json;

use super::{print_json, CmdResult, Env};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a message and print the reply
    Send {
        message: String,
        /// focus, dashboard or review; anything else means dashboard
        #[arg(long)]
        context: Option<String>,
    },
    /// Show recent messages, oldest first
    History {
        /// Number of messages (defaults to chat.history_limit)
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub fn run(action: ChatAction) -> CmdResult {
    let env = Env::open()?;
    let owner = env.owner();

    match action {
        ChatAction::Send { message, context } => {
            let context = ChatContext::parse_or_default(context.as_deref());
            let ex = exchange(&message, context, &env.config.profile.username, env.now)?;
            env.db.record_exchange(owner, &ex)?;
            tracing::debug!(intent = ?ex.intent, %context, "chat reply stored");
            print_json(&Event::chat_replied(&ex))
        }
        ChatAction::History { limit } => {
            let limit = limit.unwrap_or(env.config.chat.history_limit);
            let messages = env.db.chat_history(owner, limit)?;
            print_json(&json!({ "messages": messages }))
        }
    }
}
