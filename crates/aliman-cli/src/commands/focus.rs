use aliman_core::session::resolve_planned_minutes;
use aliman_core::{analyze_exit, EndRequest, Event, ExitType};
use clap::Subcommand;
use serde_json::json;

use super::{print_json, CmdResult, Env};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start a focus session
    Start {
        /// Planned length in minutes (defaults to session.default_planned_minutes)
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,
    },
    /// End a focus session
    End {
        /// Session id
        id: i64,
        /// Why the session ended
        #[arg(long)]
        reason: Option<String>,
        /// completed, distracted or other
        #[arg(long, default_value = "completed")]
        exit_type: ExitType,
    },
    /// Print a session as JSON
    Status {
        /// Session id
        id: i64,
    },
    /// Classify an exit reason without ending anything
    Analyze {
        reason: String,
    },
}

pub fn run(action: FocusAction) -> CmdResult {
    match action {
        FocusAction::Start { minutes } => {
            let env = Env::open()?;
            let planned =
                resolve_planned_minutes(minutes, env.config.session.default_planned_minutes)?;
            let session = env.db.start_session(env.owner(), planned, env.now)?;
            print_json(&Event::session_started(&session))
        }
        FocusAction::End {
            id,
            reason,
            exit_type,
        } => {
            let env = Env::open()?;
            let request = EndRequest {
                exit_reason: reason,
                exit_type,
            };
            let outcome = env.db.end_session(id, env.owner(), request, env.now)?;
            print_json(&Event::session_ended(&outcome, env.now))
        }
        FocusAction::Status { id } => {
            let env = Env::open()?;
            let session = env.db.session(id, env.owner())?;
            print_json(&json!({
                "session": session,
                "state": session.state(),
                "elapsed_minutes": session.elapsed_at(env.now),
            }))
        }
        FocusAction::Analyze { reason } => {
            let (result, response) = analyze_exit(&reason);
            print_json(&json!({
                "type": result.category,
                "response": response,
            }))
        }
    }
}
