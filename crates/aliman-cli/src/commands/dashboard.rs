use aliman_core::{daily_question, DayStats};
use serde_json::json;

use super::{print_json, CmdResult, Env};

pub fn run() -> CmdResult {
    let env = Env::open()?;
    let owner = env.owner();
    let today = env.today();

    let plans = env.db.plans_on(owner, today)?;
    let stats = DayStats::from_sessions(&env.db.sessions_on(owner, today, &env.day)?);

    print_json(&json!({
        "username": env.config.profile.username,
        "question": daily_question(env.day.hour_of(env.now)),
        "plans": plans,
        "stats": stats,
    }))
}
