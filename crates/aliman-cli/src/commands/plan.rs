use aliman_core::Event;
use clap::Subcommand;

use super::{print_json, CmdResult, Env};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Add a plan for today
    Add {
        text: String,
    },
    /// Mark a plan as done
    Complete {
        id: i64,
    },
    /// List today's plans, newest first
    List,
}

pub fn run(action: PlanAction) -> CmdResult {
    let env = Env::open()?;
    let owner = env.owner();

    match action {
        PlanAction::Add { text } => {
            let plan = env.db.add_plan(owner, &text, env.today())?;
            print_json(&Event::plan_added(&plan, env.now))
        }
        PlanAction::Complete { id } => {
            let plan = env.db.complete_plan(owner, id)?;
            print_json(&Event::plan_completed(&plan, env.now))
        }
        PlanAction::List => {
            let plans = env.db.plans_on(owner, env.today())?;
            print_json(&plans)
        }
    }
}
