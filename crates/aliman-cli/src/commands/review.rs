use aliman_core::summarize;
use chrono::NaiveDate;
use clap::Args;

use super::{print_json, CmdResult, Env};

#[derive(Args)]
pub struct ReviewArgs {
    /// Local date to review (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Print the summary as JSON instead of the report text
    #[arg(long)]
    json: bool,
}

pub fn run(args: ReviewArgs) -> CmdResult {
    let env = Env::open()?;
    let owner = env.owner();
    let date = args.date.unwrap_or_else(|| env.today());

    let sessions = env.db.sessions_on(owner, date, &env.day)?;
    let plans = env.db.plans_on(owner, date)?;
    let summary = summarize(owner, date, &sessions, &plans);

    if args.json {
        print_json(&summary)
    } else {
        println!("{}", summary.render());
        Ok(())
    }
}
