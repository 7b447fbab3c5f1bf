use clap::Subcommand;
use focusclock_core::{Event, SilentNotifier};

use crate::context::Context;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Rewind the current phase to its full duration
    Reset,
    /// Abandon the current phase and start over from a fresh focus phase
    Clear,
}

fn print_event(event: &Event) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(event)?;
    println!("{json}");
    Ok(())
}

pub fn run(ctx: &Context, action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ctx.open_session(Box::new(SilentNotifier));

    match action {
        TimerAction::Status => {
            print_event(&session.timer().state_snapshot())?;
        }
        TimerAction::Reset => {
            let event = session.reset();
            session.persist_timer_state();
            print_event(&event)?;
        }
        TimerAction::Clear => {
            session.clear_timer_state();
            print_event(&session.timer().state_snapshot())?;
        }
    }
    Ok(())
}
