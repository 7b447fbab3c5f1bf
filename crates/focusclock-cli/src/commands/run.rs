//! Foreground timer: a one-second countdown, a live clock line, and
//! line-based commands on stdin.

use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::Args;
use focusclock_core::notify::completion_message;
use focusclock_core::{Event, KeyValueStore, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::context::Context;

#[derive(Args)]
pub struct RunArgs {
    /// Start counting down immediately
    #[arg(long)]
    pub start: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Start,
    Pause,
    Toggle,
    Reset,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => Input::Toggle,
            "s" | "start" => Input::Start,
            "p" | "pause" => Input::Pause,
            "r" | "reset" => Input::Reset,
            "status" => Input::Status,
            "h" | "help" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            other => Input::Unknown(other.to_string()),
        }
    }
}

const HELP: &str = "commands: start (s), pause (p), <enter> toggles, reset (r), status, quit (q)";

pub fn run(ctx: &Context, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ctx.open_session(ctx.config().notifier());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(&mut session, args.start));
    // The stdin reader blocks a worker thread until the next line arrives.
    runtime.shutdown_background();
    Ok(result?)
}

async fn drive<S: KeyValueStore>(session: &mut Session<S>, autostart: bool) -> std::io::Result<()> {
    println!("{HELP}");
    if autostart {
        session.start();
    }

    let mut countdown = interval(Duration::from_secs(1));
    countdown.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick resolves immediately; the first second must fully elapse.
    countdown.tick().await;

    let mut clock = interval(Duration::from_secs(1));
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(session)?;
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = countdown.tick() => {
                if let Some(event) = session.tick() {
                    report(&event);
                    render(session)?;
                }
            }
            _ = clock.tick() => render(session)?,
            line = lines.next_line(), if stdin_open => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        debug!("stdin closed");
                        stdin_open = false;
                        continue;
                    }
                    Err(e) => {
                        warn!("failed to read stdin: {e}");
                        stdin_open = false;
                        continue;
                    }
                };
                match Input::parse(&line) {
                    Input::Quit => break,
                    input => {
                        handle(session, input);
                        render(session)?;
                    }
                }
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    warn!("failed to listen for ctrl-c: {e}");
                }
                break;
            }
        }
    }

    println!();
    if session.shutdown() {
        info!("timer state saved");
    }
    Ok(())
}

fn handle<S: KeyValueStore>(session: &mut Session<S>, input: Input) {
    match input {
        Input::Start => {
            session.start();
        }
        Input::Pause => {
            session.pause();
        }
        Input::Toggle => {
            if session.timer().is_running() {
                session.pause();
            } else {
                session.start();
            }
        }
        Input::Reset => {
            session.reset();
        }
        Input::Status => match serde_json::to_string(&session.timer().state_snapshot()) {
            Ok(json) => println!("\n{json}"),
            Err(e) => warn!("failed to encode state: {e}"),
        },
        Input::Help => println!("\n{HELP}"),
        Input::Unknown(cmd) => println!("\nunknown command: {cmd}. {HELP}"),
        Input::Quit => {}
    }
}

fn report(event: &Event) {
    if let Event::PhaseCompleted {
        completed,
        next,
        auto_started,
        ..
    } = event
    {
        let mut line = completion_message(*completed, *next);
        if !auto_started {
            line.push_str(" Press enter to start.");
        }
        println!("\n{line}");
    }
}

fn render<S: KeyValueStore>(session: &Session<S>) -> std::io::Result<()> {
    let display = session.display();
    let clock = session.clock(&chrono::Local::now());
    let state = if display.is_running { "running" } else { "paused" };

    let mut out = std::io::stdout().lock();
    if out.is_terminal() {
        write!(out, "\x1b]0;{}\x07", display.title())?;
    }
    write!(
        out,
        "\r{clock}  {:<11} {}  [{state}]  completed: {}   ",
        display.mode_label, display.time, display.completed_focus_count
    )?;
    out.flush()
}
