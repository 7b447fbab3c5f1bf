use clap::Subcommand;
use focusclock_core::{KeyValueStore, RawSettingsInput, Session, Settings, SilentNotifier};

use crate::context::Context;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Change one or more settings. Out-of-range minutes are clamped;
    /// non-numeric values keep the current setting.
    Set {
        /// Focus phase length in minutes (1-60)
        #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
        focus: Option<String>,
        /// Short break length in minutes (1-30)
        #[arg(long = "break", value_name = "MINUTES", allow_hyphen_values = true)]
        break_minutes: Option<String>,
        /// Long break length in minutes (1-60)
        #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
        long_break: Option<String>,
        /// Start the next phase automatically (true/false)
        #[arg(long, value_name = "BOOL")]
        auto_start: Option<String>,
        /// Clock display format (12 or 24)
        #[arg(long, value_name = "12|24")]
        clock_format: Option<String>,
    },
    /// Restore default settings
    Reset,
}

pub fn run(ctx: &Context, action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ctx.open_session(Box::new(SilentNotifier));

    let settings = match action {
        SettingsAction::Show => *session.settings(),
        SettingsAction::Set {
            focus,
            break_minutes,
            long_break,
            auto_start,
            clock_format,
        } => {
            let raw = RawSettingsInput {
                focus_minutes: focus,
                break_minutes,
                long_break_minutes: long_break,
                auto_start_next: auto_start,
                clock_format,
            };
            apply(&mut session, &raw)
        }
        SettingsAction::Reset => apply(&mut session, &RawSettingsInput::from(Settings::default())),
    };

    let json = serde_json::to_string_pretty(&settings)?;
    println!("{json}");
    Ok(())
}

fn apply<S: KeyValueStore>(session: &mut Session<S>, raw: &RawSettingsInput) -> Settings {
    let settings = session.update_settings(raw);
    // The phase was rewound to the new duration; keep the saved timer in step.
    session.persist_timer_state();
    settings
}
