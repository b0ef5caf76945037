//! Command dispatch: routes a parsed `Command` to its handler.

pub mod auth;
pub mod config_cmd;
pub mod links;
pub mod stats;
pub mod util;

use shortly_core::{NoticeLevel, Shortly};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Run a command that talks to the API.
///
/// Success notices raised by the controllers are echoed to stderr once the
/// command finishes. Error notices are skipped: the returned error is
/// reported by `main` instead.
pub async fn dispatch(cmd: Command, app: &Shortly, global: &GlobalOpts) -> Result<(), CliError> {
    let mut notices = app.notices();

    let result = match cmd {
        Command::Register(args) => auth::register(app, args, global).await,
        Command::Login(args) => auth::login(app, args, global).await,
        Command::Logout => {
            auth::logout(app, global);
            Ok(())
        }
        Command::Whoami => auth::whoami(app, global),
        Command::Links(args) => links::handle(app, args, global).await,
        Command::Stats(args) => stats::handle(app, args, global).await,
        // Handled in main without an API client.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    };

    while let Ok(notice) = notices.try_recv() {
        if notice.level == NoticeLevel::Success {
            output::print_status(&notice.message, global.quiet);
        }
    }
    result
}
