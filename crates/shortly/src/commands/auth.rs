//! Account and session command handlers.

use secrecy::ExposeSecret;
use shortly_core::{Shortly, User};

use crate::cli::{CredentialsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn register(
    app: &Shortly,
    args: CredentialsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = util::read_password("Password: ", args.password_stdin)?;
    if !args.password_stdin {
        let again = util::read_password("Repeat password: ", false)?;
        if again.expose_secret() != password.expose_secret() {
            return Err(CliError::Validation {
                field: "password".into(),
                reason: "passwords do not match".into(),
            });
        }
    }

    let user = app.register(&args.username, &password).await?;
    let out = output::render_single(
        global.output_format(),
        &user,
        |u: &User| format!("Registered '{}' (id {})", u.username, u.id),
        |u| u.username.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn login(
    app: &Shortly,
    args: CredentialsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = util::read_password("Password: ", args.password_stdin)?;
    app.session().login(&args.username, &password).await?;
    output::print_status(&format!("Logged in as {}", args.username), global.quiet);
    Ok(())
}

pub fn logout(app: &Shortly, global: &GlobalOpts) {
    let was = app.session().username();
    app.session().logout();
    match was {
        Some(name) => output::print_status(&format!("Logged out {name}"), global.quiet),
        None => output::print_status("Not logged in", global.quiet),
    }
}

pub fn whoami(app: &Shortly, global: &GlobalOpts) -> Result<(), CliError> {
    let state = app.session().state();
    if !state.logged_in {
        return Err(CliError::NotLoggedIn);
    }
    let name = state.username.unwrap_or_default();
    output::print_output(&name, global.quiet);
    Ok(())
}
