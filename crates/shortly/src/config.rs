//! CLI configuration: a thin wrapper around `shortly_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--profile, --api-url, --insecure, --timeout).

use std::time::Duration;

use clap::ValueEnum;
use shortly_core::{ServiceConfig, Shortly, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use shortly_config::{
    Config, CredentialBackend, Defaults, Profile, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Fill `--output` and `--color` from `[defaults]` when neither the flag
/// nor its env var was given. Unparseable values fall back to the built-in
/// defaults.
pub fn apply_output_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&defaults.output, true)
            .inspect_err(|e| tracing::warn!(value = %defaults.output, "ignoring defaults.output: {e}"))
            .ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&defaults.color, true)
            .inspect_err(|e| tracing::warn!(value = %defaults.color, "ignoring defaults.color: {e}"))
            .ok();
    }
}

/// Translate the active profile + global flags into a `ServiceConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_service_config(
    global: &GlobalOpts,
    cfg: &Config,
    profile: &Profile,
) -> Result<ServiceConfig, CliError> {
    let mut service = shortly_config::profile_to_service_config(profile, &cfg.defaults)?;

    if let Some(ref url_str) = global.api_url {
        service.api_url = url_str.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    if global.insecure {
        service.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        service.timeout = Duration::from_secs(secs);
    }
    Ok(service)
}

/// Build the app facade for the active profile and confirm its session.
pub fn build_app(global: &GlobalOpts) -> Result<Shortly, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profile(&profile_name)?;
    let service = resolve_service_config(global, &cfg, &profile)?;
    let store = shortly_config::open_credential_store(&profile, &profile_name)?;

    tracing::debug!(
        profile = %profile_name,
        api_url = %service.api_url,
        "building client"
    );
    let app = Shortly::new(service, store)?;
    app.session().initialize();
    Ok(app)
}
