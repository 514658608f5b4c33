//! Google command - sign up with a Google account
//!
//! With `--credential` the ID token is exchanged directly, as the Sign-In
//! callback would. Otherwise the Sign-In SDK is loaded and the user is
//! asked to paste the token Google issued.

use std::sync::Arc;

use anyhow::Result;
use dialoguer::Password;
use storefront_core::adapters::google::GoogleIdentityClient;
use storefront_core::domain::result::Error;
use storefront_core::ports::IdentityProvider;
use storefront_core::StorefrontContext;

use super::{finish, get_context, log_command, warn_insecure_transport};

/// Identity provider that reads the credential from the terminal
pub fn terminal_identity() -> Arc<dyn IdentityProvider> {
    Arc::new(GoogleIdentityClient::new(Box::new(|| {
        let token = Password::new()
            .with_prompt("Google ID token (leave empty to cancel)")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| Error::identity(e.to_string()))?;

        Ok(Some(token).filter(|t| !t.trim().is_empty()))
    })))
}

pub fn run(credential: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    log_command(&ctx, "google");
    warn_insecure_transport(&ctx, json);

    let outcome = match credential {
        Some(token) => ctx.signup_flow(None).google_sign_up(token.trim()),
        None => prompt(&ctx),
    };

    finish(&ctx, outcome, json)
}

fn prompt(ctx: &StorefrontContext) -> storefront_core::FlowOutcome {
    let mut flow = ctx.signup_flow(Some(terminal_identity()));
    flow.mount();
    flow.prompt_google()
}
