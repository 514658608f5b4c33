//! Signup command - create an account

use anyhow::Result;
use storefront_core::{Registration, SocialProvider};

use super::google::terminal_identity;
use super::{
    finish, get_context, log_command, password_or_prompt, text_or_prompt, warn_insecure_transport,
};

pub fn run(
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    provider: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    log_command(&ctx, "signup");
    warn_insecure_transport(&ctx, json);

    if let Some(name) = provider {
        let provider: SocialProvider = name.parse().map_err(anyhow::Error::msg)?;

        let identity = provider.is_enabled().then(terminal_identity);
        let mut flow = ctx.signup_flow(identity);
        if provider.is_enabled() {
            flow.mount();
        }
        let outcome = flow.sign_up_with(provider);
        return finish(&ctx, outcome, json);
    }

    let full_name = text_or_prompt(full_name, "Full name")?;
    let email = text_or_prompt(email, "Email")?;
    let password = password_or_prompt(password)?;

    let registration = Registration::new(full_name.trim(), email.trim(), password);
    let outcome = ctx.signup_flow(None).submit(&registration);

    finish(&ctx, outcome, json)
}
