//! Login command - sign in with email and password

use anyhow::Result;
use storefront_core::Credentials;

use super::{
    finish, get_context, log_command, password_or_prompt, text_or_prompt, warn_insecure_transport,
};

pub fn run(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    log_command(&ctx, "login");
    warn_insecure_transport(&ctx, json);

    let email = text_or_prompt(email, "Email")?;
    let password = password_or_prompt(password)?;

    let outcome = ctx
        .login_flow()
        .submit(&Credentials::new(email.trim(), password));

    finish(&ctx, outcome, json)
}
