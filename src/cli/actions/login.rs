use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::form::{Form, Submission};
use crate::session::{FileStore, LogNavigator};
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Handle the login action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Login {
        email,
        password,
        captcha_token,
    } = action
    else {
        return Err(anyhow!("expected login action"));
    };

    let store = Arc::new(FileStore::new(globals.session_file.clone()));
    let form = Form::login(&globals.base_url, store, Arc::new(LogNavigator));

    form.set_field("email", &email);
    form.set_field("password", password.expose_secret());
    form.on_captcha(captcha_token.as_deref());

    match form.submit().await {
        Submission::Authenticated { user_id } => {
            println!("Logged in as {user_id}");

            Ok(())
        }
        Submission::Rejected => Err(anyhow!(form.error().unwrap_or("submission rejected"))),
        Submission::Failed => Err(anyhow!("login request failed")),
        Submission::InFlight => Err(anyhow!("a submission is already in progress")),
    }
}
