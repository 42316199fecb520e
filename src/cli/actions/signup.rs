use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::form::{Form, Submission};
use crate::session::{FileStore, LogNavigator};
use anyhow::{anyhow, Result};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Handle the signup action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Signup {
        username,
        email,
        phone_number,
        password,
        confirm_password,
        captcha_token,
    } = action
    else {
        return Err(anyhow!("expected signup action"));
    };

    let store = Arc::new(FileStore::new(globals.session_file.clone()));
    let form = Form::signup(&globals.base_url, store, Arc::new(LogNavigator));

    form.set_field("username", &username);
    form.set_field("email", &email);
    form.set_field("phoneNumber", &phone_number);
    form.set_field("password", password.expose_secret());
    form.set_field("confirmPassword", confirm_password.expose_secret());
    form.on_captcha(captcha_token.as_deref());

    match form.submit().await {
        Submission::Authenticated { user_id } => {
            println!("Signed up as {user_id}");

            Ok(())
        }
        Submission::Rejected => Err(anyhow!(form.error().unwrap_or("submission rejected"))),
        Submission::Failed => Err(anyhow!("signup request failed")),
        Submission::InFlight => Err(anyhow!("a submission is already in progress")),
    }
}
