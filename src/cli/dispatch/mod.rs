use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use std::path::PathBuf;

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .map(ToString::to_string)
        .ok_or_else(|| anyhow!("missing required argument: --{name}"))
}

pub fn handler(matches: &clap::ArgMatches) -> Result<(GlobalArgs, Action)> {
    let base_url = required(matches, "base-url")?;

    let session_file = matches
        .get_one::<PathBuf>("session-file")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("ensaluti-session.json"));

    let globals = GlobalArgs::new(base_url, session_file);

    let action = match matches.subcommand() {
        Some(("login", sub)) => Action::Login {
            email: required(sub, "email")?,
            password: SecretString::from(required(sub, "password")?),
            captcha_token: sub
                .get_one::<String>("captcha-token")
                .map(ToString::to_string),
        },
        Some(("signup", sub)) => Action::Signup {
            username: required(sub, "username")?,
            email: required(sub, "email")?,
            phone_number: required(sub, "phone-number")?,
            password: SecretString::from(required(sub, "password")?),
            confirm_password: SecretString::from(required(sub, "confirm-password")?),
            captcha_token: sub
                .get_one::<String>("captcha-token")
                .map(ToString::to_string),
        },
        _ => return Err(anyhow!("missing subcommand")),
    };

    Ok((globals, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn test_handler_login() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "ensaluti",
            "--base-url",
            "https://api.example.com",
            "login",
            "--email",
            "user@example.com",
            "--password",
            "secret1",
        ]);

        let (globals, action) = handler(&matches)?;

        assert_eq!(globals.base_url, "https://api.example.com");
        assert_eq!(globals.session_file, PathBuf::from("ensaluti-session.json"));

        match action {
            Action::Login {
                email,
                password,
                captcha_token,
            } => {
                assert_eq!(email, "user@example.com");
                assert_eq!(password.expose_secret(), "secret1");
                assert_eq!(captcha_token, None);
            }
            Action::Signup { .. } => return Err(anyhow!("expected login action")),
        }

        Ok(())
    }

    #[test]
    fn test_handler_signup() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "ensaluti",
            "--base-url",
            "https://api.example.com",
            "signup",
            "--username",
            "bob",
            "--email",
            "bob@x.com",
            "--phone-number",
            "1234567890",
            "--password",
            "secret1",
            "--confirm-password",
            "secret1",
            "--captcha-token",
            "token-123",
        ]);

        let (_, action) = handler(&matches)?;

        match action {
            Action::Signup {
                username,
                email,
                phone_number,
                password,
                confirm_password,
                captcha_token,
            } => {
                assert_eq!(username, "bob");
                assert_eq!(email, "bob@x.com");
                assert_eq!(phone_number, "1234567890");
                assert_eq!(password.expose_secret(), "secret1");
                assert_eq!(confirm_password.expose_secret(), "secret1");
                assert_eq!(captcha_token.as_deref(), Some("token-123"));
            }
            Action::Login { .. } => return Err(anyhow!("expected signup action")),
        }

        Ok(())
    }
}
