use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};
use std::path::PathBuf;

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn captcha_token_arg() -> Arg {
    Arg::new("captcha-token")
        .long("captcha-token")
        .help("Verification token from the CAPTCHA collaborator; absent means not verified")
        .env("ENSALUTI_CAPTCHA_TOKEN")
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("ensaluti")
        .about("Client-side credential submission workflows")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg(
            Arg::new("base-url")
                .short('b')
                .long("base-url")
                .help("Base URL of the authentication API, example: https://api.example.com")
                .env("ENSALUTI_BASE_URL")
                .required(true)
                .global(false),
        )
        .arg(
            Arg::new("session-file")
                .long("session-file")
                .help("Where to persist the session record")
                .default_value("ensaluti-session.json")
                .env("ENSALUTI_SESSION_FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ENSALUTI_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Submit login credentials")
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Account email address")
                        .env("ENSALUTI_EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("ENSALUTI_PASSWORD")
                        .required(true),
                )
                .arg(captcha_token_arg()),
        )
        .subcommand(
            Command::new("signup")
                .about("Submit a registration")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Username for the new account")
                        .env("ENSALUTI_USERNAME")
                        .required(true),
                )
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Account email address")
                        .env("ENSALUTI_EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new("phone-number")
                        .long("phone-number")
                        .help("Phone number, 10 digits")
                        .env("ENSALUTI_PHONE_NUMBER")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("ENSALUTI_PASSWORD")
                        .required(true),
                )
                .arg(
                    Arg::new("confirm-password")
                        .long("confirm-password")
                        .help("Password confirmation, must match the password")
                        .env("ENSALUTI_CONFIRM_PASSWORD")
                        .required(true),
                )
                .arg(captcha_token_arg()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "ensaluti");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Client-side credential submission workflows"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_login_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "ensaluti",
            "--base-url",
            "https://api.example.com",
            "login",
            "--email",
            "user@example.com",
            "--password",
            "secret1",
            "--captcha-token",
            "token-123",
        ]);

        assert_eq!(
            matches.get_one::<String>("base-url").map(|s| s.to_string()),
            Some("https://api.example.com".to_string())
        );
        assert_eq!(
            matches
                .get_one::<PathBuf>("session-file")
                .cloned(),
            Some(PathBuf::from("ensaluti-session.json"))
        );

        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "login");
        assert_eq!(
            sub.get_one::<String>("email").map(|s| s.to_string()),
            Some("user@example.com".to_string())
        );
        assert_eq!(
            sub.get_one::<String>("password").map(|s| s.to_string()),
            Some("secret1".to_string())
        );
        assert_eq!(
            sub.get_one::<String>("captcha-token").map(|s| s.to_string()),
            Some("token-123".to_string())
        );
    }

    #[test]
    fn test_check_signup_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
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
        ]);

        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "signup");
        assert_eq!(
            sub.get_one::<String>("username").map(|s| s.to_string()),
            Some("bob".to_string())
        );
        assert_eq!(
            sub.get_one::<String>("phone-number").map(|s| s.to_string()),
            Some("1234567890".to_string())
        );
        // absent token: the workflow treats this as not verified
        assert_eq!(sub.get_one::<String>("captcha-token"), None);
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("ENSALUTI_BASE_URL", Some("https://api.example.com")),
                ("ENSALUTI_SESSION_FILE", Some("alt-session.json")),
                ("ENSALUTI_EMAIL", Some("user@example.com")),
                ("ENSALUTI_PASSWORD", Some("secret1")),
                ("ENSALUTI_CAPTCHA_TOKEN", Some("token-123")),
                ("ENSALUTI_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["ensaluti", "login"]);

                assert_eq!(
                    matches.get_one::<String>("base-url").map(|s| s.to_string()),
                    Some("https://api.example.com".to_string())
                );
                assert_eq!(
                    matches
                        .get_one::<PathBuf>("session-file")
                        .cloned(),
                    Some(PathBuf::from("alt-session.json"))
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));

                let (name, sub) = matches.subcommand().expect("subcommand");
                assert_eq!(name, "login");
                assert_eq!(
                    sub.get_one::<String>("email").map(|s| s.to_string()),
                    Some("user@example.com".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>("captcha-token").map(|s| s.to_string()),
                    Some("token-123".to_string())
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("ENSALUTI_LOG_LEVEL", Some(level)),
                    ("ENSALUTI_BASE_URL", Some("https://api.example.com")),
                    ("ENSALUTI_EMAIL", Some("user@example.com")),
                    ("ENSALUTI_PASSWORD", Some("secret1")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["ensaluti", "login"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").map(|s| *s),
                        Some(index as u8)
                    );
                },
            );
        }
    }
}
