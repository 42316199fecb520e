pub mod login;
pub mod signup;

use secrecy::SecretString;

#[derive(Debug, Clone)]
pub enum Action {
    Login {
        email: String,
        password: SecretString,
        captcha_token: Option<String>,
    },
    Signup {
        username: String,
        email: String,
        phone_number: String,
        password: SecretString,
        confirm_password: SecretString,
        captcha_token: Option<String>,
    },
}
