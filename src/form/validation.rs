use regex::Regex;

use super::{FormKind, Inputs};

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

pub fn valid_phone(phone: &str) -> bool {
    // exactly 10 decimal digits, no separators
    Regex::new(r"^\d{10}$").map_or(false, |re| re.is_match(phone))
}

/// Run the ordered validation pipeline, stopping at the first failing rule
/// and returning its user-facing message.
pub fn validate(kind: FormKind, inputs: &Inputs, captcha_valid: bool) -> Result<(), &'static str> {
    let required_ok = match kind {
        FormKind::Login => !inputs.email.is_empty() && !inputs.password.is_empty(),
        FormKind::Signup => {
            // phoneNumber is covered by its own format rule below
            !inputs.username.is_empty()
                && !inputs.email.is_empty()
                && !inputs.password.is_empty()
                && !inputs.confirm_password.is_empty()
        }
    };

    if !required_ok {
        return Err("All fields are required.");
    }

    if !valid_email(&inputs.email) {
        return Err("Please enter a valid email address.");
    }

    if kind == FormKind::Signup && !valid_phone(&inputs.phone_number) {
        return Err("Phone number must be 10 digits.");
    }

    if inputs.password.chars().count() < 6 {
        return Err("Password must be at least 6 characters.");
    }

    if kind == FormKind::Signup && inputs.password != inputs.confirm_password {
        return Err("Passwords do not match.");
    }

    if !captcha_valid {
        return Err("Please complete the captcha.");
    }

    Ok(())
}
