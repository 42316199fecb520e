use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, instrument};
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[instrument]
pub fn endpoint_url(base_url: &str, endpoint: &str) -> Result<String> {
    let url = Url::parse(base_url)?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| anyhow!("Error parsing URL: no host specified"))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{endpoint}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

fn client() -> Result<Client> {
    Ok(Client::builder().user_agent(APP_USER_AGENT).build()?)
}

fn user_id(json_response: &Value) -> Result<String> {
    json_response["user"]["_id"].as_str().map_or_else(
        || Err(anyhow!("Error parsing JSON response: no user id found")),
        |id| Ok(id.to_string()),
    )
}

/// POST credentials to the login endpoint, returning the user identifier.
#[instrument(skip(password))]
pub async fn login(base_url: &str, email: &str, password: &str) -> Result<String> {
    let client = client()?;

    let login_url = endpoint_url(base_url, "/api/users/login")?;

    let payload = json!({
        "email": email,
        "password": password,
    });

    let response = client.post(&login_url).json(&payload).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("{} - {}", login_url, response.status()));
    }

    let json_response: Value = response.json().await?;

    user_id(&json_response)
}

/// POST a registration to the signup endpoint, returning the user identifier.
/// The confirmation password never leaves the client.
#[instrument(skip(password))]
pub async fn signup(
    base_url: &str,
    username: &str,
    email: &str,
    phone_number: &str,
    password: &str,
) -> Result<String> {
    let client = client()?;

    let signup_url = endpoint_url(base_url, "/api/users/signup")?;

    let payload = json!({
        "username": username,
        "email": email,
        "phoneNumber": phone_number,
        "password": password,
    });

    let response = client.post(&signup_url).json(&payload).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("{} - {}", signup_url, response.status()));
    }

    let json_response: Value = response.json().await?;

    user_id(&json_response)
}
