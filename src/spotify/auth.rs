use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    error::ResolveError,
    types::{AccessCredential, TokenResponse},
};

/// Builds the `Authorization: Basic` value for a client-credentials grant.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

/// Exchanges the application credentials for a short-lived access token.
///
/// Uses the OAuth 2.0 client-credentials grant, so no user interaction is
/// involved. The returned credential is never cached: every resolution
/// requests a fresh one.
///
/// # Errors
///
/// - `ResolveError::Authentication` if the token endpoint rejects the
///   credentials or answers without an `access_token`
/// - `ResolveError::Upstream` if the endpoint cannot be reached
pub async fn client_credentials(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessCredential, ResolveError> {
    let res = client
        .post(token_url)
        .header(
            reqwest::header::AUTHORIZATION,
            basic_auth_header(client_id, client_secret),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        return Err(ResolveError::Authentication(format!(
            "token endpoint answered {}",
            status
        )));
    }

    let body = res.text().await?;
    let json: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| ResolveError::Authentication(format!("unreadable token response: {}", e)))?;

    match json.access_token {
        Some(access_token) if !access_token.is_empty() => Ok(AccessCredential { access_token }),
        _ => Err(ResolveError::Authentication(
            "no access token in response".to_string(),
        )),
    }
}
