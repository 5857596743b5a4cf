//! Two-step delegated-authorization handshake.
//!
//! Step one requests a temporary token and hands the user a consent URL;
//! after out-of-band approval, step two exchanges the temporary token for
//! the long-lived access token. Both steps mutate the in-memory
//! [`Credentials`]; the caller persists them.

use std::collections::HashMap;

use crate::credentials::Credentials;
use crate::error::TdtoolError;
use crate::oauth::signer::sign_request;

pub const REQUEST_TOKEN_PATH: &str = "/oauth/requestToken";
pub const ACCESS_TOKEN_PATH: &str = "/oauth/accessToken";
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Step one: obtain a temporary token.
///
/// Issues a token-less signed GET to the request-token endpoint, stores
/// the returned temporary token, and returns the URL the user must open
/// to grant consent. Never touches the access-token fields.
pub async fn request_temporary_token(
    base_url: &str,
    creds: &mut Credentials,
) -> Result<String, TdtoolError> {
    let url = format!("{base_url}{REQUEST_TOKEN_PATH}");
    let signed = sign_request(
        &creds.consumer_key,
        &creds.consumer_secret,
        None,
        "GET",
        &url,
        &[],
    )?;

    let body = fetch_token_body(&url, &signed.authorization, "oauth/requestToken").await?;
    let (token, secret) = parse_token_body(&body)?;
    tracing::debug!(token = %token, "received temporary token");
    creds.store_request_token(token.clone(), secret);

    Ok(format!("{base_url}{AUTHORIZE_PATH}?oauth_token={token}"))
}

/// Step two: exchange the stored temporary token for an access token.
///
/// A non-success status fails with the raw server body and leaves the
/// credentials untouched, so the exchange can be retried.
pub async fn exchange_access_token(
    base_url: &str,
    creds: &mut Credentials,
) -> Result<(), TdtoolError> {
    let (request_token, request_secret) = creds
        .pending_request_token()
        .map(|(k, s)| (k.to_string(), s.to_string()))
        .ok_or(TdtoolError::NotAuthenticated)?;

    let url = format!("{base_url}{ACCESS_TOKEN_PATH}");
    let signed = sign_request(
        &creds.consumer_key,
        &creds.consumer_secret,
        Some((&request_token, &request_secret)),
        "GET",
        &url,
        &[],
    )?;

    let body = fetch_token_body(&url, &signed.authorization, "oauth/accessToken").await?;
    let (token, secret) = parse_token_body(&body)?;
    creds.store_access_token(token, secret);

    Ok(())
}

async fn fetch_token_body(
    url: &str,
    authorization: &str,
    operation: &str,
) -> Result<String, TdtoolError> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header("Authorization", authorization)
        .send()
        .await
        .map_err(|e| TdtoolError::Transport {
            operation: operation.to_string(),
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| TdtoolError::Transport {
        operation: operation.to_string(),
        source: Box::new(e),
    })?;

    if !status.is_success() {
        return Err(TdtoolError::AuthExchange { body });
    }
    Ok(body)
}

/// Parse a `oauth_token=...&oauth_token_secret=...` response body.
fn parse_token_body(body: &str) -> Result<(String, String), TdtoolError> {
    let fields: HashMap<String, String> =
        serde_urlencoded::from_str(body).map_err(|_| TdtoolError::AuthExchange {
            body: body.to_string(),
        })?;
    let token = fields.get("oauth_token").cloned();
    let secret = fields.get("oauth_token_secret").cloned();
    match (token, secret) {
        (Some(t), Some(s)) => Ok((t, s)),
        _ => Err(TdtoolError::AuthExchange {
            body: body.to_string(),
        }),
    }
}
