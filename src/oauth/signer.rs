//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Builds the canonical signature base string for a request, signs it with
//! the consumer secret and (optional) token secret, and assembles the
//! `Authorization: OAuth ...` header value the Telldus API expects.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

use crate::error::TdtoolError;

/// A request ready to be issued: the inputs plus the computed header.
///
/// Ephemeral; built per call and discarded after the HTTP exchange.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: String,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub authorization: String,
}

/// Sign a request with a fresh nonce and the current Unix timestamp.
///
/// `token` is the acting token as a (key, secret) pair: the access token
/// for API calls, the request token during the handshake, or `None` for
/// the initial temporary-token request.
pub fn sign_request(
    consumer_key: &str,
    consumer_secret: &str,
    token: Option<(&str, &str)>,
    method: &str,
    url: &str,
    params: &[(String, String)],
) -> Result<SignedRequest, TdtoolError> {
    let nonce = generate_nonce();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    sign_request_at(
        consumer_key,
        consumer_secret,
        token,
        method,
        url,
        params,
        &nonce,
        timestamp,
    )
}

/// Signing with an explicit nonce and timestamp; split out so the
/// deterministic part is testable.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sign_request_at(
    consumer_key: &str,
    consumer_secret: &str,
    token: Option<(&str, &str)>,
    method: &str,
    url: &str,
    params: &[(String, String)],
    nonce: &str,
    timestamp: u64,
) -> Result<SignedRequest, TdtoolError> {
    if consumer_key.is_empty() {
        return Err(TdtoolError::Signing("consumer key is empty".into()));
    }
    if consumer_secret.is_empty() {
        return Err(TdtoolError::Signing("consumer secret is empty".into()));
    }

    let mut oauth_params: Vec<(String, String)> = vec![
        ("oauth_consumer_key".into(), consumer_key.to_string()),
        ("oauth_nonce".into(), nonce.to_string()),
        ("oauth_signature_method".into(), "HMAC-SHA1".into()),
        ("oauth_timestamp".into(), timestamp.to_string()),
        ("oauth_version".into(), "1.0".into()),
    ];
    if let Some((token_key, _)) = token {
        oauth_params.push(("oauth_token".into(), token_key.to_string()));
    }

    let mut all_params = oauth_params.clone();
    all_params.extend_from_slice(params);

    let base = signature_base_string(method, url, &all_params)?;

    let signing_key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token.map(|(_, secret)| secret).unwrap_or(""))
    );
    let mut mac = Hmac::<Sha1>::new_from_slice(signing_key.as_bytes())
        .map_err(|e| TdtoolError::Signing(e.to_string()))?;
    mac.update(base.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    oauth_params.push(("oauth_signature".into(), signature));
    oauth_params.sort();

    let header_parts: Vec<String> = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect();

    Ok(SignedRequest {
        method: method.to_uppercase(),
        url: url.to_string(),
        params: params.to_vec(),
        authorization: format!("OAuth {}", header_parts.join(", ")),
    })
}

/// The canonical base string: method, normalized URL, and the byte-sorted
/// percent-encoded parameter string.
///
/// Parameters live in a list rather than a map so repeated keys all enter
/// the signature; any query string on the URL is folded into the set.
pub(crate) fn signature_base_string(
    method: &str,
    url: &str,
    params: &[(String, String)],
) -> Result<String, TdtoolError> {
    let parsed = Url::parse(url).map_err(|e| TdtoolError::Signing(format!("bad URL {url}: {e}")))?;
    let base_url = format!(
        "{}://{}{}",
        parsed.scheme(),
        parsed.host_str().unwrap_or(""),
        parsed.path()
    );

    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    for (k, v) in parsed.query_pairs() {
        encoded.push((percent_encode(&k), percent_encode(&v)));
    }
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_url),
        percent_encode(&param_string)
    ))
}

/// Random nonce: 32 bytes, base64url without padding.
pub(crate) fn generate_nonce() -> String {
    let mut buf = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::rng(), &mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

/// Percent-encode per RFC 3986 (unreserved characters stay literal).
pub(crate) fn percent_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            result.push(byte as char);
        } else {
            result.push_str(&format!("%{byte:02X}"));
        }
    }
    result
}
