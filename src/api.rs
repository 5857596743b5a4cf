//! Signed GET access to the Telldus Live JSON API.

use crate::credentials::Credentials;
use crate::error::TdtoolError;
use crate::oauth::signer::{percent_encode, sign_request};

pub const DEFAULT_BASE_URL: &str = "http://api.telldus.com";

/// A request parameter value; integers go on the wire as decimal strings.
#[derive(Debug, Clone)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl ParamValue {
    fn into_wire(self) -> String {
        match self {
            ParamValue::Str(s) => s,
            ParamValue::Int(i) => i.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<u32> for ParamValue {
    fn from(i: u32) -> Self {
        ParamValue::Int(i64::from(i))
    }
}

/// Client for named operations like `devices/list` or `device/command`.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    creds: Credentials,
}

impl ApiClient {
    pub fn new(creds: Credentials) -> Self {
        Self::with_base_url(creds, DEFAULT_BASE_URL)
    }

    /// Point the client at a different host; used by the test suites.
    pub fn with_base_url(creds: Credentials, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            creds,
        }
    }

    /// Execute one named operation and return the parsed JSON body.
    ///
    /// The payload is passed through unchanged; callers check for the
    /// `error` key, which is a normal variant of a successful exchange,
    /// not a transport failure.
    pub async fn request(
        &self,
        operation: &str,
        params: Vec<(&str, ParamValue)>,
    ) -> Result<serde_json::Value, TdtoolError> {
        let (token, token_secret) = self
            .creds
            .access_token()
            .ok_or(TdtoolError::NotAuthenticated)?;
        let token = token.to_string();
        let token_secret = token_secret.to_string();

        let wire_params: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.into_wire()))
            .collect();

        let url = format!("{}/json/{operation}", self.base_url);
        let signed = sign_request(
            &self.creds.consumer_key,
            &self.creds.consumer_secret,
            Some((&token, &token_secret)),
            "GET",
            &url,
            &wire_params,
        )?;

        let request_url = format!("{url}?{}", build_query(&wire_params));
        tracing::debug!(%operation, url = %request_url, "issuing API request");

        let response = self
            .http
            .get(&request_url)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .send()
            .await
            .map_err(|e| TdtoolError::Transport {
                operation: operation.to_string(),
                source: Box::new(e),
            })?;

        let body = response.text().await.map_err(|e| TdtoolError::Transport {
            operation: operation.to_string(),
            source: Box::new(e),
        })?;

        serde_json::from_str(&body).map_err(|e| TdtoolError::Transport {
            operation: operation.to_string(),
            source: format!("unparseable response body: {e}").into(),
        })
    }
}

/// Percent-encoded query string; spaces become `%20`, never `+`.
fn build_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_params_format_as_decimal() {
        assert_eq!(ParamValue::from(397u32).into_wire(), "397");
        assert_eq!(ParamValue::from(-1i64).into_wire(), "-1");
    }

    #[test]
    fn str_params_pass_through() {
        assert_eq!(ParamValue::from("on").into_wire(), "on");
    }

    #[test]
    fn query_encodes_space_as_percent_20() {
        let q = build_query(&[("name".into(), "living room".into())]);
        assert_eq!(q, "name=living%20room");
        assert!(!q.contains('+'));
    }

    #[test]
    fn query_preserves_order_and_repeats() {
        let q = build_query(&[
            ("id".into(), "3".into()),
            ("method".into(), "1".into()),
            ("id".into(), "4".into()),
        ]);
        assert_eq!(q, "id=3&method=1&id=4");
    }

    #[tokio::test]
    async fn request_requires_access_token() {
        let creds = Credentials {
            consumer_key: "CK".into(),
            consumer_secret: "CS".into(),
            ..Default::default()
        };
        let client = ApiClient::with_base_url(creds, "http://127.0.0.1:9");
        let err = client.request("devices/list", vec![]).await.unwrap_err();
        assert_eq!(err.code(), "not_authenticated");
    }
}
