use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::TdtoolError;

/// Persisted key material for the Telldus Live API.
///
/// Either both access-token fields are set (authenticated) or both are
/// absent; the request-token fields are transient and cleared once they
/// have been exchanged for an access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, rename = "publicKey")]
    pub consumer_key: String,
    #[serde(default, rename = "privateKey")]
    pub consumer_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(
        default,
        rename = "tokenSecret",
        skip_serializing_if = "Option::is_none"
    )]
    pub token_secret: Option<String>,
    #[serde(
        default,
        rename = "requestToken",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_token: Option<String>,
    #[serde(
        default,
        rename = "requestTokenSecret",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_token_secret: Option<String>,
}

/// Where the holder stands in the authorization handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    PendingApproval,
    Authenticated,
}

impl Credentials {
    pub fn auth_state(&self) -> AuthState {
        if self.token.is_some() && self.token_secret.is_some() {
            AuthState::Authenticated
        } else if self.request_token.is_some() && self.request_token_secret.is_some() {
            AuthState::PendingApproval
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state() == AuthState::Authenticated
    }

    /// Access token as a (key, secret) pair, if present.
    pub fn access_token(&self) -> Option<(&str, &str)> {
        match (&self.token, &self.token_secret) {
            (Some(k), Some(s)) => Some((k.as_str(), s.as_str())),
            _ => None,
        }
    }

    /// Stored temporary token as a (key, secret) pair, if present.
    pub fn pending_request_token(&self) -> Option<(&str, &str)> {
        match (&self.request_token, &self.request_token_secret) {
            (Some(k), Some(s)) => Some((k.as_str(), s.as_str())),
            _ => None,
        }
    }

    pub fn store_request_token(&mut self, key: String, secret: String) {
        self.request_token = Some(key);
        self.request_token_secret = Some(secret);
    }

    /// Replace the temporary token with a granted access token.
    pub fn store_access_token(&mut self, key: String, secret: String) {
        self.token = Some(key);
        self.token_secret = Some(secret);
        self.request_token = None;
        self.request_token_secret = None;
    }
}

/// Path of the credential file.
///
/// `TDTOOL_CONFIG` overrides the default `~/.config/Telldus/tdtool.conf`.
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("TDTOOL_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("Telldus")
        .join("tdtool.conf")
}

/// Load credentials, falling back to an empty value when no file exists.
///
/// An empty consumer key/secret is filled in from `TDTOOL_PUBLIC_KEY` /
/// `TDTOOL_PRIVATE_KEY` so the keys never have to live in the binary.
pub fn load() -> Result<Credentials, TdtoolError> {
    let path = config_path();
    let mut creds = if path.exists() {
        let content = std::fs::read_to_string(&path).map_err(|e| TdtoolError::Config {
            path: path.clone(),
            detail: format!("Cannot read file: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| TdtoolError::Config {
            path: path.clone(),
            detail: format!("Invalid TOML: {e}"),
        })?
    } else {
        Credentials::default()
    };

    if creds.consumer_key.is_empty() {
        if let Ok(key) = std::env::var("TDTOOL_PUBLIC_KEY") {
            creds.consumer_key = key;
        }
    }
    if creds.consumer_secret.is_empty() {
        if let Ok(secret) = std::env::var("TDTOOL_PRIVATE_KEY") {
            creds.consumer_secret = secret;
        }
    }

    Ok(creds)
}

/// Write credentials back to disk, creating the config directory if needed.
///
/// No file locking: concurrent invocations from separate processes are out
/// of scope.
pub fn save(creds: &Credentials) -> Result<(), TdtoolError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(creds).map_err(|e| TdtoolError::Config {
        path: path.clone(),
        detail: format!("Cannot serialize credentials: {e}"),
    })?;
    std::fs::write(&path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated() -> Credentials {
        Credentials {
            consumer_key: "CK".into(),
            consumer_secret: "CS".into(),
            token: Some("AT".into()),
            token_secret: Some("ATS".into()),
            request_token: None,
            request_token_secret: None,
        }
    }

    #[test]
    fn state_unauthenticated_by_default() {
        let creds = Credentials::default();
        assert_eq!(creds.auth_state(), AuthState::Unauthenticated);
        assert!(!creds.is_authenticated());
    }

    #[test]
    fn state_pending_after_request_token() {
        let mut creds = Credentials::default();
        creds.store_request_token("RT".into(), "RTS".into());
        assert_eq!(creds.auth_state(), AuthState::PendingApproval);
        assert_eq!(creds.pending_request_token(), Some(("RT", "RTS")));
        assert!(creds.access_token().is_none());
    }

    #[test]
    fn state_authenticated_clears_request_token() {
        let mut creds = Credentials::default();
        creds.store_request_token("RT".into(), "RTS".into());
        creds.store_access_token("AT".into(), "ATS".into());
        assert_eq!(creds.auth_state(), AuthState::Authenticated);
        assert_eq!(creds.access_token(), Some(("AT", "ATS")));
        assert!(creds.request_token.is_none());
        assert!(creds.request_token_secret.is_none());
    }

    #[test]
    fn toml_roundtrip_is_identical() {
        let creds = authenticated();
        let text = toml::to_string_pretty(&creds).unwrap();
        let reloaded: Credentials = toml::from_str(&text).unwrap();
        assert_eq!(reloaded, creds);
    }

    #[test]
    fn toml_uses_wire_field_names() {
        let creds = authenticated();
        let text = toml::to_string_pretty(&creds).unwrap();
        assert!(text.contains("publicKey"));
        assert!(text.contains("tokenSecret"));
        assert!(!text.contains("consumer_key"));
    }

    #[test]
    fn absent_tokens_are_omitted_from_file() {
        let creds = Credentials {
            consumer_key: "CK".into(),
            consumer_secret: "CS".into(),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&creds).unwrap();
        assert!(!text.contains("token"));
        assert!(!text.contains("requestToken"));
    }

    #[test]
    fn parse_classic_conf_format() {
        let text = r#"
publicKey = "CK"
privateKey = "CS"
token = "AT"
tokenSecret = "ATS"
"#;
        let creds: Credentials = toml::from_str(text).unwrap();
        assert_eq!(creds.consumer_key, "CK");
        assert_eq!(creds.access_token(), Some(("AT", "ATS")));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tdtool.conf");
        // config_path honors TDTOOL_CONFIG; set it for this process
        std::env::set_var("TDTOOL_CONFIG", &path);

        let creds = authenticated();
        save(&creds).unwrap();
        let loaded = load().unwrap();
        assert_eq!(loaded, creds);

        std::env::remove_var("TDTOOL_CONFIG");
    }
}
