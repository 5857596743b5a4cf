use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TdtoolError {
    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Error retrieving access token, the server replied:\n{body}")]
    AuthExchange { body: String },

    #[error("Not authenticated. Run tdtool once to start the authorization flow.")]
    NotAuthenticated,

    #[error("Request to {operation} failed: {source}")]
    Transport {
        operation: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    RemoteOperation(String),

    #[error("Sensor lookup failed: {0}")]
    SensorNotFound(String),

    #[error("Error in config {}: {detail}", path.display())]
    Config { path: PathBuf, detail: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TdtoolError {
    /// Error code string for structured reporting.
    pub fn code(&self) -> &'static str {
        match self {
            TdtoolError::Signing(_) => "signing_error",
            TdtoolError::AuthExchange { .. } => "auth_exchange_error",
            TdtoolError::NotAuthenticated => "not_authenticated",
            TdtoolError::Transport { .. } => "transport_error",
            TdtoolError::RemoteOperation(_) => "remote_operation_error",
            TdtoolError::SensorNotFound(_) => "sensor_not_found",
            TdtoolError::Config { .. } => "config_error",
            TdtoolError::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_signing() {
        let err = TdtoolError::Signing("consumer key is empty".into());
        assert_eq!(err.to_string(), "Signing failed: consumer key is empty");
    }

    #[test]
    fn display_auth_exchange_carries_raw_body() {
        let err = TdtoolError::AuthExchange {
            body: "oauth_problem=token_rejected".into(),
        };
        assert_eq!(
            err.to_string(),
            "Error retrieving access token, the server replied:\noauth_problem=token_rejected"
        );
    }

    #[test]
    fn display_transport() {
        let err = TdtoolError::Transport {
            operation: "devices/list".into(),
            source: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Request to devices/list failed: connection refused"
        );
    }

    #[test]
    fn display_config() {
        let err = TdtoolError::Config {
            path: PathBuf::from("/home/user/.config/Telldus/tdtool.conf"),
            detail: "invalid TOML".into(),
        };
        assert_eq!(
            err.to_string(),
            "Error in config /home/user/.config/Telldus/tdtool.conf: invalid TOML"
        );
    }

    #[test]
    fn code_mapping_all_variants() {
        assert_eq!(TdtoolError::Signing("e".into()).code(), "signing_error");
        assert_eq!(
            TdtoolError::AuthExchange { body: "b".into() }.code(),
            "auth_exchange_error"
        );
        assert_eq!(TdtoolError::NotAuthenticated.code(), "not_authenticated");
        assert_eq!(
            TdtoolError::Transport {
                operation: "op".into(),
                source: "e".into()
            }
            .code(),
            "transport_error"
        );
        assert_eq!(
            TdtoolError::RemoteOperation("e".into()).code(),
            "remote_operation_error"
        );
        assert_eq!(
            TdtoolError::SensorNotFound("e".into()).code(),
            "sensor_not_found"
        );
        assert_eq!(
            TdtoolError::Config {
                path: PathBuf::from("/a"),
                detail: "d".into()
            }
            .code(),
            "config_error"
        );
        let io_err = std::io::Error::other("test");
        assert_eq!(TdtoolError::Io(io_err).code(), "io_error");
    }

    #[test]
    fn remote_operation_is_verbatim() {
        let err = TdtoolError::RemoteOperation("Invalid token".into());
        assert_eq!(err.to_string(), "Invalid token");
    }
}
