pub mod api;
pub mod cli;
pub mod credentials;
pub mod devices;
pub mod error;
pub mod oauth;

pub use api::{ApiClient, ParamValue, DEFAULT_BASE_URL};
pub use credentials::{AuthState, Credentials};
pub use devices::{DeviceMethod, SensorCapability};
pub use error::TdtoolError;
pub use oauth::{exchange_access_token, request_temporary_token, sign_request, SignedRequest};
