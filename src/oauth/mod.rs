pub mod flow;
pub mod signer;

pub use flow::{exchange_access_token, request_temporary_token};
pub use signer::{sign_request, SignedRequest};
