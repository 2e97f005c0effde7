pub mod verify;

pub use verify::{VerifierCredentials, VerifyClient, VerifyClientError};
