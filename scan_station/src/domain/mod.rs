// Domain layer: tokens, outcomes and the display model.

pub mod gate;
pub mod ports;
pub mod status;
pub mod verification;

pub use gate::GateState;
pub use ports::{QrRenderer, StatusDisplay, TokenVerifier};
pub use status::{StatusClass, StatusPanel, StatusView};
pub use verification::{Token, UserInfo, VerificationOutcome, VerifyResponse, classify};
