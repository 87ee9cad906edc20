//! Process-wide services: token signing, credential checks, event fan-out

pub mod credentials;
pub mod events;
pub mod tokens;

pub use credentials::{CredentialVerifier, SharedSecretVerifier};
pub use events::{ChannelHandle, EventBus};
pub use tokens::{Claims, TokenService};
