mod auth;
mod credentials;
mod pending;

pub use auth::TokenManager;
pub use credentials::CredentialStore;
pub use credentials::REFRESH_TOKEN_KEY;
pub use pending::PendingFlow;
