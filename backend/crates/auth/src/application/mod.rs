//! Application Layer
//!
//! Use cases and application services.

pub mod admin_users;
pub mod config;
pub mod log_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use admin_users::AdminUsersUseCase;
pub use config::AuthConfig;
pub use log_in::{LogInInput, LogInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token::{AuthOutput, Claims, Principal, TokenIssuer};
