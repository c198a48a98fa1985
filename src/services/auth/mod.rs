pub mod gate;
pub mod token_service;

pub use gate::{AuthDenied, Authenticator, JwtAuthenticator, Principal};
pub use token_service::TokenService;
