pub mod auth;
pub mod services;

pub use auth::{AuthTokens, Claims, TokenKind};
