//! Carnet Auth Core - Authentication business logic
//!
//! Core authentication functionality: password hashing, the access/refresh
//! token codec, verification-code lifecycle, and the auth service that
//! orchestrates registration, login, refresh, email verification, and
//! per-request identity resolution.

pub mod avatar;
pub mod config;
pub mod error;
pub mod mailer;
pub mod password;
pub mod service;
pub mod token;
pub mod verification;

pub use avatar::{AvatarStore, AvatarStoreError, HttpAvatarStore};
pub use config::AuthConfig;
pub use error::AuthError;
pub use mailer::{MailError, Mailer, SmtpMailer, SmtpSettings};
pub use service::{AuthService, RegisteredUser, TokenPair, ALLOWED_IMAGE_TYPES};
pub use token::TokenCodec;
