//! A single validator onboarding flow: secret intake, operator selection, payload building and
//! submission, with all per-flow state owned by one [`RegistrationSession`].

pub use config::{Config, ConfigBuilder};
pub use error::{ConfigBuilderError, SessionError};
pub use keystore::{KeystoreDecoder, KeystoreError};
pub use session::{RegistrationSession, SharedSession};

pub mod config;
mod error;
mod keystore;
mod session;
