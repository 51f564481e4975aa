mod session;
mod traits;
mod trusted_header;
mod types;

pub use session::*;
pub use traits::*;
pub use trusted_header::*;
pub use types::*;

use std::sync::Arc;

use crate::account::SessionStore;
use crate::config::AuthConfig;

/// Factory function to create authenticator from config
pub fn create_authenticator(
    config: &AuthConfig,
    sessions: Arc<dyn SessionStore>,
) -> Result<Box<dyn Authenticator>, AuthError> {
    use crate::config::AuthMethod;

    match config.method {
        AuthMethod::Session => Ok(Box::new(SessionAuthenticator::new(sessions))),
        AuthMethod::TrustedHeader => {
            let header = config
                .header
                .clone()
                .filter(|h| !h.trim().is_empty())
                .ok_or_else(|| {
                    AuthError::ConfigurationError(
                        "header must be set when using trusted_header auth method".to_string(),
                    )
                })?;
            Ok(Box::new(TrustedHeaderAuthenticator::new(header)))
        }
    }
}
