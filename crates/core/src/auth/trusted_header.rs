//! Trusted-header authentication for deployments behind an authenticating proxy.

use async_trait::async_trait;

use super::{AuthError, AuthRequest, Authenticator, Identity};

/// Takes the caller's email verbatim from a header set by a fronting proxy.
///
/// Only safe when the proxy strips this header from inbound client requests.
pub struct TrustedHeaderAuthenticator {
    header: String,
}

impl TrustedHeaderAuthenticator {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into().to_ascii_lowercase(),
        }
    }
}

#[async_trait]
impl Authenticator for TrustedHeaderAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        let email = request
            .header(&self.header)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::NotAuthenticated)?;

        Ok(Identity::new(email, self.method_name()))
    }

    fn method_name(&self) -> &'static str {
        "trusted_header"
    }
}
