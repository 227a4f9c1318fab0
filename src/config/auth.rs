//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::adapters::auth::JwtConfig;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest HS256 secret accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

const MAX_LEEWAY_SECS: u64 = 300;

/// Bearer token settings (HS256 shared secret).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Signing secret shared with the identity service
    pub jwt_secret: SecretString,

    /// Expected `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Expected `aud` claim, if tokens carry one
    #[serde(default)]
    pub audience: Option<String>,

    /// Clock skew tolerated on `exp`
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
            leeway_secs: self.leeway_secs,
        }
    }

    /// Validate authentication configuration
    ///
    /// Production refuses secrets shorter than
    /// [`MIN_PRODUCTION_SECRET_BYTES`].
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(
                MIN_PRODUCTION_SECRET_BYTES,
            ));
        }
        if self.leeway_secs > MAX_LEEWAY_SECS {
            return Err(ValidationError::LeewayTooLarge(MAX_LEEWAY_SECS));
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "conference-scheduler".to_string()
}

fn default_leeway() -> u64 {
    30
}
