use crate::{AuthError, Claims, JwtAlgorithm, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

/// Clock skew tolerated on exp/nbf, in seconds
const LEEWAY_SECONDS: u64 = 30;

/// Session-token verifier over the identity provider's signing key.
///
/// The key material arrives as a [`JwtAlgorithm`], so deployment config
/// picks between the shared-secret and public-key setups and this type
/// only decodes.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    #[track_caller]
    pub fn new(algorithm: &JwtAlgorithm) -> AuthErrorResult<Self> {
        let (decoding_key, algorithm) = match algorithm {
            JwtAlgorithm::HS256 { secret } => (DecodingKey::from_secret(secret), Algorithm::HS256),
            JwtAlgorithm::RS256 { public_key_pem } => {
                let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
                    AuthError::InvalidToken {
                        message: format!("Invalid RSA public key: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?;
                (key, Algorithm::RS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = LEEWAY_SECONDS;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify a session token's signature and time claims, then the
    /// portal-specific claim shape
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::JwtDecode {
                        source: e,
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }
}
