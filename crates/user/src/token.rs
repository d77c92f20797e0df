use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

pub const HASURA_NAMESPACE: &str = "https://hasura.io/jwt/claims";
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HasuraClaims {
    #[serde(rename = "x-hasura-user-id")]
    pub user_id: String,
    #[serde(rename = "x-hasura-default-role")]
    pub default_role: String,
    #[serde(rename = "x-hasura-allowed-roles")]
    pub allowed_roles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user_id: String,
    #[serde(rename = "https://hasura.io/jwt/claims")]
    pub hasura: HasuraClaims,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing material plus the lifetime of issued tokens.
#[derive(Clone)]
pub struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl Keys {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    pub fn issue(&self, user_id: &str) -> larder_shared::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            user_id: user_id.to_owned(),
            hasura: HasuraClaims {
                user_id: user_id.to_owned(),
                default_role: DEFAULT_ROLE.to_owned(),
                allowed_roles: vec![DEFAULT_ROLE.to_owned()],
            },
            iat: now.unix_timestamp(),
            exp: (now + self.lifetime).unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| larder_shared::Error::Server(format!("failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> larder_shared::Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected session token");
                larder_shared::Error::Unauthorized("Unauthorized: Invalid token".to_owned())
            })
    }
}
