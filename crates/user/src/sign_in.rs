use larder_shared::Error;
use serde::{Deserialize, Serialize};

use crate::{User, password, repository};

#[derive(Deserialize, Default)]
pub struct SignInInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct SignedIn {
    pub token: String,
    pub user: User,
}

fn invalid_credentials() -> Error {
    Error::Unauthorized("Invalid username or password".to_owned())
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn sign_in(&self, input: SignInInput) -> larder_shared::Result<SignedIn> {
        if input.username.is_empty() || input.password.is_empty() {
            larder_shared::invalid!(MissingRequiredFields, "Username and password are required");
        }

        let Some(row) = repository::find(
            &self.read_db,
            repository::FindType::Username(input.username.to_owned()),
        )
        .await?
        else {
            return Err(invalid_credentials());
        };

        if !password::verify_password(&input.password, &row.password)? {
            return Err(invalid_credentials());
        }

        let token = self.keys.issue(&row.id)?;

        Ok(SignedIn {
            token,
            user: row.into(),
        })
    }
}
