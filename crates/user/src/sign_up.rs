use std::sync::LazyLock;

use larder_shared::Error;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::{User, password, repository};

static RE_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

#[derive(Validate, Deserialize, Default)]
pub struct SignUpInput {
    #[serde(default)]
    #[validate(length(max = 50), regex(path = *RE_USERNAME, message = "Only letters, numbers, '_', '.' and '-' are allowed."))]
    pub username: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub password: String,
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn sign_up(&self, input: SignUpInput) -> larder_shared::Result<User> {
        if input.username.is_empty() || input.password.is_empty() {
            larder_shared::invalid!(MissingRequiredFields, "Username and password are required");
        }

        input.validate()?;

        let password = password::hash_password(&input.password)?;
        let id = uuid::Uuid::new_v4().to_string();

        repository::create(
            &self.write_db,
            repository::CreateInput {
                id: id.to_owned(),
                username: input.username.to_owned(),
                display_name: input.display_name.to_owned(),
                bio: input.bio.to_owned(),
                password,
            },
        )
        .await
        .map_err(|e| match e {
            Error::Conflict(_) => Error::Conflict("Username already exists".to_owned()),
            e => e,
        })?;

        tracing::info!(%id, "user signed up");

        Ok(User {
            id,
            username: input.username,
            display_name: input.display_name,
            bio: input.bio,
        })
    }
}
