pub mod password;
pub mod token;

mod repository;
mod sign_in;
mod sign_up;

use std::ops::Deref;

use serde::Serialize;

pub use sign_in::{SignInInput, SignedIn};
pub use sign_up::SignUpInput;

#[derive(Clone)]
pub struct Command {
    state: larder_shared::State,
    keys: token::Keys,
}

impl Deref for Command {
    type Target = larder_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

/// Public view of an account. Never carries the password hash.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl From<repository::UserRow> for User {
    fn from(row: repository::UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            display_name: row.display_name,
            bio: row.bio,
        }
    }
}

impl Command {
    pub fn new(state: larder_shared::State, keys: token::Keys) -> Self {
        Self { state, keys }
    }

    pub async fn find(&self, id: impl Into<String>) -> larder_shared::Result<Option<User>> {
        let row = repository::find(&self.read_db, repository::FindType::Id(id.into())).await?;

        Ok(row.map(User::from))
    }

    /// Resolves a bearer token to an active account.
    pub async fn authenticate(&self, token: &str) -> larder_shared::Result<User> {
        let claims = self.keys.verify(token)?;

        match self.find(claims.hasura.user_id).await? {
            Some(user) => Ok(user),
            None => Err(larder_shared::Error::Unauthorized(
                "Unauthorized: Unknown user".to_owned(),
            )),
        }
    }
}
