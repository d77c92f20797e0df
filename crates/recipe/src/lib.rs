mod create;
mod delete;
mod input;
mod picture;
mod query;
mod repository;
mod update;

use std::{ops::Deref, sync::Arc};

use larder_shared::Error;
use object_store::ObjectStore;
use serde::Serialize;

pub use input::*;
pub use picture::{
    ALLOWED_EXTENSIONS, MAX_PICTURE_SIZE, OpenedPicture, Picture, PictureFile, UploadPicture,
    validate_picture,
};
pub use query::{Ingredient, RecipeDetail, Step};

#[derive(Clone)]
pub struct Command {
    state: larder_shared::State,
    store: Arc<dyn ObjectStore>,
}

impl Deref for Command {
    type Target = larder_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: larder_shared::State, store: Arc<dyn ObjectStore>) -> Self {
        Self { state, store }
    }
}

/// Header returned after a recipe write.
#[derive(Serialize, Debug, Clone)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub creator_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<repository::RecipeRow> for Recipe {
    type Error = Error;

    fn try_from(row: repository::RecipeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: larder_shared::to_rfc3339(row.created_at)?,
            updated_at: larder_shared::to_rfc3339(row.updated_at)?,
            id: row.id,
            title: row.title,
            creator_id: row.creator_id,
        })
    }
}

pub(crate) fn not_owned() -> Error {
    Error::Forbidden("Recipe not found or not owned by user".to_owned())
}

/// Store-level reference failures on recipe writes all point at the catalogs.
pub(crate) fn classify(err: Error) -> Error {
    match err {
        Error::Reference(_) => Error::Reference(
            "Invalid reference: Category, ingredient, or tag does not exist".to_owned(),
        ),
        err => err,
    }
}
