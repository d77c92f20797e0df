use larder_shared::{Error, Invalid, invalid};
use object_store::{GetResult, PutPayload, path::Path};
use serde::Serialize;
use uuid::Uuid;

use crate::repository::{self, PictureRow};

pub const MAX_PICTURE_SIZE: usize = 5 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

#[derive(Debug)]
pub struct PictureFile {
    pub file_name: String,
    pub data: PutPayload,
}

/// Fields of the upload form, as received.
#[derive(Default, Debug)]
pub struct UploadPicture {
    pub recipe_id: Option<String>,
    pub file: Option<PictureFile>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Picture {
    pub id: String,
    pub recipe_id: String,
    pub path: String,
    pub created_at: String,
}

impl TryFrom<PictureRow> for Picture {
    type Error = Error;

    fn try_from(row: PictureRow) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: larder_shared::to_rfc3339(row.created_at)?,
            id: row.id,
            recipe_id: row.recipe_id,
            path: row.path,
        })
    }
}

pub struct OpenedPicture {
    pub picture: Picture,
    pub body: GetResult,
}

/// Size and extension checks. Returns the lower-cased extension with its leading dot.
pub fn validate_picture(file_name: &str, size: usize) -> larder_shared::Result<&'static str> {
    if size > MAX_PICTURE_SIZE {
        invalid!(FileTooLarge, "File size exceeds 5MB");
    }

    // Everything from the last dot of the final component, so ".png" counts as a png.
    let base = file_name.rsplit('/').next().unwrap_or(file_name);
    let extension = base.rfind('.').map(|dot| base[dot..].to_lowercase());

    match extension
        .as_deref()
        .and_then(|ext| ALLOWED_EXTENSIONS.iter().copied().find(|allowed| *allowed == ext))
    {
        Some(ext) => Ok(ext),
        None => invalid!(InvalidFileType, "Only JPG and PNG files are allowed"),
    }
}

impl UploadPicture {
    fn validate(self) -> larder_shared::Result<(String, PictureFile, &'static str)> {
        let recipe_id = match self.recipe_id {
            Some(id) if !id.is_empty() => id,
            _ => invalid!(MissingRecipeId, "Recipe ID is required"),
        };

        if Uuid::parse_str(&recipe_id).is_err() {
            invalid!(InvalidRecipeId, "Invalid recipe ID");
        }

        let Some(file) = self.file else {
            invalid!(InvalidFile, "Failed to get file");
        };

        let extension = validate_picture(&file.file_name, file.data.content_length())?;

        Ok((recipe_id, file, extension))
    }
}

impl super::Command {
    /// Every check runs before the object store is touched. A row that cannot be saved
    /// takes its stored object with it.
    #[tracing::instrument(skip_all, fields(user_id = %session_user_id))]
    pub async fn upload_picture(
        &self,
        session_user_id: &str,
        upload: UploadPicture,
    ) -> larder_shared::Result<Picture> {
        let (recipe_id, file, extension) = upload.validate()?;

        let mut conn = self.read_db.acquire().await?;
        match repository::find_creator(&mut conn, &recipe_id).await? {
            Some(creator_id) if creator_id == session_user_id => {}
            _ => {
                return Err(Error::Forbidden(
                    "Recipe does not exist or not owned by user".to_owned(),
                ));
            }
        }
        drop(conn);

        let id = Uuid::new_v4().to_string();
        let path = format!("recipe/{recipe_id}/{id}{extension}");
        let location = Path::from(path.as_str());

        if let Err(e) = self.store.put(&location, file.data).await {
            tracing::error!(error = %e, %path, "failed to store picture");
            return Err(Error::Internal("UPLOAD_FAILED", "Failed to upload file".to_owned()));
        }

        let row = PictureRow {
            id,
            recipe_id,
            path,
            created_at: larder_shared::now(),
        };

        if let Err(err) = repository::insert_picture(&self.write_db, &row).await {
            if let Err(e) = self.store.delete(&location).await {
                tracing::warn!(error = %e, path = %row.path, "failed to remove orphaned picture");
            }

            return Err(match err {
                Error::Reference(_) => Error::Invalid(
                    Invalid::InvalidRecipe,
                    "Recipe does not exist or not owned by user".to_owned(),
                ),
                err if err.is_internal() => {
                    tracing::error!(error = %err, "failed to save picture");
                    Error::Internal("DB_ERROR", "Failed to save picture".to_owned())
                }
                err => err,
            });
        }

        tracing::info!(id = %row.id, "picture uploaded");

        row.try_into()
    }

    pub async fn open_picture(&self, id: &str) -> larder_shared::Result<OpenedPicture> {
        if Uuid::parse_str(id).is_err() {
            invalid!(InvalidId, "Invalid picture ID");
        }

        let Some(row) = repository::find_picture(&self.read_db, id).await? else {
            return Err(Error::NotFound("Picture not found".to_owned()));
        };

        let body = match self.store.get(&Path::from(row.path.as_str())).await {
            Ok(body) => body,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(Error::NotFound("Picture not found".to_owned()));
            }
            Err(e) => {
                tracing::error!(error = %e, path = %row.path, "failed to read picture");
                return Err(Error::Internal(
                    "STORAGE_ERROR",
                    "Failed to retrieve picture".to_owned(),
                ));
            }
        };

        Ok(OpenedPicture {
            picture: row.try_into()?,
            body,
        })
    }
}
