use axum::{
    Json,
    body::Body,
    extract::{
        Multipart, Path, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{
        StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use larder_recipe::{Picture, PictureFile, UploadPicture};
use larder_shared::Invalid;
use object_store::PutPayload;

use crate::{auth::AuthUser, error::AppError, routes::AppState};

fn invalid_form(message: impl std::fmt::Display) -> AppError {
    AppError::invalid(Invalid::InvalidForm, format!("Failed to parse form: {message}"))
}

fn read_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::invalid(Invalid::FileTooLarge, "File size exceeds 5MB");
    }

    invalid_form(e.body_text())
}

async fn read_form(mut multipart: Multipart) -> Result<UploadPicture, AppError> {
    let mut upload = UploadPicture::default();

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        match field.name() {
            Some("recipe_id") => {
                upload.recipe_id = Some(field.text().await.map_err(read_error)?);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let data = field.bytes().await.map_err(read_error)?;
                upload.file = Some(PictureFile {
                    file_name,
                    data: PutPayload::from(data),
                });
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// POST /api/recipe/upload_picture
pub async fn upload(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Picture>, AppError> {
    let multipart = multipart.map_err(|e| invalid_form(e.body_text()))?;
    let upload = read_form(multipart).await?;
    let picture = state.recipe_command.upload_picture(&user.id, upload).await?;

    Ok(Json(picture))
}

/// GET /api/recipe/picture/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let opened = state.recipe_command.open_picture(&id).await?;
    let content_type = mime_guess::from_path(&opened.picture.path).first_or_octet_stream();

    Ok((
        [
            (CONTENT_TYPE, content_type.to_string()),
            (CACHE_CONTROL, "max-age=31536000".to_owned()),
        ],
        Body::from_stream(opened.body.into_stream()),
    )
        .into_response())
}
