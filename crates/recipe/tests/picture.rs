use std::{fmt, sync::Arc};

use futures::{TryStreamExt, stream::BoxStream};
use larder_recipe::{DeleteRecipeInput, PictureFile, UploadPicture};
use larder_shared::State;
use object_store::{
    GetOptions, GetResult, ListResult, MultipartUpload, ObjectMeta, ObjectStore, PutMultipartOpts,
    PutOptions, PutPayload, PutResult, memory::InMemory, path::Path,
};
use sqlx::SqlitePool;
use temp_dir::TempDir;

mod helpers;

/// In-memory store whose writes or reads can be switched to fail.
#[derive(Debug, Default)]
struct FaultyStore {
    inner: InMemory,
    fail_put: bool,
    fail_get: bool,
}

impl FaultyStore {
    fn error() -> object_store::Error {
        object_store::Error::Generic {
            store: "faulty",
            source: "backend unavailable".into(),
        }
    }
}

impl fmt::Display for FaultyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FaultyStore")
    }
}

#[async_trait::async_trait]
impl ObjectStore for FaultyStore {
    async fn put_opts(
        &self,
        location: &Path,
        payload: PutPayload,
        opts: PutOptions,
    ) -> object_store::Result<PutResult> {
        if self.fail_put {
            return Err(Self::error());
        }

        self.inner.put_opts(location, payload, opts).await
    }

    async fn put_multipart_opts(
        &self,
        location: &Path,
        opts: PutMultipartOpts,
    ) -> object_store::Result<Box<dyn MultipartUpload>> {
        self.inner.put_multipart_opts(location, opts).await
    }

    async fn get_opts(
        &self,
        location: &Path,
        options: GetOptions,
    ) -> object_store::Result<GetResult> {
        if self.fail_get {
            return Err(Self::error());
        }

        self.inner.get_opts(location, options).await
    }

    async fn delete(&self, location: &Path) -> object_store::Result<()> {
        self.inner.delete(location).await
    }

    fn list(
        &self,
        prefix: Option<&Path>,
    ) -> BoxStream<'static, object_store::Result<ObjectMeta>> {
        self.inner.list(prefix)
    }

    async fn list_with_delimiter(
        &self,
        prefix: Option<&Path>,
    ) -> object_store::Result<ListResult> {
        self.inner.list_with_delimiter(prefix).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> object_store::Result<()> {
        self.inner.copy(from, to).await
    }

    async fn copy_if_not_exists(&self, from: &Path, to: &Path) -> object_store::Result<()> {
        self.inner.copy_if_not_exists(from, to).await
    }
}

fn upload(recipe_id: &str, file_name: &str, data: Vec<u8>) -> UploadPicture {
    UploadPicture {
        recipe_id: Some(recipe_id.to_owned()),
        file: Some(PictureFile {
            file_name: file_name.to_owned(),
            data: PutPayload::from(data),
        }),
    }
}

async fn stored_objects(state: &helpers::TestState) -> anyhow::Result<usize> {
    let objects = state.store.list(None).try_collect::<Vec<_>>().await?;

    Ok(objects.len())
}

#[tokio::test]
async fn upload_then_open() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let recipe = state.command.create(&john, helpers::pancakes()).await?;

    let picture = state
        .command
        .upload_picture(&john, upload(&recipe.id, "photo.JPG", b"fake jpeg".to_vec()))
        .await?;

    assert_eq!(picture.recipe_id, recipe.id);
    assert_eq!(
        picture.path,
        format!("recipe/{}/{}.jpg", recipe.id, picture.id)
    );
    assert_eq!(helpers::count(&state, "recipe_picture").await?, 1);

    let opened = state.command.open_picture(&picture.id).await?;
    assert_eq!(opened.picture.path, picture.path);
    assert_eq!(opened.body.bytes().await?.as_ref(), b"fake jpeg");

    Ok(())
}

#[tokio::test]
async fn oversized_and_wrong_type_never_reach_the_store() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let recipe = state.command.create(&john, helpers::pancakes()).await?;

    let err = state
        .command
        .upload_picture(&john, upload(&recipe.id, "big.png", vec![0; 6 * 1024 * 1024]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FILE_TOO_LARGE");

    let err = state
        .command
        .upload_picture(&john, upload(&recipe.id, "anim.gif", vec![0; 16]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_FILE_TYPE");

    assert_eq!(stored_objects(&state).await?, 0);
    assert_eq!(helpers::count(&state, "recipe_picture").await?, 0);

    Ok(())
}

#[tokio::test]
async fn only_the_creator_may_upload() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;
    let recipe = state.command.create(&john, helpers::pancakes()).await?;

    let err = state
        .command
        .upload_picture(&jane, upload(&recipe.id, "photo.png", vec![1; 16]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");
    assert_eq!(stored_objects(&state).await?, 0);

    Ok(())
}

#[tokio::test]
async fn open_picture_errors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let recipe = state.command.create(&john, helpers::pancakes()).await?;
    let picture = state
        .command
        .upload_picture(&john, upload(&recipe.id, "photo.png", vec![1; 16]))
        .await?;

    let err = state.command.open_picture("nope").await.err().unwrap();
    assert_eq!(err.code(), "INVALID_ID");

    let err = state
        .command
        .open_picture(&uuid::Uuid::new_v4().to_string())
        .await
        .err()
        .unwrap();
    assert_eq!(err.code(), "NOT_FOUND");

    state
        .command
        .delete(
            &john,
            DeleteRecipeInput {
                id: recipe.id.to_owned(),
            },
        )
        .await?;
    let err = state.command.open_picture(&picture.id).await.err().unwrap();
    assert_eq!(err.code(), "NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn deleted_recipe_cannot_receive_pictures() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let recipe = state.command.create(&john, helpers::pancakes()).await?;

    state
        .command
        .delete(
            &john,
            DeleteRecipeInput {
                id: recipe.id.to_owned(),
            },
        )
        .await?;

    let err = state
        .command
        .upload_picture(&john, upload(&recipe.id, "photo.png", vec![1; 16]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");
    assert_eq!(stored_objects(&state).await?, 0);
    assert_eq!(helpers::count(&state, "recipe_picture").await?, 0);

    Ok(())
}

#[tokio::test]
async fn failed_row_insert_removes_the_stored_object() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path.clone()).await?;
    let john = helpers::create_user(&state, "john").await?;
    let recipe = state.command.create(&john, helpers::pancakes()).await?;

    let closed = SqlitePool::connect(&format!("sqlite:{}", path.display())).await?;
    closed.close().await;
    let command = larder_recipe::Command::new(
        State {
            read_db: state.state.read_db.clone(),
            write_db: closed,
        },
        state.store.clone(),
    );

    let err = command
        .upload_picture(&john, upload(&recipe.id, "photo.png", vec![1; 16]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DB_ERROR");
    assert_eq!(stored_objects(&state).await?, 0);
    assert_eq!(helpers::count(&state, "recipe_picture").await?, 0);

    Ok(())
}

#[tokio::test]
async fn store_write_failure_is_upload_failed() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let recipe = state.command.create(&john, helpers::pancakes()).await?;

    let command = larder_recipe::Command::new(
        state.state.clone(),
        Arc::new(FaultyStore {
            fail_put: true,
            ..Default::default()
        }),
    );

    let err = command
        .upload_picture(&john, upload(&recipe.id, "photo.png", vec![1; 16]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "UPLOAD_FAILED");
    assert_eq!(helpers::count(&state, "recipe_picture").await?, 0);

    Ok(())
}

#[tokio::test]
async fn store_read_failures() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let john = helpers::create_user(&state, "john").await?;
    let recipe = state.command.create(&john, helpers::pancakes()).await?;

    let store = Arc::new(FaultyStore::default());
    let command = larder_recipe::Command::new(state.state.clone(), store.clone());
    let picture = command
        .upload_picture(&john, upload(&recipe.id, "photo.png", vec![1; 16]))
        .await?;

    let unreadable = larder_recipe::Command::new(
        state.state.clone(),
        Arc::new(FaultyStore {
            fail_get: true,
            ..Default::default()
        }),
    );
    let err = unreadable.open_picture(&picture.id).await.err().unwrap();
    assert_eq!(err.code(), "STORAGE_ERROR");

    store.delete(&Path::from(picture.path.as_str())).await?;
    let err = command.open_picture(&picture.id).await.err().unwrap();
    assert_eq!(err.code(), "NOT_FOUND");

    Ok(())
}
