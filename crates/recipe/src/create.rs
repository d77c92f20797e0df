use crate::{Recipe, RecipeInput, classify, repository};

impl super::Command {
    /// Inserts the header and every child row in one transaction.
    #[tracing::instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(
        &self,
        session_user_id: &str,
        input: RecipeInput,
    ) -> larder_shared::Result<Recipe> {
        input.validate(session_user_id)?;

        let id = uuid::Uuid::new_v4().to_string();
        let mut tx = self.write_db.begin().await?;

        repository::insert(&mut tx, &id, session_user_id, &input)
            .await
            .map_err(classify)?;
        repository::insert_children(&mut tx, &id, &input)
            .await
            .map_err(classify)?;

        let Some(row) = repository::find(&mut tx, &id).await? else {
            larder_shared::bail!("recipe {id} vanished inside its own transaction");
        };

        tx.commit().await?;

        tracing::info!(%id, "recipe created");

        row.try_into()
    }
}
