use crate::{Recipe, UpdateRecipeInput, classify, not_owned, repository};

impl super::Command {
    /// Replaces the header and the full child set. The ownership check runs inside the
    /// transaction, so a failed check or any later write leaves the previous rows intact.
    #[tracing::instrument(skip(self, input), fields(id = %input.id))]
    pub async fn update(
        &self,
        session_user_id: &str,
        input: UpdateRecipeInput,
    ) -> larder_shared::Result<Recipe> {
        input.validate(session_user_id)?;

        let mut tx = self.write_db.begin().await?;

        match repository::find_creator(&mut tx, &input.id).await? {
            Some(creator_id) if creator_id == session_user_id => {}
            _ => return Err(not_owned()),
        }

        repository::update_header(&mut tx, &input.id, &input.recipe)
            .await
            .map_err(classify)?;
        repository::delete_children(&mut tx, &input.id).await?;
        repository::insert_children(&mut tx, &input.id, &input.recipe)
            .await
            .map_err(classify)?;

        let Some(row) = repository::find(&mut tx, &input.id).await? else {
            larder_shared::bail!("recipe {} vanished inside its own transaction", input.id);
        };

        tx.commit().await?;

        tracing::info!("recipe updated");

        row.try_into()
    }
}
