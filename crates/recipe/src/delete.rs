use crate::{DeleteRecipeInput, not_owned, repository};

impl super::Command {
    /// Tombstones the recipe. Child rows stay in place but are unreachable.
    #[tracing::instrument(skip(self, input), fields(id = %input.id))]
    pub async fn delete(
        &self,
        session_user_id: &str,
        input: DeleteRecipeInput,
    ) -> larder_shared::Result<()> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;

        match repository::find_creator(&mut tx, &input.id).await? {
            Some(creator_id) if creator_id == session_user_id => {}
            _ => return Err(not_owned()),
        }

        repository::mark_deleted(&mut tx, &input.id).await?;
        tx.commit().await?;

        tracing::info!("recipe deleted");

        Ok(())
    }
}
