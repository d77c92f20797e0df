use serde::Serialize;

use crate::repository;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub ingredient_id: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Step {
    pub index: i64,
    pub description: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub category_id: String,
    pub creator_id: String,
    pub preparation_time: i64,
    pub average_rating: f64,
    pub rating_count: i64,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl super::Command {
    /// Active recipe with its children; steps ordered by index, ingredients and tags by id.
    pub async fn find(&self, id: &str) -> larder_shared::Result<Option<RecipeDetail>> {
        let mut conn = self.read_db.acquire().await?;
        let Some(row) = repository::find(&mut conn, id).await? else {
            return Ok(None);
        };
        drop(conn);

        let ingredients = repository::find_ingredients(&self.read_db, id)
            .await?
            .into_iter()
            .map(|i| Ingredient {
                ingredient_id: i.ingredient_id,
                quantity: i.quantity,
                unit: i.unit,
            })
            .collect();

        let steps = repository::find_steps(&self.read_db, id)
            .await?
            .into_iter()
            .map(|s| Step {
                index: s.idx,
                description: s.description,
            })
            .collect();

        let tags = repository::find_tags(&self.read_db, id).await?;

        Ok(Some(RecipeDetail {
            created_at: larder_shared::to_rfc3339(row.created_at)?,
            updated_at: larder_shared::to_rfc3339(row.updated_at)?,
            id: row.id,
            title: row.title,
            category_id: row.category_id,
            creator_id: row.creator_id,
            preparation_time: row.preparation_time,
            average_rating: row.average_rating,
            rating_count: row.rating_count,
            ingredients,
            steps,
            tags,
        }))
    }
}
