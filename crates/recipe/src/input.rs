use std::collections::HashSet;

use larder_shared::{Error, invalid};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct IngredientInput {
    #[serde(default)]
    pub ingredient_id: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Validate, Deserialize, Clone, Debug, Default)]
pub struct StepInput {
    #[serde(default)]
    pub index: i64,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct TagInput {
    #[serde(default)]
    pub tag_id: String,
}

/// Recipe header plus its three child collections, as sent by the `createRecipe` action.
#[derive(Validate, Deserialize, Clone, Debug, Default)]
pub struct RecipeInput {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub title: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub preparation_time: i64,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    #[serde(default)]
    #[validate(nested)]
    pub steps: Vec<StepInput>,
    #[serde(default)]
    pub tags: Vec<TagInput>,
    /// Optional. When present it must name the caller.
    #[serde(default)]
    pub creator_id: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct UpdateRecipeInput {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub recipe: RecipeInput,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct DeleteRecipeInput {
    #[serde(default)]
    pub id: String,
}

fn is_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

impl RecipeInput {
    /// Checks run before anything touches the database, in a fixed order so the first
    /// failing rule decides the error code.
    pub fn validate(&self, session_user_id: &str) -> larder_shared::Result<()> {
        self.validate_fields()?;
        self.check_creator(session_user_id)
    }

    fn validate_fields(&self) -> larder_shared::Result<()> {
        if self.title.trim().is_empty() || self.category_id.is_empty() || self.steps.is_empty()
        {
            invalid!(
                MissingRequiredFields,
                "Title, category_id, and at least one step are required"
            );
        }

        if !is_uuid(&self.category_id) {
            invalid!(InvalidUuid, "Invalid category_id: must be a valid UUID");
        }

        for (i, ingredient) in self.ingredients.iter().enumerate() {
            if !is_uuid(&ingredient.ingredient_id) {
                invalid!(
                    InvalidUuid,
                    "Invalid ingredient_id at index {i}: must be a valid UUID"
                );
            }

            if ingredient.quantity <= 0.0
                || !ingredient.quantity.is_finite()
                || ingredient.unit.trim().is_empty()
            {
                invalid!(
                    InvalidIngredient,
                    "Invalid quantity or unit at ingredient index {i}"
                );
            }
        }

        let mut indices = HashSet::with_capacity(self.steps.len());
        for (i, step) in self.steps.iter().enumerate() {
            if step.index < 1 || step.description.trim().is_empty() {
                invalid!(
                    InvalidStep,
                    "Invalid step at index {i}: index must be positive and description non-empty"
                );
            }

            if !indices.insert(step.index) {
                invalid!(DuplicateStepIndex, "Duplicate step index: {}", step.index);
            }
        }

        for (i, tag) in self.tags.iter().enumerate() {
            if !is_uuid(&tag.tag_id) {
                invalid!(InvalidUuid, "Invalid tag_id at index {i}: must be a valid UUID");
            }
        }

        Validate::validate(self)?;

        Ok(())
    }

    fn check_creator(&self, session_user_id: &str) -> larder_shared::Result<()> {
        match self.creator_id.as_deref() {
            Some(creator_id) if creator_id != session_user_id => Err(Error::ForbiddenCreator),
            _ => Ok(()),
        }
    }

    /// Lower-cased title and step descriptions, stored for full-text lookups.
    pub(crate) fn search_text(&self) -> String {
        std::iter::once(self.title.trim())
            .chain(self.steps.iter().map(|s| s.description.trim()))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

impl UpdateRecipeInput {
    pub fn validate(&self, session_user_id: &str) -> larder_shared::Result<()> {
        self.recipe.validate_fields()?;

        if self.id.is_empty() {
            invalid!(MissingRequiredFields, "Recipe id is required");
        }

        if !is_uuid(&self.id) {
            invalid!(InvalidUuid, "Invalid id: must be a valid UUID");
        }

        self.recipe.check_creator(session_user_id)
    }
}

impl DeleteRecipeInput {
    pub fn validate(&self) -> larder_shared::Result<()> {
        if self.id.is_empty() {
            invalid!(MissingRequiredFields, "Recipe id is required");
        }

        if !is_uuid(&self.id) {
            invalid!(InvalidUuid, "Invalid id: must be a valid UUID");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "7d9f3c1e-8a54-4a4b-9f7e-0c2b8e7d1a11";
    const CATEGORY: &str = "0b1a8f3c-2d4e-4f60-8a7b-9c0d1e2f3a4b";
    const INGREDIENT: &str = "1c2b9a4d-3e5f-4071-9b8c-0d1e2f3a4b5c";

    fn valid() -> RecipeInput {
        RecipeInput {
            title: "Pancakes".to_owned(),
            category_id: CATEGORY.to_owned(),
            preparation_time: 20,
            ingredients: vec![IngredientInput {
                ingredient_id: INGREDIENT.to_owned(),
                quantity: 250.0,
                unit: "g".to_owned(),
            }],
            steps: vec![
                StepInput {
                    index: 1,
                    description: "Mix".to_owned(),
                },
                StepInput {
                    index: 2,
                    description: "Fry".to_owned(),
                },
            ],
            tags: vec![],
            creator_id: None,
        }
    }

    fn code(input: &RecipeInput) -> String {
        input.validate(USER).unwrap_err().code().to_owned()
    }

    #[test]
    fn accepts_valid_input() {
        assert!(valid().validate(USER).is_ok());
    }

    #[test]
    fn requires_title_category_and_steps() {
        let mut input = valid();
        input.title = "  ".to_owned();
        assert_eq!(code(&input), "MISSING_REQUIRED_FIELDS");

        let mut input = valid();
        input.steps.clear();
        assert_eq!(code(&input), "MISSING_REQUIRED_FIELDS");
    }

    #[test]
    fn rejects_malformed_ids() {
        let mut input = valid();
        input.category_id = "not-a-uuid".to_owned();
        assert_eq!(code(&input), "INVALID_UUID");

        let mut input = valid();
        input.ingredients[0].ingredient_id = "nope".to_owned();
        assert_eq!(code(&input), "INVALID_UUID");

        let mut input = valid();
        input.tags.push(TagInput {
            tag_id: "nope".to_owned(),
        });
        assert_eq!(code(&input), "INVALID_UUID");
    }

    #[test]
    fn rejects_bad_ingredient() {
        let mut input = valid();
        input.ingredients[0].quantity = 0.0;
        assert_eq!(code(&input), "INVALID_INGREDIENT");

        let mut input = valid();
        input.ingredients[0].unit = String::new();
        assert_eq!(code(&input), "INVALID_INGREDIENT");
    }

    #[test]
    fn step_index_must_be_positive_and_unique() {
        let mut input = valid();
        input.steps[0].index = 0;
        assert_eq!(code(&input), "INVALID_STEP");

        let mut input = valid();
        input.steps[1].index = 1;
        assert_eq!(code(&input), "DUPLICATE_STEP_INDEX");
    }

    #[test]
    fn title_and_step_lengths_fit_the_columns() {
        let mut input = valid();
        input.title = "a".repeat(255);
        input.steps[0].description = "b".repeat(2000);
        assert!(input.validate(USER).is_ok());

        let mut input = valid();
        input.title = "a".repeat(256);
        assert_eq!(code(&input), "INVALID_INPUT");

        let mut input = valid();
        input.steps[1].description = "b".repeat(2001);
        assert_eq!(code(&input), "INVALID_INPUT");
    }

    #[test]
    fn explicit_creator_must_match_session() {
        let mut input = valid();
        input.creator_id = Some(USER.to_owned());
        assert!(input.validate(USER).is_ok());

        input.creator_id = Some(CATEGORY.to_owned());
        assert_eq!(code(&input), "FORBIDDEN_CREATOR");
    }

    #[test]
    fn update_requires_recipe_id() {
        let update = UpdateRecipeInput {
            id: String::new(),
            recipe: valid(),
        };
        assert_eq!(
            update.validate(USER).unwrap_err().code(),
            "MISSING_REQUIRED_FIELDS"
        );

        let update = UpdateRecipeInput {
            id: "42".to_owned(),
            recipe: valid(),
        };
        assert_eq!(update.validate(USER).unwrap_err().code(), "INVALID_UUID");
    }

    #[test]
    fn update_id_is_checked_before_creator() {
        let mut recipe = valid();
        recipe.creator_id = Some(CATEGORY.to_owned());
        let update = UpdateRecipeInput {
            id: String::new(),
            recipe,
        };

        assert_eq!(
            update.validate(USER).unwrap_err().code(),
            "MISSING_REQUIRED_FIELDS"
        );
    }

    #[test]
    fn search_text_is_lowercase_title_and_steps() {
        assert_eq!(valid().search_text(), "pancakes mix fry");
    }
}
