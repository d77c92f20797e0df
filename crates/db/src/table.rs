use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Username,
    DisplayName,
    Bio,
    Password,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum Category {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Tag {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    Title,
    CategoryId,
    CreatorId,
    PreparationTime,
    AverageRating,
    RatingCount,
    Status,
    SearchText,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    IngredientId,
    Quantity,
    Unit,
}

#[derive(Iden, Clone)]
pub enum RecipeStep {
    Table,
    Id,
    RecipeId,
    Idx,
    Description,
}

#[derive(Iden, Clone)]
pub enum RecipeTag {
    Table,
    RecipeId,
    TagId,
}

#[derive(Iden, Clone)]
pub enum RecipePicture {
    Table,
    Id,
    RecipeId,
    Path,
    CreatedAt,
    UpdatedAt,
}
