use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub entry_number: i32,
    pub title: String,
    pub slug: String,
    pub date: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub hero_image_url: Option<String>,
    pub thumbnail_image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields accepted when creating an entry. Anything else in the request
/// body is dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    #[serde(deserialize_with = "super::whole_number")]
    pub entry_number: i32,
    pub title: String,
    pub slug: String,
    pub date: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub thumbnail_image_url: Option<String>,
}

/// Partial update of an entry; `None` leaves the column untouched. The
/// image URLs take `Some(None)` for an explicit `null`, which clears them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipeChanges {
    #[serde(deserialize_with = "super::optional_whole_number")]
    pub entry_number: Option<i32>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    #[serde(deserialize_with = "super::nullable")]
    pub hero_image_url: Option<Option<String>>,
    #[serde(deserialize_with = "super::nullable")]
    pub thumbnail_image_url: Option<Option<String>>,
}

impl RecipeChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entry_number.is_none()
            && self.title.is_none()
            && self.slug.is_none()
            && self.date.is_none()
            && self.ingredients.is_none()
            && self.steps.is_none()
            && self.hero_image_url.is_none()
            && self.thumbnail_image_url.is_none()
    }
}

/// How a path segment addresses an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeKey {
    Id(String),
    Slug(String),
}

/// Entries either side of a given entry number.
#[derive(Debug, Clone, Serialize)]
pub struct AdjacentRecipes {
    pub previous: Option<RecipeSummary>,
    pub next: Option<RecipeSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub entry_number: i32,
    pub title: String,
    pub slug: String,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            entry_number: recipe.entry_number,
            title: recipe.title,
            slug: recipe.slug,
        }
    }
}
