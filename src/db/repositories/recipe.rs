use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::db::{StoreError, StoreResult, classify_write_error, now_rfc3339};
use crate::entities::{prelude::*, recipes};
use crate::models::recipe::{AdjacentRecipes, NewRecipe, Recipe, RecipeChanges, RecipeKey};

const DUPLICATE_RECIPE: &str = "Recipe with this entry number or slug";

/// Repository for recipe entries
pub struct RecipeRepository {
    conn: DatabaseConnection,
}

impl RecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_model(m: recipes::Model) -> StoreResult<Recipe> {
        Ok(Recipe {
            ingredients: decode_list(&m.id, "ingredients", &m.ingredients)?,
            steps: decode_list(&m.id, "steps", &m.steps)?,
            id: m.id,
            entry_number: m.entry_number,
            title: m.title,
            slug: m.slug,
            date: m.date,
            hero_image_url: m.hero_image_url,
            thumbnail_image_url: m.thumbnail_image_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }

    fn map_models(rows: Vec<recipes::Model>) -> StoreResult<Vec<Recipe>> {
        rows.into_iter().map(Self::map_model).collect()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All entries, newest entry number first
    pub async fn list(&self) -> StoreResult<Vec<Recipe>> {
        let rows = Recipes::find()
            .order_by_desc(recipes::Column::EntryNumber)
            .all(&self.conn)
            .await
            .context("Failed to list recipes")?;

        Self::map_models(rows)
    }

    pub async fn get(&self, key: &RecipeKey) -> StoreResult<Option<Recipe>> {
        let query = match key {
            RecipeKey::Id(id) => Recipes::find_by_id(id.clone()),
            RecipeKey::Slug(slug) => Recipes::find().filter(recipes::Column::Slug.eq(slug.as_str())),
        };

        let row = query
            .one(&self.conn)
            .await
            .context("Failed to query recipe")?;

        row.map(Self::map_model).transpose()
    }

    pub async fn get_by_entry_number(&self, entry_number: i32) -> StoreResult<Option<Recipe>> {
        let row = Recipes::find()
            .filter(recipes::Column::EntryNumber.eq(entry_number))
            .one(&self.conn)
            .await
            .context("Failed to query recipe by entry number")?;

        row.map(Self::map_model).transpose()
    }

    pub async fn adjacent(&self, entry_number: i32) -> StoreResult<AdjacentRecipes> {
        let previous = match entry_number.checked_sub(1) {
            Some(n) => self.get_by_entry_number(n).await?,
            None => None,
        };
        let next = match entry_number.checked_add(1) {
            Some(n) => self.get_by_entry_number(n).await?,
            None => None,
        };

        Ok(AdjacentRecipes {
            previous: previous.map(Into::into),
            next: next.map(Into::into),
        })
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Inserts a new entry. Entry number and slug collisions are reported
    /// as [`StoreError::Duplicate`] by the unique indexes.
    pub async fn create(&self, recipe: &NewRecipe) -> StoreResult<Recipe> {
        let now = now_rfc3339();

        let active = recipes::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            entry_number: Set(recipe.entry_number),
            title: Set(recipe.title.clone()),
            slug: Set(recipe.slug.clone()),
            date: Set(recipe.date.clone()),
            ingredients: Set(encode_list(&recipe.ingredients)?),
            steps: Set(encode_list(&recipe.steps)?),
            hero_image_url: Set(recipe.hero_image_url.clone()),
            thumbnail_image_url: Set(recipe.thumbnail_image_url.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .map_err(|e| classify_write_error(e, DUPLICATE_RECIPE))?;

        info!(entry_number = model.entry_number, slug = %model.slug, "Created recipe");
        Self::map_model(model)
    }

    /// Applies `changes` to the entry with `id`. Returns `None` when no
    /// such entry exists.
    pub async fn update(&self, id: &str, changes: &RecipeChanges) -> StoreResult<Option<Recipe>> {
        let Some(existing) = Recipes::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query recipe for update")?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(entry_number) = changes.entry_number {
            active.entry_number = Set(entry_number);
        }
        if let Some(title) = &changes.title {
            active.title = Set(title.clone());
        }
        if let Some(slug) = &changes.slug {
            active.slug = Set(slug.clone());
        }
        if let Some(date) = &changes.date {
            active.date = Set(date.clone());
        }
        if let Some(ingredients) = &changes.ingredients {
            active.ingredients = Set(encode_list(ingredients)?);
        }
        if let Some(steps) = &changes.steps {
            active.steps = Set(encode_list(steps)?);
        }
        if let Some(url) = &changes.hero_image_url {
            active.hero_image_url = Set(url.clone());
        }
        if let Some(url) = &changes.thumbnail_image_url {
            active.thumbnail_image_url = Set(url.clone());
        }
        active.updated_at = Set(now_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .map_err(|e| classify_write_error(e, DUPLICATE_RECIPE))?;

        Self::map_model(model).map(Some)
    }

    /// Deletes the entry with `id`, returning whether a row was removed.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = Recipes::delete_by_id(id.to_string())
            .exec(&self.conn)
            .await
            .context("Failed to delete recipe")?;

        if result.rows_affected > 0 {
            info!(id, "Deleted recipe");
        }
        Ok(result.rows_affected > 0)
    }
}

fn encode_list(items: &[String]) -> StoreResult<String> {
    serde_json::to_string(items).map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn decode_list(id: &str, column: &str, raw: &str) -> StoreResult<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| StoreError::Corrupt(format!("recipe {id} has invalid {column}: {e}")))
}
