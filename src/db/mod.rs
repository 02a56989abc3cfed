use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::models::content::{
    AboutContent, AboutInput, DailyStatus, DailyStatusInput, Resource, SocialLink,
};
use crate::models::recipe::{AdjacentRecipes, NewRecipe, Recipe, RecipeChanges, RecipeKey};
use crate::models::user::User;

pub mod migrator;
pub mod repositories;

pub use repositories::user::NewUser;

/// Trust level of a store handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Public read-only handle.
    Restricted,
    /// Administrative handle used by the endpoints. Bypasses access policy.
    Elevated,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} already exists")]
    Duplicate(String),

    #[error("Store handle is read-only")]
    ReadOnly,

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        Self::Database(err.into())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Maps unique index violations to [`StoreError::Duplicate`] naming `what`.
pub(crate) fn classify_write_error(err: DbErr, what: &str) -> StoreError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        StoreError::Duplicate(what.to_string())
    } else {
        err.into()
    }
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    access: AccessLevel,
}

impl Store {
    /// Opens a handle at `access`. The elevated handle needs
    /// `database.elevated_key` and applies pending migrations.
    pub async fn connect(config: &DatabaseConfig, access: AccessLevel) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let key = match access {
            AccessLevel::Elevated => config.elevated_key.as_deref(),
            AccessLevel::Restricted => config
                .restricted_key
                .as_deref()
                .or(config.elevated_key.as_deref()),
        };
        if key.is_none_or(|k| k.trim().is_empty()) {
            anyhow::bail!("Store credentials missing for {access:?} handle");
        }

        let db_url = config.url.as_str();
        let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
        if access == AccessLevel::Elevated && !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .context("Failed to connect to the store")?;

        if access == AccessLevel::Elevated {
            migrator::Migrator::up(&conn, None).await?;
        }

        info!(
            ?access,
            "Store connected (pool: {}-{})", config.min_connections, config.max_connections
        );

        Ok(Self { conn, access })
    }

    /// A read-only view over the same pool.
    #[must_use]
    pub fn restricted(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            access: AccessLevel::Restricted,
        }
    }

    fn ensure_writable(&self) -> StoreResult<()> {
        match self.access {
            AccessLevel::Elevated => Ok(()),
            AccessLevel::Restricted => Err(StoreError::ReadOnly),
        }
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn recipe_repo(&self) -> repositories::recipe::RecipeRepository {
        repositories::recipe::RecipeRepository::new(self.conn.clone())
    }

    fn daily_status_repo(&self) -> repositories::daily_status::DailyStatusRepository {
        repositories::daily_status::DailyStatusRepository::new(self.conn.clone())
    }

    fn about_repo(&self) -> repositories::about::AboutRepository {
        repositories::about::AboutRepository::new(self.conn.clone())
    }

    fn link_repo(&self) -> repositories::links::LinkRepository {
        repositories::links::LinkRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        self.user_repo().email_exists(email).await
    }

    pub async fn get_user_with_password(&self, email: &str) -> StoreResult<Option<(User, String)>> {
        self.user_repo().get_by_email_with_password(email).await
    }

    pub async fn create_user(&self, new_user: NewUser<'_>) -> StoreResult<User> {
        self.ensure_writable()?;
        self.user_repo().create(new_user).await
    }

    // ========== Recipes ==========

    pub async fn list_recipes(&self) -> StoreResult<Vec<Recipe>> {
        self.recipe_repo().list().await
    }

    pub async fn get_recipe(&self, key: &RecipeKey) -> StoreResult<Option<Recipe>> {
        self.recipe_repo().get(key).await
    }

    pub async fn adjacent_recipes(&self, entry_number: i32) -> StoreResult<AdjacentRecipes> {
        self.recipe_repo().adjacent(entry_number).await
    }

    pub async fn create_recipe(&self, recipe: &NewRecipe) -> StoreResult<Recipe> {
        self.ensure_writable()?;
        self.recipe_repo().create(recipe).await
    }

    pub async fn update_recipe(
        &self,
        id: &str,
        changes: &RecipeChanges,
    ) -> StoreResult<Option<Recipe>> {
        self.ensure_writable()?;
        self.recipe_repo().update(id, changes).await
    }

    pub async fn delete_recipe(&self, id: &str) -> StoreResult<bool> {
        self.ensure_writable()?;
        self.recipe_repo().delete(id).await
    }

    // ========== Daily status ==========

    pub async fn latest_daily_status(&self) -> StoreResult<Option<DailyStatus>> {
        self.daily_status_repo().latest().await
    }

    pub async fn list_daily_status(&self) -> StoreResult<Vec<DailyStatus>> {
        self.daily_status_repo().list().await
    }

    pub async fn upsert_daily_status(&self, input: &DailyStatusInput) -> StoreResult<DailyStatus> {
        self.ensure_writable()?;
        self.daily_status_repo().upsert(input).await
    }

    // ========== About ==========

    pub async fn get_about(&self) -> StoreResult<Option<AboutContent>> {
        self.about_repo().get().await
    }

    pub async fn upsert_about(&self, input: &AboutInput) -> StoreResult<AboutContent> {
        self.ensure_writable()?;
        self.about_repo().upsert(input).await
    }

    pub async fn count_about(&self) -> StoreResult<u64> {
        self.about_repo().count().await
    }

    // ========== Links ==========

    pub async fn list_resources(&self) -> StoreResult<Vec<Resource>> {
        self.link_repo().list_resources().await
    }

    pub async fn list_social_links(&self) -> StoreResult<Vec<SocialLink>> {
        self.link_repo().list_social_links().await
    }
}
