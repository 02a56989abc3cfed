use anyhow::Context;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};

use crate::constants::about::SINGLETON_SLOT;
use crate::db::{StoreResult, now_rfc3339};
use crate::entities::{about_content, prelude::*};
use crate::models::content::{AboutContent as AboutRow, AboutInput};

pub struct AboutRepository {
    conn: DatabaseConnection,
}

impl AboutRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: about_content::Model) -> AboutRow {
        AboutRow {
            id: m.id,
            bio: m.bio,
            profile_image_url: m.profile_image_url,
            email: m.email,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    pub async fn get(&self) -> StoreResult<Option<AboutRow>> {
        let row = AboutContent::find()
            .filter(about_content::Column::Slot.eq(SINGLETON_SLOT))
            .one(&self.conn)
            .await
            .context("Failed to query about content")?;

        Ok(row.map(Self::map_model))
    }

    /// Creates the singleton row or updates the fields present in `input`.
    pub async fn upsert(&self, input: &AboutInput) -> StoreResult<AboutRow> {
        let now = now_rfc3339();

        let mut changed = vec![about_content::Column::UpdatedAt];
        if input.bio.is_some() {
            changed.push(about_content::Column::Bio);
        }
        if input.profile_image_url.is_some() {
            changed.push(about_content::Column::ProfileImageUrl);
        }
        if input.email.is_some() {
            changed.push(about_content::Column::Email);
        }

        let active = about_content::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            slot: Set(SINGLETON_SLOT),
            bio: Set(input.bio.clone().unwrap_or_default()),
            profile_image_url: Set(input.profile_image_url.clone().flatten()),
            email: Set(input.email.clone().flatten()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        AboutContent::insert(active)
            .on_conflict(
                OnConflict::column(about_content::Column::Slot)
                    .update_columns(changed)
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to upsert about content")?;

        self.get()
            .await?
            .ok_or_else(|| anyhow::anyhow!("About content missing after upsert").into())
    }

    /// Number of about rows, used to check the singleton invariant.
    pub async fn count(&self) -> StoreResult<u64> {
        use sea_orm::PaginatorTrait;

        let count = AboutContent::find()
            .count(&self.conn)
            .await
            .context("Failed to count about content")?;
        Ok(count)
    }
}
