use anyhow::Context;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::db::StoreResult;
use crate::entities::{prelude::*, resources, social_links};
use crate::models::content::{Resource, SocialLink};

/// Read-only access to the external link catalogues. Rows are maintained
/// out-of-band.
pub struct LinkRepository {
    conn: DatabaseConnection,
}

impl LinkRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_resources(&self) -> StoreResult<Vec<Resource>> {
        let rows = Resources::find()
            .order_by_asc(resources::Column::DisplayOrder)
            .order_by_asc(resources::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list resources")?;

        Ok(rows
            .into_iter()
            .map(|r| Resource {
                id: r.id,
                name: r.name,
                url: r.url,
                image_url: r.image_url,
                display_order: r.display_order,
            })
            .collect())
    }

    pub async fn list_social_links(&self) -> StoreResult<Vec<SocialLink>> {
        let rows = SocialLinks::find()
            .order_by_asc(social_links::Column::DisplayOrder)
            .order_by_asc(social_links::Column::Platform)
            .all(&self.conn)
            .await
            .context("Failed to list social links")?;

        Ok(rows
            .into_iter()
            .map(|r| SocialLink {
                id: r.id,
                platform: r.platform,
                url: r.url,
                display_order: r.display_order,
            })
            .collect())
    }
}
