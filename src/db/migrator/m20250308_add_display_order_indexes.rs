use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_resources_display_order")
                    .table(Resources::Table)
                    .col(Resources::DisplayOrder)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_social_links_display_order")
                    .table(SocialLinks::Table)
                    .col(SocialLinks::DisplayOrder)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_social_links_display_order")
                    .table(SocialLinks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_resources_display_order")
                    .table(Resources::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Resources {
    Table,
    DisplayOrder,
}

#[derive(DeriveIden)]
enum SocialLinks {
    Table,
    DisplayOrder,
}
