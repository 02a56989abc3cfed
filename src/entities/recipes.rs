use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub entry_number: i32,

    pub title: String,

    #[sea_orm(unique)]
    pub slug: String,

    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// JSON array of strings
    pub ingredients: String,

    /// JSON array of strings
    pub steps: String,

    pub hero_image_url: Option<String>,

    pub thumbnail_image_url: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
