use anyhow::Context;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};

use crate::db::{StoreResult, now_rfc3339};
use crate::entities::{daily_status, prelude::*};
use crate::models::content::{DailyStatus as DailyStatusRow, DailyStatusInput};

pub struct DailyStatusRepository {
    conn: DatabaseConnection,
}

impl DailyStatusRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: daily_status::Model) -> DailyStatusRow {
        DailyStatusRow {
            id: m.id,
            date: m.date,
            day_number: m.day_number,
            ingredient_of_day: m.ingredient_of_day,
            weather: m.weather,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }

    /// The most recent status by date
    pub async fn latest(&self) -> StoreResult<Option<DailyStatusRow>> {
        let row = DailyStatus::find()
            .order_by_desc(daily_status::Column::Date)
            .one(&self.conn)
            .await
            .context("Failed to query latest daily status")?;

        Ok(row.map(Self::map_model))
    }

    /// All statuses, most recent first
    pub async fn list(&self) -> StoreResult<Vec<DailyStatusRow>> {
        let rows = DailyStatus::find()
            .order_by_desc(daily_status::Column::Date)
            .all(&self.conn)
            .await
            .context("Failed to list daily statuses")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get_by_date(&self, date: &str) -> StoreResult<Option<DailyStatusRow>> {
        let row = DailyStatus::find()
            .filter(daily_status::Column::Date.eq(date))
            .one(&self.conn)
            .await
            .context("Failed to query daily status by date")?;

        Ok(row.map(Self::map_model))
    }

    /// Inserts the status for `input.date`, or overwrites the existing row
    /// for that date in the same statement. Weather is only overwritten when
    /// the input carries it.
    pub async fn upsert(&self, input: &DailyStatusInput) -> StoreResult<DailyStatusRow> {
        let now = now_rfc3339();

        let mut changed = vec![
            daily_status::Column::DayNumber,
            daily_status::Column::IngredientOfDay,
            daily_status::Column::UpdatedAt,
        ];
        if input.weather.is_some() {
            changed.push(daily_status::Column::Weather);
        }

        let active = daily_status::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            date: Set(input.date.clone()),
            day_number: Set(input.day_number),
            ingredient_of_day: Set(input.ingredient_of_day.clone()),
            weather: Set(input.weather.clone().flatten()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        DailyStatus::insert(active)
            .on_conflict(
                OnConflict::column(daily_status::Column::Date)
                    .update_columns(changed)
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to upsert daily status")?;

        self.get_by_date(&input.date)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Daily status for {} missing after upsert", input.date).into())
    }
}
