use larder_db::table::PlannedMeal;
use larder_shared::{
    Metadata,
    mealplan::{MealType, SlotPolicy},
    not_found,
};
use sea_query::{OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::Date;
use validator::Validate;

#[derive(Validate, Clone, Debug)]
pub struct ScheduleInput {
    #[validate(length(equal = 26))]
    pub recipe_id: String,
    pub date: Date,
    pub meal_type: MealType,
    #[validate(range(min = 1))]
    pub servings: u32,
}

impl super::Command {
    /// Puts a recipe on the calendar. A slot is one (date, meal type) per
    /// tenant; `policy` decides what happens when it is already taken.
    pub async fn schedule(
        &self,
        metadata: &Metadata,
        input: ScheduleInput,
        policy: SlotPolicy,
    ) -> larder_shared::Result<String> {
        input.validate()?;
        let tenant_id = metadata.tenant()?;

        let mut tx = self.0.begin().await?;

        if larder_recipe::find(&mut *tx, &tenant_id, &input.recipe_id)
            .await?
            .is_none()
        {
            not_found!("recipe {}", input.recipe_id);
        }

        let id = ulid::Ulid::new().to_string();
        let date = larder_shared::date_to_timestamp(input.date);
        let mut statment = Query::insert()
            .into_table(PlannedMeal::Table)
            .columns([
                PlannedMeal::Id,
                PlannedMeal::TenantId,
                PlannedMeal::RecipeId,
                PlannedMeal::Date,
                PlannedMeal::MealType,
                PlannedMeal::Servings,
                PlannedMeal::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                tenant_id.to_owned().into(),
                input.recipe_id.to_owned().into(),
                date.into(),
                input.meal_type.to_string().into(),
                input.servings.into(),
                larder_shared::now().into(),
            ])
            .to_owned();

        if policy == SlotPolicy::Replace {
            statment.on_conflict(
                OnConflict::columns([
                    PlannedMeal::TenantId,
                    PlannedMeal::Date,
                    PlannedMeal::MealType,
                ])
                .update_columns([
                    PlannedMeal::Id,
                    PlannedMeal::RecipeId,
                    PlannedMeal::Servings,
                    PlannedMeal::CreatedAt,
                ])
                .to_owned(),
            );
        }

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        match sqlx::query_with(&sql, values).execute(&mut *tx).await {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(larder_shared::Error::Conflict(format!(
                    "{} {} is already planned",
                    larder_shared::format_date(input.date),
                    input.meal_type
                )));
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;

        tracing::debug!(
            planned_meal_id = %id,
            tenant_id = %tenant_id,
            date = %larder_shared::format_date(input.date),
            meal_type = %input.meal_type,
            "meal scheduled"
        );

        Ok(id)
    }
}
