use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{PlannedMeal, Recipe};

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(PlannedMeal::Table)
        .col(
            ColumnDef::new(PlannedMeal::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(PlannedMeal::TenantId).string().not_null())
        .col(
            ColumnDef::new(PlannedMeal::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(PlannedMeal::Date).big_integer().not_null())
        .col(ColumnDef::new(PlannedMeal::MealType).string().not_null())
        .col(ColumnDef::new(PlannedMeal::Servings).integer().not_null())
        .col(
            ColumnDef::new(PlannedMeal::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_planned_meal_recipe")
                .from(PlannedMeal::Table, PlannedMeal::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(PlannedMeal::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
