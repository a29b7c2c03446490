use larder_db::table::{Ingredient, Recipe};
use larder_shared::Metadata;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

#[derive(Validate, Clone, Debug)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub aisle: Option<String>,
}

#[derive(Validate, Clone, Debug)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 1))]
    pub base_servings: u32,
    #[validate(nested)]
    pub ingredients: Vec<IngredientInput>,
}

impl super::Command {
    pub async fn create(
        &self,
        metadata: &Metadata,
        input: CreateInput,
    ) -> larder_shared::Result<String> {
        input.validate()?;
        let tenant_id = metadata.tenant()?;
        let id = ulid::Ulid::new().to_string();
        let created_at = larder_shared::now();

        let mut tx = self.0.begin().await?;

        let statment = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::Id,
                Recipe::TenantId,
                Recipe::Name,
                Recipe::BaseServings,
                Recipe::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                tenant_id.into(),
                input.name.trim().to_owned().into(),
                input.base_servings.into(),
                created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        if !input.ingredients.is_empty() {
            let mut statment = Query::insert()
                .into_table(Ingredient::Table)
                .columns([
                    Ingredient::Id,
                    Ingredient::RecipeId,
                    Ingredient::Position,
                    Ingredient::Name,
                    Ingredient::Quantity,
                    Ingredient::Unit,
                    Ingredient::Aisle,
                ])
                .to_owned();

            for (position, ingredient) in input.ingredients.into_iter().enumerate() {
                statment.values_panic([
                    ulid::Ulid::new().to_string().into(),
                    id.to_owned().into(),
                    (position as u32).into(),
                    ingredient.name.trim().to_owned().into(),
                    ingredient.quantity.into(),
                    ingredient.unit.into(),
                    ingredient.aisle.into(),
                ]);
            }

            let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::debug!(recipe_id = %id, "recipe created");

        Ok(id)
    }
}
