use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::InventoryItem;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(InventoryItem::Table)
        .col(
            ColumnDef::new(InventoryItem::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(InventoryItem::TenantId).string().not_null())
        .col(ColumnDef::new(InventoryItem::Name).string().not_null())
        .col(ColumnDef::new(InventoryItem::NameKey).string().not_null())
        .col(
            ColumnDef::new(InventoryItem::Quantity)
                .double()
                .not_null()
                .default(0.0),
        )
        .col(ColumnDef::new(InventoryItem::Unit).string().null())
        .col(ColumnDef::new(InventoryItem::UnitKey).string().not_null())
        .col(ColumnDef::new(InventoryItem::Category).string().not_null())
        .col(ColumnDef::new(InventoryItem::Aisle).string().null())
        .col(
            ColumnDef::new(InventoryItem::MinQuantity)
                .double()
                .not_null()
                .default(0.0),
        )
        .col(ColumnDef::new(InventoryItem::ExpiresOn).big_integer().null())
        .col(ColumnDef::new(InventoryItem::Location).string().null())
        .col(
            ColumnDef::new(InventoryItem::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(InventoryItem::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(InventoryItem::Table).to_owned()
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
