use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{InventoryItem, InventoryTransaction};

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(InventoryTransaction::Table)
        .col(
            ColumnDef::new(InventoryTransaction::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(InventoryTransaction::InventoryId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(InventoryTransaction::Kind)
                .string()
                .not_null(),
        )
        .col(
            ColumnDef::new(InventoryTransaction::Quantity)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(InventoryTransaction::RequestedQuantity)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(InventoryTransaction::QuantityBefore)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(InventoryTransaction::QuantityAfter)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(InventoryTransaction::PlannedMealId)
                .string()
                .null(),
        )
        .col(ColumnDef::new(InventoryTransaction::Note).text().null())
        .col(
            ColumnDef::new(InventoryTransaction::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_inventory_transaction_item")
                .from(InventoryTransaction::Table, InventoryTransaction::InventoryId)
                .to(InventoryItem::Table, InventoryItem::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(InventoryTransaction::Table).to_owned()
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
