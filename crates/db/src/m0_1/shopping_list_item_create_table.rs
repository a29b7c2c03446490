use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{ShoppingList, ShoppingListItem};

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(ShoppingListItem::Table)
        .col(
            ColumnDef::new(ShoppingListItem::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::ShoppingListId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(ShoppingListItem::Name).string().not_null())
        .col(
            ColumnDef::new(ShoppingListItem::Quantity)
                .double()
                .not_null(),
        )
        .col(ColumnDef::new(ShoppingListItem::Unit).string().null())
        .col(ColumnDef::new(ShoppingListItem::Aisle).string().null())
        .col(ColumnDef::new(ShoppingListItem::Origin).string().not_null())
        .col(
            ColumnDef::new(ShoppingListItem::Checked)
                .boolean()
                .not_null()
                .default(false),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_shopping_list_item_list")
                .from(ShoppingListItem::Table, ShoppingListItem::ShoppingListId)
                .to(ShoppingList::Table, ShoppingList::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(ShoppingListItem::Table).to_owned()
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
