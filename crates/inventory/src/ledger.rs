use larder_db::table::{InventoryItem, InventoryTransaction};
use larder_shared::{Error, inventory::TransactionKind, not_found};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};

use crate::InventoryItemRow;

const MAX_ATTEMPTS: usize = 16;

/// How a movement moves the stored quantity. Quantities never go below zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    Add(f64),
    Remove(f64),
    Set(f64),
}

impl Change {
    pub fn next(self, current: f64) -> f64 {
        match self {
            Change::Add(delta) => current + delta,
            Change::Remove(delta) => (current - delta).max(0.0),
            Change::Set(value) => value.max(0.0),
        }
    }

    pub fn requested(self, current: f64) -> f64 {
        match self {
            Change::Add(delta) => delta,
            Change::Remove(delta) => -delta,
            Change::Set(value) => value - current,
        }
    }
}

pub(crate) struct Movement {
    pub kind: TransactionKind,
    pub change: Change,
    pub planned_meal_id: Option<String>,
    pub note: Option<String>,
    /// Leave an empty item untouched instead of logging a zero delta.
    pub from_stock: bool,
}

impl Movement {
    pub fn new(kind: TransactionKind, change: Change) -> Self {
        Self {
            kind,
            change,
            planned_meal_id: None,
            note: None,
            from_stock: false,
        }
    }

    pub fn note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    pub fn planned_meal(mut self, id: impl Into<String>) -> Self {
        self.planned_meal_id = Some(id.into());
        self
    }

    pub fn from_stock(mut self) -> Self {
        self.from_stock = true;
        self
    }
}

enum Write {
    Done(LedgerEntry),
    /// The quantity moved since it was read.
    Stale,
    /// A `from_stock` movement found nothing to take.
    Empty,
}

/// One ledger row. `quantity` is the applied delta, so
/// `quantity_after - quantity_before == quantity` always holds.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    pub id: String,
    pub inventory_id: String,
    pub kind: TransactionKind,
    pub quantity: f64,
    pub requested_quantity: f64,
    pub quantity_before: f64,
    pub quantity_after: f64,
}

/// Applies a movement in its own transaction. The quantity read outside the
/// transaction is the compare-and-swap guard of the update; a miss re-reads
/// and tries again.
pub(crate) async fn apply(
    pool: &SqlitePool,
    tenant_id: &str,
    item_id: &str,
    movement: &Movement,
) -> larder_shared::Result<LedgerEntry> {
    try_apply(pool, tenant_id, item_id, movement)
        .await?
        .ok_or_else(|| empty(item_id))
}

/// Like [`apply`], but `None` when a `from_stock` movement meets an empty item.
pub(crate) async fn try_apply(
    pool: &SqlitePool,
    tenant_id: &str,
    item_id: &str,
    movement: &Movement,
) -> larder_shared::Result<Option<LedgerEntry>> {
    for attempt in 1..=MAX_ATTEMPTS {
        let item = {
            let mut conn = pool.acquire().await?;
            crate::find(&mut conn, tenant_id, item_id).await?
        };

        let Some(item) = item else {
            not_found!("inventory item {item_id}");
        };

        let mut tx = pool.begin().await?;

        match write(&mut *tx, &item, movement).await? {
            Write::Done(entry) => {
                tx.commit().await?;

                return Ok(Some(entry));
            }
            Write::Empty => {
                tx.rollback().await?;

                return Ok(None);
            }
            Write::Stale => tx.rollback().await?,
        }

        tracing::debug!(
            inventory_id = %item_id,
            attempt,
            "inventory quantity changed concurrently, retrying"
        );
    }

    Err(Error::Conflict(format!(
        "inventory item {item_id} is being updated concurrently"
    )))
}

/// Applies a movement on a connection the caller already holds, usually inside
/// a wider transaction. There is no retry here. `None` when a `from_stock`
/// movement meets an empty item.
pub(crate) async fn try_record(
    conn: &mut SqliteConnection,
    tenant_id: &str,
    item_id: &str,
    movement: &Movement,
) -> larder_shared::Result<Option<LedgerEntry>> {
    let Some(item) = crate::find(&mut *conn, tenant_id, item_id).await? else {
        not_found!("inventory item {item_id}");
    };

    match write(conn, &item, movement).await? {
        Write::Done(entry) => Ok(Some(entry)),
        Write::Empty => Ok(None),
        Write::Stale => Err(Error::Conflict(format!(
            "inventory item {item_id} is being updated concurrently"
        ))),
    }
}

fn empty(item_id: &str) -> Error {
    Error::Server(format!("inventory item {item_id} is empty"))
}

async fn write(
    conn: &mut SqliteConnection,
    item: &InventoryItemRow,
    movement: &Movement,
) -> larder_shared::Result<Write> {
    let before = item.quantity;
    if movement.from_stock && before <= 0.0 {
        return Ok(Write::Empty);
    }

    let after = movement.change.next(before);

    let statment = Query::update()
        .table(InventoryItem::Table)
        .values([
            (InventoryItem::Quantity, after.into()),
            (InventoryItem::UpdatedAt, larder_shared::now().into()),
        ])
        .and_where(Expr::col(InventoryItem::Id).eq(&item.id))
        .and_where(Expr::col(InventoryItem::Quantity).eq(before))
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    if result.rows_affected() == 0 {
        return Ok(Write::Stale);
    }

    let entry = LedgerEntry {
        id: ulid::Ulid::new().to_string(),
        inventory_id: item.id.to_owned(),
        kind: movement.kind,
        quantity: after - before,
        requested_quantity: movement.change.requested(before),
        quantity_before: before,
        quantity_after: after,
    };

    insert(conn, &entry, movement).await?;

    Ok(Write::Done(entry))
}

pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    entry: &LedgerEntry,
    movement: &Movement,
) -> larder_shared::Result<()> {
    let statment = Query::insert()
        .into_table(InventoryTransaction::Table)
        .columns([
            InventoryTransaction::Id,
            InventoryTransaction::InventoryId,
            InventoryTransaction::Kind,
            InventoryTransaction::Quantity,
            InventoryTransaction::RequestedQuantity,
            InventoryTransaction::QuantityBefore,
            InventoryTransaction::QuantityAfter,
            InventoryTransaction::PlannedMealId,
            InventoryTransaction::Note,
            InventoryTransaction::CreatedAt,
        ])
        .values_panic([
            entry.id.to_owned().into(),
            entry.inventory_id.to_owned().into(),
            entry.kind.to_string().into(),
            entry.quantity.into(),
            entry.requested_quantity.into(),
            entry.quantity_before.into(),
            entry.quantity_after.into(),
            movement.planned_meal_id.to_owned().into(),
            movement.note.to_owned().into(),
            larder_shared::now().into(),
        ])
        .to_owned();

    let (sql, values) = statment.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_floors_at_zero() {
        let change = Change::Remove(10.0);
        assert_eq!(change.next(4.0), 0.0);
        assert_eq!(change.requested(4.0), -10.0);
    }

    #[test]
    fn test_set_reports_signed_difference() {
        assert_eq!(Change::Set(3.0).requested(5.0), -2.0);
        assert_eq!(Change::Set(7.5).next(5.0), 7.5);
        assert_eq!(Change::Add(2.5).next(5.0), 7.5);
    }
}
