use larder_inventory::{CreateInput, RestockInput, UpdateInput};
use larder_shared::{Metadata, inventory::InventoryCategory, inventory::TransactionKind};
use temp_dir::TempDir;
use time::macros::date;

mod helpers;

#[tokio::test]
async fn test_create_rejects_duplicate_key() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    helpers::create_item(&pool, "household-1", "Tomates", 1.0, Some("kg")).await?;

    let err = helpers::create_item(&pool, "household-1", "tomatoes", 2.0, Some("kilogram"))
        .await
        .unwrap_err();
    assert!(
        err.downcast_ref::<larder_shared::Error>()
            .is_some_and(|e| e.is_conflict())
    );

    helpers::create_item(&pool, "household-1", "Tomates", 6.0, None).await?;
    helpers::create_item(&pool, "household-2", "Tomates", 1.0, Some("kg")).await?;

    Ok(())
}

#[tokio::test]
async fn test_update_keeps_quantity() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = larder_inventory::Command(pool.clone());
    let query = larder_inventory::Query(pool.clone());
    let id = helpers::create_item(&pool, "household-1", "Savon", 2.0, None).await?;

    cmd.update(
        &Metadata::by("household-1"),
        &id,
        UpdateInput {
            name: "Savon de Marseille".to_owned(),
            category: InventoryCategory::Toiletry,
            min_quantity: 1.0,
            location: Some("salle de bain".to_owned()),
            ..Default::default()
        },
    )
    .await?;

    let item = query.find("household-1", &id).await?.unwrap();
    assert_eq!(item.name, "Savon de Marseille");
    assert_eq!(item.name_key, "savon de marseille");
    assert_eq!(item.category.0, InventoryCategory::Toiletry);
    assert_eq!(item.quantity, 2.0);

    let err = cmd
        .update(
            &Metadata::by("household-2"),
            &id,
            UpdateInput {
                name: "Savon".to_owned(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_ledger() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = larder_inventory::Command(pool.clone());
    let query = larder_inventory::Query(pool.clone());
    let id = helpers::create_item(&pool, "household-1", "Javel", 1.0, Some("l")).await?;

    let err = cmd.delete(&Metadata::by("household-2"), &id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(query.history("household-1", &id).await?.len(), 1);

    cmd.delete(&Metadata::by("household-1"), &id).await?;
    assert!(query.find("household-1", &id).await?.is_none());
    assert!(query.history("household-1", &id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_restock_merges_by_normalized_key() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = larder_inventory::Command(pool.clone());
    let query = larder_inventory::Query(pool.clone());
    let id = helpers::create_item(&pool, "household-1", "Tomates", 1.0, Some("kg")).await?;

    let restocked = cmd
        .restock(
            &Metadata::by("household-1"),
            RestockInput {
                name: "tomatoes".to_owned(),
                quantity: 2.0,
                unit: Some("kilogram".to_owned()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(restocked, id);

    let item = query.find("household-1", &id).await?.unwrap();
    assert_eq!(item.quantity, 3.0);
    let history = query.history("household-1", &id).await?;
    assert_eq!(history[0].kind.0, TransactionKind::Add);
    assert_eq!(history[0].quantity, 2.0);

    let created = cmd
        .restock(
            &Metadata::by("household-1"),
            RestockInput {
                name: "Lessive".to_owned(),
                quantity: 1.0,
                category: InventoryCategory::Cleaning,
                aisle: Some("household".to_owned()),
                ..Default::default()
            },
        )
        .await?;
    assert_ne!(created, id);

    let item = query.find("household-1", &created).await?.unwrap();
    assert_eq!(item.category.0, InventoryCategory::Cleaning);
    assert_eq!(item.quantity, 1.0);
    assert_eq!(query.list("household-1").await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_low_stock_and_expiring() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let cmd = larder_inventory::Command(pool.clone());
    let query = larder_inventory::Query(pool.clone());
    let metadata = Metadata::by("household-1");

    for (name, quantity, min_quantity, expires_on) in [
        ("Lait", 2.0, 2.0, Some(date!(2024 - 01 - 05))),
        ("Beurre", 1.0, 2.0, Some(date!(2024 - 01 - 20))),
        ("Riz", 5.0, 1.0, None),
        ("Sel", 0.0, 0.0, Some(date!(2024 - 01 - 02))),
    ] {
        cmd.create(
            &metadata,
            CreateInput {
                name: name.to_owned(),
                quantity,
                min_quantity,
                expires_on,
                ..Default::default()
            },
        )
        .await?;
    }

    let low = query
        .low_stock("household-1")
        .await?
        .into_iter()
        .map(|item| item.name)
        .collect::<Vec<_>>();
    assert_eq!(low, vec!["Beurre", "Lait"]);

    let expiring = query
        .expiring("household-1", date!(2024 - 01 - 10))
        .await?
        .into_iter()
        .map(|item| item.name)
        .collect::<Vec<_>>();
    assert_eq!(expiring, vec!["Sel", "Lait"]);

    Ok(())
}
