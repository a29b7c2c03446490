use larder::cli::{self, Context};
use larder_shared::{
    Error,
    shopping::{GenerationMode, Origin},
};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_plan_shop_and_cook() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = helpers::config(&dir, GenerationMode::Pipeline);
    larder::migrate::migrate(&config).await?;
    let recipe_id = helpers::seed(&config, "household-1").await?;

    let ctx = Context::connect(config, Some("household-1".to_owned()), true).await?;
    cli::meal::schedule(
        &ctx,
        recipe_id,
        "2024-01-03".to_owned(),
        Default::default(),
        2,
    )
    .await?;

    cli::shopping::generate(&ctx, "2024-01-01".to_owned(), "2024-01-07".to_owned(), false).await?;

    let lists = larder_shopping::Query(ctx.read_pool.clone())
        .filter("household-1")
        .await?;
    assert_eq!(lists.len(), 1);
    let items = larder_shopping::Query(ctx.read_pool.clone())
        .items("household-1", &lists[0].id)
        .await?;
    let names = items
        .iter()
        .map(|item| (item.name.as_str(), item.quantity))
        .collect::<Vec<_>>();
    // 200 g of pasta are covered by the 300 g in stock, which is itself under
    // its 400 g minimum; the refill line has no aisle so it sorts last
    assert_eq!(names, vec![("Basilic", 0.5), ("Pâtes", 100.0)]);
    assert_eq!(items[0].origin.0, Origin::Recipe);
    assert_eq!(items[1].origin.0, Origin::Stock);

    let meals = larder_mealplan::Query(ctx.read_pool.clone())
        .filter_range(
            "household-1",
            larder_shared::parse_date("2024-01-03")?,
            larder_shared::parse_date("2024-01-03")?,
        )
        .await?;
    cli::meal::consume(&ctx, meals[0].id.to_owned(), true).await?;

    let pates = larder_inventory::Query(ctx.read_pool.clone())
        .find_by_name("household-1", "Pâtes", Some("g"))
        .await?
        .unwrap();
    assert_eq!(pates.quantity, 100.0);

    cli::inventory::low_stock(&ctx).await?;

    Ok(())
}

#[tokio::test]
async fn test_commands_require_tenant() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = helpers::config(&dir, GenerationMode::Atomic);
    larder::migrate::migrate(&config).await?;

    let ctx = Context::connect(config, None, false).await?;
    let err = cli::shopping::generate(&ctx, "2024-01-01".to_owned(), "2024-01-07".to_owned(), false)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::Unauthenticated)
    ));
    assert!(cli::inventory::low_stock(&ctx).await.is_err());

    Ok(())
}
