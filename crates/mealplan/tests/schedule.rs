use larder_mealplan::ScheduleInput;
use larder_shared::{
    Error, Metadata,
    mealplan::{MealType, SlotPolicy},
};
use temp_dir::TempDir;
use time::macros::date;

mod helpers;

fn input(recipe_id: &str, date: time::Date, meal_type: MealType) -> ScheduleInput {
    ScheduleInput {
        recipe_id: recipe_id.to_owned(),
        date,
        meal_type,
        servings: 2,
    }
}

#[tokio::test]
async fn test_schedule_rejects_taken_slot() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let recipe_id = helpers::create_recipe(&pool, "household-1", "Soupe").await?;
    let cmd = larder_mealplan::Command(pool.clone());
    let metadata = Metadata::by("household-1");

    cmd.schedule(
        &metadata,
        input(&recipe_id, date!(2024 - 01 - 01), MealType::Dinner),
        SlotPolicy::Reject,
    )
    .await?;

    let err = cmd
        .schedule(
            &metadata,
            input(&recipe_id, date!(2024 - 01 - 01), MealType::Dinner),
            SlotPolicy::Reject,
        )
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    cmd.schedule(
        &metadata,
        input(&recipe_id, date!(2024 - 01 - 01), MealType::Lunch),
        SlotPolicy::Reject,
    )
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_schedule_replaces_taken_slot() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let soupe = helpers::create_recipe(&pool, "household-1", "Soupe").await?;
    let gratin = helpers::create_recipe(&pool, "household-1", "Gratin").await?;
    let cmd = larder_mealplan::Command(pool.clone());
    let query = larder_mealplan::Query(pool);
    let metadata = Metadata::by("household-1");

    let first = cmd
        .schedule(
            &metadata,
            input(&soupe, date!(2024 - 01 - 01), MealType::Dinner),
            SlotPolicy::Replace,
        )
        .await?;
    let second = cmd
        .schedule(
            &metadata,
            input(&gratin, date!(2024 - 01 - 01), MealType::Dinner),
            SlotPolicy::Replace,
        )
        .await?;

    assert!(query.find("household-1", &first).await?.is_none());
    let meal = query.find("household-1", &second).await?.unwrap();
    assert_eq!(meal.recipe_id, gratin);

    let meals = query
        .filter_range("household-1", date!(2024 - 01 - 01), date!(2024 - 01 - 01))
        .await?;
    assert_eq!(meals.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_filter_range_is_inclusive_and_ordered() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let recipe_id = helpers::create_recipe(&pool, "household-1", "Soupe").await?;
    let cmd = larder_mealplan::Command(pool.clone());
    let query = larder_mealplan::Query(pool);
    let metadata = Metadata::by("household-1");

    for (date, meal_type) in [
        (date!(2024 - 01 - 02), MealType::Dinner),
        (date!(2024 - 01 - 02), MealType::Breakfast),
        (date!(2024 - 01 - 01), MealType::Snack),
        (date!(2024 - 01 - 03), MealType::Lunch),
        (date!(2024 - 01 - 04), MealType::Lunch),
    ] {
        cmd.schedule(&metadata, input(&recipe_id, date, meal_type), SlotPolicy::Reject)
            .await?;
    }

    let meals = query
        .filter_range("household-1", date!(2024 - 01 - 01), date!(2024 - 01 - 03))
        .await?;
    let slots = meals
        .iter()
        .map(|m| (m.day().unwrap(), m.meal_type.0))
        .collect::<Vec<_>>();
    assert_eq!(
        slots,
        vec![
            (date!(2024 - 01 - 01), MealType::Snack),
            (date!(2024 - 01 - 02), MealType::Breakfast),
            (date!(2024 - 01 - 02), MealType::Dinner),
            (date!(2024 - 01 - 03), MealType::Lunch),
        ]
    );

    assert!(
        query
            .filter_range("household-2", date!(2024 - 01 - 01), date!(2024 - 01 - 31))
            .await?
            .is_empty()
    );

    Ok(())
}

#[tokio::test]
async fn test_schedule_requires_owned_recipe() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let recipe_id = helpers::create_recipe(&pool, "household-1", "Soupe").await?;
    let cmd = larder_mealplan::Command(pool);

    let err = cmd
        .schedule(
            &Metadata::by("household-2"),
            input(&recipe_id, date!(2024 - 01 - 01), MealType::Dinner),
            SlotPolicy::Reject,
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let mut zero = input(&recipe_id, date!(2024 - 01 - 01), MealType::Dinner);
    zero.servings = 0;
    let err = cmd
        .schedule(&Metadata::by("household-1"), zero, SlotPolicy::Reject)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    Ok(())
}

#[tokio::test]
async fn test_remove() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = helpers::setup_test_pool(dir.child("db.sqlite3")).await?;
    let recipe_id = helpers::create_recipe(&pool, "household-1", "Soupe").await?;
    let cmd = larder_mealplan::Command(pool.clone());
    let query = larder_mealplan::Query(pool);

    let id = cmd
        .schedule(
            &Metadata::by("household-1"),
            input(&recipe_id, date!(2024 - 01 - 01), MealType::Dinner),
            SlotPolicy::Reject,
        )
        .await?;

    let err = cmd
        .remove(&Metadata::by("household-2"), &id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    cmd.remove(&Metadata::by("household-1"), &id).await?;
    assert!(query.find("household-1", &id).await?.is_none());

    Ok(())
}
