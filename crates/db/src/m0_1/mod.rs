mod ingredient_create_recipe_idx;
mod ingredient_create_table;
mod inventory_item_create_key_idx;
mod inventory_item_create_table;
mod inventory_transaction_create_item_idx;
mod inventory_transaction_create_table;
mod planned_meal_create_slot_idx;
mod planned_meal_create_table;
mod recipe_create_table;
mod shopping_list_create_range_idx;
mod shopping_list_create_table;
mod shopping_list_item_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "larder",
    "m0_1",
    vec_box![],
    vec_box![
        recipe_create_table::Operation,
        ingredient_create_table::Operation,
        ingredient_create_recipe_idx::Operation,
        planned_meal_create_table::Operation,
        planned_meal_create_slot_idx::Operation,
        inventory_item_create_table::Operation,
        inventory_item_create_key_idx::Operation,
        inventory_transaction_create_table::Operation,
        inventory_transaction_create_item_idx::Operation,
        shopping_list_create_table::Operation,
        shopping_list_create_range_idx::Operation,
        shopping_list_item_create_table::Operation
    ]
);
