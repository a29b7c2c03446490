use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum Recipe {
    Table,
    Id,
    TenantId,
    Name,
    BaseServings,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Ingredient {
    Table,
    Id,
    RecipeId,
    Position,
    Name,
    Quantity,
    Unit,
    Aisle,
}

#[derive(Iden, Clone, Copy)]
pub enum PlannedMeal {
    Table,
    Id,
    TenantId,
    RecipeId,
    Date,
    MealType,
    Servings,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum InventoryItem {
    Table,
    Id,
    TenantId,
    Name,
    NameKey,
    Quantity,
    Unit,
    UnitKey,
    Category,
    Aisle,
    MinQuantity,
    ExpiresOn,
    Location,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum InventoryTransaction {
    Table,
    Id,
    InventoryId,
    Kind,
    Quantity,
    RequestedQuantity,
    QuantityBefore,
    QuantityAfter,
    PlannedMealId,
    Note,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum ShoppingList {
    Table,
    Id,
    TenantId,
    StartDate,
    EndDate,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum ShoppingListItem {
    Table,
    Id,
    ShoppingListId,
    Name,
    Quantity,
    Unit,
    Aisle,
    Origin,
    Checked,
}
