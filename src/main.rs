use anyhow::Result;
use clap::{Parser, Subcommand};
use larder::cli::{Context, inventory, meal, shopping};
use larder_shared::mealplan::MealType;

/// larder - shopping lists and pantry inventory for a meal plan
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Shopping list aggregation and inventory reconciliation", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Household the command acts for
    #[arg(long, global = true)]
    tenant: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Shopping lists
    #[command(subcommand)]
    Shopping(ShoppingCommands),
    /// Planned meals
    #[command(subcommand)]
    Meal(MealCommands),
    /// Pantry inventory
    #[command(subcommand)]
    Inventory(InventoryCommands),
}

#[derive(Subcommand)]
enum ShoppingCommands {
    /// Build a list for the meals planned between two dates (YYYY-MM-DD)
    Generate {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// Drop existing lists for the same range first
        #[arg(long)]
        replace: bool,
    },
    /// Print a list grouped by aisle
    Show { list_id: String },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Put a recipe on the calendar
    Schedule {
        #[arg(long)]
        recipe: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "dinner")]
        meal_type: MealType,
        #[arg(long, default_value_t = 4)]
        servings: u32,
    },
    /// Deduct a cooked meal's ingredients from the inventory
    Consume {
        planned_meal_id: String,
        /// All ingredients in one transaction
        #[arg(long)]
        atomic: bool,
    },
}

#[derive(Subcommand)]
enum InventoryCommands {
    /// Items at or below their minimum quantity
    LowStock,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = larder::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(
        "larder",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let result = match cli.command {
        Commands::Migrate => larder::migrate::migrate(&config).await,
        Commands::Reset => larder::migrate::reset(&config).await,
        Commands::Shopping(command) => {
            let ctx = Context::connect(config, cli.tenant, cli.json).await?;
            match command {
                ShoppingCommands::Generate {
                    start,
                    end,
                    replace,
                } => shopping::generate(&ctx, start, end, replace).await,
                ShoppingCommands::Show { list_id } => shopping::show(&ctx, list_id).await,
            }
        }
        Commands::Meal(command) => {
            let ctx = Context::connect(config, cli.tenant, cli.json).await?;
            match command {
                MealCommands::Schedule {
                    recipe,
                    date,
                    meal_type,
                    servings,
                } => meal::schedule(&ctx, recipe, date, meal_type, servings).await,
                MealCommands::Consume {
                    planned_meal_id,
                    atomic,
                } => meal::consume(&ctx, planned_meal_id, atomic).await,
            }
        }
        Commands::Inventory(InventoryCommands::LowStock) => {
            let ctx = Context::connect(config, cli.tenant, cli.json).await?;
            inventory::low_stock(&ctx).await
        }
    };

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }

    result
}
