use sqlx::SqlitePool;
use time::Date;
use validator::{Validate, ValidationError};

use crate::{compute_lines, store};

/// Rows per multi-row insert.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

#[derive(Validate, Clone, Copy, Debug)]
#[validate(schema(function = "validate_range"))]
pub struct GenerateInput {
    pub start: Date,
    pub end: Date,
    /// Drop the tenant's existing lists for the same range first.
    pub replace: bool,
}

fn validate_range(input: &GenerateInput) -> Result<(), ValidationError> {
    if input.start > input.end {
        return Err(ValidationError::new("range").with_message("start is after end".into()));
    }

    Ok(())
}

/// Builds and persists a shopping list, returning its id.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        tenant_id: &str,
        input: GenerateInput,
    ) -> larder_shared::Result<String>;
}

/// Snapshot reads, replacement and inserts in one transaction.
#[derive(Clone)]
pub struct AtomicGenerator(pub SqlitePool);

#[async_trait::async_trait]
impl Generator for AtomicGenerator {
    #[tracing::instrument(skip(self), fields(mode = "atomic"))]
    async fn generate(
        &self,
        tenant_id: &str,
        input: GenerateInput,
    ) -> larder_shared::Result<String> {
        input.validate()?;

        let mut tx = self.0.begin().await?;

        if input.replace {
            for id in store::find_by_range(&mut *tx, tenant_id, input.start, input.end).await? {
                store::delete_list(&mut *tx, tenant_id, &id).await?;
            }
        }

        let snapshot = store::load_snapshot(&mut *tx, tenant_id, input.start, input.end).await?;
        let lines = compute_lines(&snapshot);
        let id = store::insert_list(&mut *tx, tenant_id, input.start, input.end).await?;

        for chunk in lines.chunks(DEFAULT_CHUNK_SIZE) {
            store::insert_items(&mut *tx, &id, chunk).await?;
        }

        tx.commit().await?;

        tracing::info!(
            shopping_list_id = %id,
            meals = snapshot.meals.len(),
            items = lines.len(),
            "shopping list generated"
        );

        Ok(id)
    }
}

/// Separate round trips per step. The header is written before the items; if
/// an insert fails, or the future is dropped, the header is deleted again.
#[derive(Clone)]
pub struct PipelineGenerator {
    pool: SqlitePool,
    chunk_size: usize,
}

impl PipelineGenerator {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    async fn insert_items(&self, id: &str, lines: &[crate::ListLine]) -> anyhow::Result<()> {
        for chunk in lines.chunks(self.chunk_size) {
            let mut conn = self.pool.acquire().await?;
            store::insert_items(&mut conn, id, chunk).await?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Generator for PipelineGenerator {
    #[tracing::instrument(skip(self), fields(mode = "pipeline"))]
    async fn generate(
        &self,
        tenant_id: &str,
        input: GenerateInput,
    ) -> larder_shared::Result<String> {
        input.validate()?;

        if input.replace {
            let mut conn = self.pool.acquire().await?;
            for id in store::find_by_range(&mut conn, tenant_id, input.start, input.end).await? {
                store::delete_list(&mut conn, tenant_id, &id).await?;
            }
        }

        let snapshot = {
            let mut conn = self.pool.acquire().await?;
            store::load_snapshot(&mut conn, tenant_id, input.start, input.end).await?
        };
        let lines = compute_lines(&snapshot);

        let id = {
            let mut conn = self.pool.acquire().await?;
            store::insert_list(&mut conn, tenant_id, input.start, input.end).await?
        };

        let compensation = Compensation::new(self.pool.clone(), tenant_id, &id);

        if let Err(e) = self.insert_items(&id, &lines).await {
            compensation.run().await;

            return Err(e.into());
        }

        compensation.disarm();

        tracing::info!(
            shopping_list_id = %id,
            meals = snapshot.meals.len(),
            items = lines.len(),
            "shopping list generated"
        );

        Ok(id)
    }
}

/// Deletes a half-written list unless disarmed.
struct Compensation {
    pool: SqlitePool,
    tenant_id: String,
    list_id: String,
    armed: bool,
}

impl Compensation {
    fn new(pool: SqlitePool, tenant_id: &str, list_id: &str) -> Self {
        Self {
            pool,
            tenant_id: tenant_id.to_owned(),
            list_id: list_id.to_owned(),
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }

    async fn run(mut self) {
        self.armed = false;
        remove(&self.pool, &self.tenant_id, &self.list_id).await;
    }
}

impl Drop for Compensation {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let pool = self.pool.clone();
        let tenant_id = std::mem::take(&mut self.tenant_id);
        let list_id = std::mem::take(&mut self.list_id);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { remove(&pool, &tenant_id, &list_id).await });
            }
            Err(_) => {
                tracing::error!(shopping_list_id = %list_id, "no runtime left to remove partial shopping list");
            }
        }
    }
}

async fn remove(pool: &SqlitePool, tenant_id: &str, list_id: &str) {
    let result: anyhow::Result<bool> = async {
        let mut tx = pool.begin().await?;
        let deleted = store::delete_list(&mut *tx, tenant_id, list_id).await?;
        tx.commit().await?;

        Ok(deleted)
    }
    .await;

    match result {
        Ok(_) => tracing::warn!(shopping_list_id = %list_id, "partial shopping list removed"),
        Err(e) => tracing::error!(
            shopping_list_id = %list_id,
            error = %e,
            "failed to remove partial shopping list"
        ),
    }
}
