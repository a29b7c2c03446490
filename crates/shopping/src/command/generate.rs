use larder_shared::{Metadata, not_found};

use crate::{GenerateInput, Generator};

impl super::Command {
    pub async fn generate(
        &self,
        metadata: &Metadata,
        input: GenerateInput,
        generator: &dyn Generator,
    ) -> larder_shared::Result<String> {
        let tenant_id = metadata.tenant()?;

        generator.generate(&tenant_id, input).await
    }

    /// Rebuilds a list from the current plan and inventory. The new list is
    /// written before the old one is dropped.
    pub async fn regenerate(
        &self,
        metadata: &Metadata,
        list_id: impl Into<String>,
        generator: &dyn Generator,
    ) -> larder_shared::Result<String> {
        let tenant_id = metadata.tenant()?;
        let list_id = list_id.into();

        let Some(list) = crate::Query(self.0.clone())
            .find(&tenant_id, &list_id)
            .await?
        else {
            not_found!("shopping list {list_id}");
        };

        let input = GenerateInput {
            start: list.start()?,
            end: list.end()?,
            replace: false,
        };

        let id = generator.generate(&tenant_id, input).await?;

        let mut tx = self.0.begin().await?;
        crate::store::delete_list(&mut *tx, &tenant_id, &list_id).await?;
        tx.commit().await?;

        Ok(id)
    }
}
