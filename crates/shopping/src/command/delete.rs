use larder_shared::{Metadata, not_found};

impl super::Command {
    pub async fn delete(
        &self,
        metadata: &Metadata,
        list_id: impl Into<String>,
    ) -> larder_shared::Result<()> {
        let tenant_id = metadata.tenant()?;
        let list_id = list_id.into();

        let mut tx = self.0.begin().await?;

        if !crate::store::delete_list(&mut *tx, &tenant_id, &list_id).await? {
            not_found!("shopping list {list_id}");
        }

        tx.commit().await?;

        Ok(())
    }
}
