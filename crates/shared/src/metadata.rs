use ulid::Ulid;

/// Who is asking. Every command receives one explicitly; nothing in the crate
/// reads an ambient session.
#[derive(Clone, Debug)]
pub struct Metadata {
    pub id: String,
    pub tenant_id: Option<String>,
}

impl Metadata {
    pub fn new(tenant_id: impl Into<Option<String>>) -> Self {
        Self {
            id: Ulid::new().to_string(),
            tenant_id: tenant_id.into(),
        }
    }

    pub fn by(tenant_id: impl Into<String>) -> Self {
        Self::new(Some(tenant_id.into()))
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// Resolved tenant, or `Error::Unauthenticated` when the caller has none.
    pub fn tenant(&self) -> crate::Result<String> {
        match self.tenant_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id.to_owned()),
            _ => Err(crate::Error::Unauthenticated),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_resolved() {
        let metadata = Metadata::by("household-1");
        assert_eq!(metadata.tenant().unwrap(), "household-1");
        assert_eq!(metadata.id.len(), 26);
    }

    #[test]
    fn test_tenant_missing() {
        assert!(matches!(
            Metadata::anonymous().tenant(),
            Err(crate::Error::Unauthenticated)
        ));
        assert!(matches!(
            Metadata::by("  ").tenant(),
            Err(crate::Error::Unauthenticated)
        ));
    }
}
