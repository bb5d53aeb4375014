use async_trait::async_trait;

use crate::domain::{ReadError, ResourceId};

/// Anything a batch can read text resources from
///
/// Each call owns whatever handle it opens and releases it before
/// returning; implementations must not share handles between reads.
#[async_trait]
pub trait ResourceReader: Send + Sync {
    /// Read the whole resource as UTF-8 text
    async fn read(&self, id: &ResourceId) -> Result<String, ReadError>;
}

#[async_trait]
impl<R: ResourceReader + ?Sized> ResourceReader for std::sync::Arc<R> {
    async fn read(&self, id: &ResourceId) -> Result<String, ReadError> {
        (**self).read(id).await
    }
}

#[async_trait]
impl<R: ResourceReader + ?Sized> ResourceReader for &R {
    async fn read(&self, id: &ResourceId) -> Result<String, ReadError> {
        (**self).read(id).await
    }
}
