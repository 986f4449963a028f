use bson::Document;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Converts entities to and from their stored document form.
///
/// Repositories are generic over the codec so storage layout is a
/// swappable policy: the default [`SerdeCodec`] round-trips through
/// serde, while a custom codec can keep reading a legacy document shape
/// without touching repository logic.
pub trait EntityCodec<E>: Send + Sync {
    /// Render `entity` as the document to store.
    fn to_document(&self, entity: &E) -> Result<Document>;

    /// Rebuild an entity from a stored document.
    fn from_document(&self, document: Document) -> Result<E>;
}

/// Serde-backed codec used by repositories unless overridden.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeCodec;

impl<E> EntityCodec<E> for SerdeCodec
where
    E: Serialize + DeserializeOwned,
{
    fn to_document(&self, entity: &E) -> Result<Document> {
        Ok(bson::to_document(entity)?)
    }

    fn from_document(&self, document: Document) -> Result<E> {
        Ok(bson::from_document(document)?)
    }
}
