pub mod codec;

pub use codec::{EntityCodec, SerdeCodec};

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use bson::Document;
use bson::oid::ObjectId;
use tracing::debug;

use docket_model::{Entity, ObjectIdLike, PageRequest, PaginatedQueryResult};

use crate::error::Result;
use crate::ports::DocumentCollection;
use crate::query::Filter;

/// Generic data access over one document collection.
///
/// A repository pairs a [`DocumentCollection`] with an [`EntityCodec`]
/// and exposes entity-level operations on top: id lookups, existence
/// checks, deletes, upsert-style saves, and paginated queries. Id-based
/// surfaces accept [`ObjectIdLike`] values and treat malformed ids as
/// referring to no document at all, so untrusted id strings never error.
///
/// Cloning is cheap; clones share the underlying collection handle.
pub struct Repository<E, C = SerdeCodec> {
    collection: Arc<dyn DocumentCollection>,
    codec: C,
    entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Repository<E> {
    /// Repository over `collection` using the serde codec.
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self::with_codec(collection, SerdeCodec)
    }
}

impl<E: Entity, C> Repository<E, C> {
    /// Repository over `collection` with a custom entity codec.
    pub fn with_codec(collection: Arc<dyn DocumentCollection>, codec: C) -> Self {
        Self {
            collection,
            codec,
            entity: PhantomData,
        }
    }
}

impl<E, C> Repository<E, C>
where
    E: Entity,
    C: EntityCodec<E>,
{
    /// Name of the underlying collection.
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Entity with the given id, or `None` when the id is malformed or
    /// matches nothing.
    pub async fn find_by_id(&self, id: impl ObjectIdLike) -> Result<Option<E>> {
        let Some(id) = id.to_object_id() else {
            return Ok(None);
        };
        self.find_one_by(&Filter::Id(id)).await
    }

    /// Whether a document with the given id exists. Malformed ids are
    /// reported as absent.
    pub async fn exists_by_id(&self, id: impl ObjectIdLike) -> Result<bool> {
        let Some(id) = id.to_object_id() else {
            return Ok(false);
        };
        self.exists_by(&Filter::Id(id)).await
    }

    /// Delete the document with the given id.
    ///
    /// Returns `Some(true)` when a document was removed, `Some(false)`
    /// when the id was valid but matched nothing, and `None` when the
    /// id was malformed and no delete was attempted.
    pub async fn delete_by_id(&self, id: impl ObjectIdLike) -> Result<Option<bool>> {
        let Some(id) = id.to_object_id() else {
            return Ok(None);
        };
        let deleted = self.collection.delete_one(id).await?;
        Ok(Some(deleted > 0))
    }

    /// Insert `entity`, or overwrite the stored fields of the document
    /// that already carries its id.
    ///
    /// The stored `_id` is never rewritten on the update path; every
    /// other field is applied as a `$set`, so concurrent saves resolve
    /// to the last writer.
    pub async fn save(&self, entity: &E) -> Result<()> {
        let id = entity.id();
        if self.exists_by(&Filter::Id(id)).await? {
            debug!(id = %id, "updating existing document");
            self.update(id, entity).await
        } else {
            debug!(id = %id, "inserting new document");
            self.insert(entity).await
        }
    }

    /// First entity matching `filter`, if any.
    pub async fn find_one_by(&self, filter: &Filter) -> Result<Option<E>> {
        match self.collection.find_one(filter).await? {
            Some(document) => Ok(Some(self.codec.from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Every entity matching `filter`, unpaginated.
    pub async fn find_all_by(&self, filter: &Filter) -> Result<Vec<E>> {
        let documents = self.collection.find(filter, 0, None).await?;
        self.decode_all(documents)
    }

    /// Whether any document matches `filter`.
    pub async fn exists_by(&self, filter: &Filter) -> Result<bool> {
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }

    /// Delete every document matching `filter`; `true` when at least
    /// one was removed.
    pub async fn delete_by(&self, filter: &Filter) -> Result<bool> {
        let deleted = self.collection.delete_many(filter).await?;
        Ok(deleted > 0)
    }

    /// One page of the entities matching `filter`.
    ///
    /// The full match is counted first; a zero total short-circuits
    /// without fetching, and a zero page size returns the count alone.
    /// Count and fetch are separate reads, so a page taken during
    /// concurrent writes may disagree with its own `total`.
    pub async fn find_page(
        &self,
        filter: &Filter,
        page: PageRequest,
    ) -> Result<PaginatedQueryResult<E>> {
        let total = self.collection.count_documents(filter).await?;
        if total == 0 {
            return Ok(PaginatedQueryResult::empty());
        }

        let from = page.offset();
        if page.size == 0 {
            return Ok(PaginatedQueryResult::new(total, from, Vec::new()));
        }

        // A limit of zero would mean "unlimited" to the server, which
        // the zero-size branch above already rules out.
        let limit = i64::try_from(page.size).unwrap_or(i64::MAX);
        let documents = self.collection.find(filter, from, Some(limit)).await?;
        let results = self.decode_all(documents)?;
        Ok(PaginatedQueryResult::new(total, from, results))
    }

    async fn insert(&self, entity: &E) -> Result<()> {
        let document = self.codec.to_document(entity)?;
        self.collection.insert_one(document).await
    }

    async fn update(&self, id: ObjectId, entity: &E) -> Result<()> {
        let mut fields = self.codec.to_document(entity)?;
        fields.remove("_id");
        self.collection.update_one(id, fields).await
    }

    fn decode_all(&self, documents: Vec<Document>) -> Result<Vec<E>> {
        documents
            .into_iter()
            .map(|document| self.codec.from_document(document))
            .collect()
    }
}

impl<E, C: Clone> Clone for Repository<E, C> {
    fn clone(&self) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
            codec: self.codec.clone(),
            entity: PhantomData,
        }
    }
}

impl<E, C> fmt::Debug for Repository<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("collection", &self.collection.name())
            .finish_non_exhaustive()
    }
}
