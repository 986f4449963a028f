use async_trait::async_trait;
use bson::Document;
use bson::oid::ObjectId;

use crate::error::Result;
use crate::query::Filter;

/// Collection-level document operations the repository layer builds on.
///
/// Implementations translate [`Filter`] values into store-specific
/// calls. The MongoDB-backed implementation lives in
/// [`crate::infrastructure::MongoCollection`]; tests substitute an
/// in-memory double.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Collection name, for diagnostics.
    fn name(&self) -> &str;

    /// First document matching `filter`, if any.
    async fn find_one(&self, filter: &Filter) -> Result<Option<Document>>;

    /// Documents matching `filter`, skipping the first `skip` and
    /// returning at most `limit` when one is given.
    async fn find(
        &self,
        filter: &Filter,
        skip: u64,
        limit: Option<i64>,
    ) -> Result<Vec<Document>>;

    /// Number of documents matching `filter`.
    async fn count_documents(&self, filter: &Filter) -> Result<u64>;

    /// Store a new document.
    async fn insert_one(&self, document: Document) -> Result<()>;

    /// Apply `fields` as a `$set` to the document with the given `_id`.
    async fn update_one(&self, id: ObjectId, fields: Document) -> Result<()>;

    /// Remove the document with the given `_id`, returning how many
    /// documents were removed (0 or 1).
    async fn delete_one(&self, id: ObjectId) -> Result<u64>;

    /// Remove every document matching `filter`, returning how many
    /// documents were removed.
    async fn delete_many(&self, filter: &Filter) -> Result<u64>;
}
