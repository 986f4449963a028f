use async_trait::async_trait;
use bson::Document;
use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::debug;

use crate::error::Result;
use crate::ports::DocumentCollection;
use crate::query::Filter;

/// [`DocumentCollection`] backed by a live MongoDB collection handle.
///
/// Filters are rendered to BSON here, at the driver boundary; nothing
/// above this type speaks raw filter documents.
#[derive(Clone)]
pub struct MongoCollection {
    name: String,
    collection: Collection<Document>,
}

impl std::fmt::Debug for MongoCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoCollection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl MongoCollection {
    pub fn new(database: &Database, name: &str) -> Self {
        Self {
            name: name.to_owned(),
            collection: database.collection::<Document>(name),
        }
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Document>> {
        let document = self.collection.find_one(filter.to_document()).await?;
        Ok(document)
    }

    async fn find(
        &self,
        filter: &Filter,
        skip: u64,
        limit: Option<i64>,
    ) -> Result<Vec<Document>> {
        let mut find = self.collection.find(filter.to_document()).skip(skip);
        if let Some(limit) = limit {
            find = find.limit(limit);
        }
        let documents = find.await?.try_collect().await?;
        Ok(documents)
    }

    async fn count_documents(&self, filter: &Filter) -> Result<u64> {
        let count = self
            .collection
            .count_documents(filter.to_document())
            .await?;
        Ok(count)
    }

    async fn insert_one(&self, document: Document) -> Result<()> {
        self.collection.insert_one(document).await?;
        Ok(())
    }

    async fn update_one(&self, id: ObjectId, fields: Document) -> Result<()> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;
        Ok(())
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn delete_many(&self, filter: &Filter) -> Result<u64> {
        let result = self
            .collection
            .delete_many(filter.to_document())
            .await?;
        debug!(
            collection = %self.name,
            deleted = result.deleted_count,
            "bulk delete completed"
        );
        Ok(result.deleted_count)
    }
}
