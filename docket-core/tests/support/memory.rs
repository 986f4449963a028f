use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};

use docket_core::error::Result;
use docket_core::ports::DocumentCollection;
use docket_core::query::Filter;

/// In-memory [`DocumentCollection`] standing in for a live server.
///
/// Documents keep insertion order, filters are evaluated with the same
/// missing-field semantics the server applies, and `update_one` merges
/// fields the way `$set` does.
#[derive(Debug)]
pub struct InMemoryCollection {
    name: String,
    documents: Mutex<Vec<Document>>,
}

impl InMemoryCollection {
    pub fn new(name: &str) -> Self {
        Self::with_documents(name, Vec::new())
    }

    pub fn with_documents(name: &str, documents: Vec<Document>) -> Self {
        Self {
            name: name.to_string(),
            documents: Mutex::new(documents),
        }
    }

    pub fn snapshot(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    fn id_of(document: &Document) -> Option<ObjectId> {
        document.get_object_id("_id").ok()
    }
}

#[async_trait]
impl DocumentCollection for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Document>> {
        let documents = self.documents.lock().unwrap();
        Ok(documents.iter().find(|doc| matches(filter, doc)).cloned())
    }

    async fn find(
        &self,
        filter: &Filter,
        skip: u64,
        limit: Option<i64>,
    ) -> Result<Vec<Document>> {
        let documents = self.documents.lock().unwrap();
        let matching = documents
            .iter()
            .filter(|doc| matches(filter, doc))
            .skip(skip as usize);
        Ok(match limit {
            Some(limit) => matching.take(limit.max(0) as usize).cloned().collect(),
            None => matching.cloned().collect(),
        })
    }

    async fn count_documents(&self, filter: &Filter) -> Result<u64> {
        let documents = self.documents.lock().unwrap();
        Ok(documents.iter().filter(|doc| matches(filter, doc)).count() as u64)
    }

    async fn insert_one(&self, document: Document) -> Result<()> {
        self.documents.lock().unwrap().push(document);
        Ok(())
    }

    async fn update_one(&self, id: ObjectId, fields: Document) -> Result<()> {
        let mut documents = self.documents.lock().unwrap();
        if let Some(existing) = documents
            .iter_mut()
            .find(|doc| Self::id_of(doc) == Some(id))
        {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        }
        Ok(())
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64> {
        let mut documents = self.documents.lock().unwrap();
        match documents.iter().position(|doc| Self::id_of(doc) == Some(id)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_many(&self, filter: &Filter) -> Result<u64> {
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|doc| !matches(filter, doc));
        Ok((before - documents.len()) as u64)
    }
}

/// Evaluate `filter` against one document.
///
/// Mirrors server behaviour for absent fields: `$ne` and `$nin` match
/// documents missing the field, ordered comparisons do not. Empty
/// compound clause lists degenerate to match-all, the same way
/// [`Filter::to_document`] renders them.
pub fn matches(filter: &Filter, document: &Document) -> bool {
    match filter {
        Filter::All => true,
        Filter::Id(id) => document.get_object_id("_id").ok() == Some(*id),
        Filter::Eq(field, value) => document.get(field) == Some(value),
        Filter::Ne(field, value) => document.get(field) != Some(value),
        Filter::Gt(field, value) => ordered(document, field, value, Ordering::is_gt),
        Filter::Gte(field, value) => ordered(document, field, value, Ordering::is_ge),
        Filter::Lt(field, value) => ordered(document, field, value, Ordering::is_lt),
        Filter::Lte(field, value) => ordered(document, field, value, Ordering::is_le),
        Filter::In(field, values) => document
            .get(field)
            .is_some_and(|value| values.contains(value)),
        Filter::Nin(field, values) => document
            .get(field)
            .is_none_or(|value| !values.contains(value)),
        Filter::Exists(field, expected) => document.get(field).is_some() == *expected,
        Filter::And(clauses) => clauses.iter().all(|clause| matches(clause, document)),
        Filter::Or(clauses) => {
            clauses.is_empty() || clauses.iter().any(|clause| matches(clause, document))
        }
    }
}

fn ordered(
    document: &Document,
    field: &str,
    value: &Bson,
    accept: fn(Ordering) -> bool,
) -> bool {
    document
        .get(field)
        .and_then(|stored| compare(stored, value))
        .is_some_and(accept)
}

fn compare(left: &Bson, right: &Bson) -> Option<Ordering> {
    match (left, right) {
        (Bson::String(left), Bson::String(right)) => Some(left.cmp(right)),
        (Bson::DateTime(left), Bson::DateTime(right)) => Some(left.cmp(right)),
        _ => numeric(left)?.partial_cmp(&numeric(right)?),
    }
}

fn numeric(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(value) => Some(f64::from(*value)),
        Bson::Int64(value) => Some(*value as f64),
        Bson::Double(value) => Some(*value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn absent_fields_follow_server_semantics() {
        let document = doc! { "title": "no priority here" };

        assert!(matches(
            &Filter::Ne("priority".into(), 1.into()),
            &document
        ));
        assert!(matches(
            &Filter::Nin("priority".into(), vec![1.into(), 2.into()]),
            &document
        ));
        assert!(!matches(&Filter::Gt("priority".into(), 0.into()), &document));
        assert!(!matches(
            &Filter::Exists("priority".into(), true),
            &document
        ));
        assert!(matches(
            &Filter::Exists("priority".into(), false),
            &document
        ));
    }

    #[test]
    fn numeric_comparisons_cross_bson_widths() {
        let document = doc! { "level": Bson::Int64(5) };
        assert!(matches(&Filter::Gt("level".into(), 4.into()), &document));
        assert!(matches(
            &Filter::Lte("level".into(), Bson::Double(5.0)),
            &document
        ));
        assert!(!matches(&Filter::Lt("level".into(), 5.into()), &document));
    }
}
