use super::types::Filter;
use bson::Bson;
use bson::oid::ObjectId;

/// Fluent API for building document filters
///
/// Clauses accumulate with AND semantics; [`FilterBuilder::build`]
/// collapses zero clauses to [`Filter::All`] and a single clause to
/// itself.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    clauses: Vec<Filter>,
}

impl FilterBuilder {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    // === Field clauses ===

    /// Match the document whose `_id` equals `id`
    pub fn id(self, id: ObjectId) -> Self {
        self.push(Filter::by_id(id))
    }

    /// Field equals value
    pub fn eq(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.push(Filter::eq(field, value))
    }

    /// Field differs from value
    pub fn ne(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.push(Filter::ne(field, value))
    }

    /// Field is greater than value
    pub fn gt(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.push(Filter::gt(field, value))
    }

    /// Field is greater than or equal to value
    pub fn gte(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.push(Filter::gte(field, value))
    }

    /// Field is less than value
    pub fn lt(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.push(Filter::lt(field, value))
    }

    /// Field is less than or equal to value
    pub fn lte(self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.push(Filter::lte(field, value))
    }

    /// Field equals one of the listed values
    pub fn is_in(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Bson>>,
    ) -> Self {
        self.push(Filter::is_in(field, values))
    }

    /// Field equals none of the listed values
    pub fn not_in(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Bson>>,
    ) -> Self {
        self.push(Filter::not_in(field, values))
    }

    /// Field is present (or absent when `expected` is false)
    pub fn exists(self, field: impl Into<String>, expected: bool) -> Self {
        self.push(Filter::exists(field, expected))
    }

    // === Compound clauses ===

    /// At least one of the given filters matches
    pub fn any_of(self, filters: Vec<Filter>) -> Self {
        self.push(Filter::Or(filters))
    }

    /// Every one of the given filters matches
    pub fn all_of(self, filters: Vec<Filter>) -> Self {
        self.push(Filter::And(filters))
    }

    // === Build method ===

    /// Build the final filter
    pub fn build(mut self) -> Filter {
        match self.clauses.len() {
            0 => Filter::All,
            1 => self.clauses.remove(0),
            _ => Filter::And(self.clauses),
        }
    }

    fn push(mut self, filter: Filter) -> Self {
        self.clauses.push(filter);
        self
    }
}

// === Convenience constructors ===

impl Filter {
    /// Matches every document in the collection
    pub fn all() -> Self {
        Filter::All
    }

    /// Matches the document with the given `_id`
    pub fn by_id(id: ObjectId) -> Self {
        Filter::Id(id)
    }

    /// Start building a compound filter
    pub fn builder() -> FilterBuilder {
        FilterBuilder::new()
    }

    // === Field constructors ===

    /// Field equals value
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    /// Field differs from value
    pub fn ne(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Ne(field.into(), value.into())
    }

    /// Field is greater than value
    pub fn gt(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Gt(field.into(), value.into())
    }

    /// Field is greater than or equal to value
    pub fn gte(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Gte(field.into(), value.into())
    }

    /// Field is less than value
    pub fn lt(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Lt(field.into(), value.into())
    }

    /// Field is less than or equal to value
    pub fn lte(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Lte(field.into(), value.into())
    }

    /// Field equals one of the listed values
    pub fn is_in(
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Bson>>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Filter::In(field.into(), values)
    }

    /// Field equals none of the listed values
    pub fn not_in(
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Bson>>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Filter::Nin(field.into(), values)
    }

    /// Field is present (or absent when `expected` is false)
    pub fn exists(field: impl Into<String>, expected: bool) -> Self {
        Filter::Exists(field.into(), expected)
    }

    // === Combinators ===

    /// Both filters match; chaining extends one conjunction
    pub fn and(self, other: Filter) -> Filter {
        match self {
            Filter::And(mut clauses) => {
                clauses.push(other);
                Filter::And(clauses)
            }
            first => Filter::And(vec![first, other]),
        }
    }

    /// Either filter matches; chaining extends one disjunction
    pub fn or(self, other: Filter) -> Filter {
        match self {
            Filter::Or(mut clauses) => {
                clauses.push(other);
                Filter::Or(clauses)
            }
            first => Filter::Or(vec![first, other]),
        }
    }
}
