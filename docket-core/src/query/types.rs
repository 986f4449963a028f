use bson::oid::ObjectId;
use bson::{Bson, Document, doc};

/// Typed query filter that works on every collection surface.
///
/// A `Filter` is the in-memory form of a MongoDB filter document.
/// Repositories accept filters instead of raw documents so call sites
/// stay type-safe about operators, and infrastructure renders them with
/// [`Filter::to_document`] at the driver boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Matches every document.
    #[default]
    All,
    /// Matches the document whose `_id` equals the given id.
    Id(ObjectId),
    /// Field equals value.
    Eq(String, Bson),
    /// Field differs from value, or is absent.
    Ne(String, Bson),
    /// Field is greater than value.
    Gt(String, Bson),
    /// Field is greater than or equal to value.
    Gte(String, Bson),
    /// Field is less than value.
    Lt(String, Bson),
    /// Field is less than or equal to value.
    Lte(String, Bson),
    /// Field equals one of the listed values.
    In(String, Vec<Bson>),
    /// Field equals none of the listed values, or is absent.
    Nin(String, Vec<Bson>),
    /// Field is present (or absent, when `false`).
    Exists(String, bool),
    /// Every clause matches.
    And(Vec<Filter>),
    /// At least one clause matches.
    Or(Vec<Filter>),
}

impl Filter {
    /// Render this filter as the document the driver sends to the server.
    ///
    /// `All` renders as the empty document. Compound clause lists
    /// degenerate towards match-all: an empty `And`/`Or` renders as `{}`
    /// and a single-clause list renders as the clause itself.
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Id(id) => doc! { "_id": *id },
            Filter::Eq(field, value) => doc! { field: value.clone() },
            Filter::Ne(field, value) => doc! { field: { "$ne": value.clone() } },
            Filter::Gt(field, value) => doc! { field: { "$gt": value.clone() } },
            Filter::Gte(field, value) => doc! { field: { "$gte": value.clone() } },
            Filter::Lt(field, value) => doc! { field: { "$lt": value.clone() } },
            Filter::Lte(field, value) => doc! { field: { "$lte": value.clone() } },
            Filter::In(field, values) => doc! { field: { "$in": values.clone() } },
            Filter::Nin(field, values) => doc! { field: { "$nin": values.clone() } },
            Filter::Exists(field, expected) => doc! { field: { "$exists": *expected } },
            Filter::And(clauses) => Self::compound("$and", clauses),
            Filter::Or(clauses) => Self::compound("$or", clauses),
        }
    }

    fn compound(operator: &str, clauses: &[Filter]) -> Document {
        match clauses {
            [] => Document::new(),
            [only] => only.to_document(),
            many => {
                doc! { operator: many.iter().map(Filter::to_document).collect::<Vec<_>>() }
            }
        }
    }
}
