//! Entity and pagination models shared across Docket crates.
#![allow(missing_docs)]

pub use ::bson;

pub mod entity;
pub mod page;

// Intentionally curated re-exports for downstream consumers.
pub use entity::{Entity, ObjectIdLike};
pub use page::{PageRange, PageRequest, PaginatedQueryResult};
