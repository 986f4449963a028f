pub mod collection;

pub use collection::DocumentCollection;

#[cfg(test)]
pub use collection::MockDocumentCollection;
