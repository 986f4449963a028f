pub mod builder;
pub mod types;

pub use builder::FilterBuilder;
pub use types::Filter;
