pub mod mongo;

pub use mongo::MongoCollection;
