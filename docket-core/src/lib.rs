//! # Docket Core
//!
//! MongoDB data access for the Docket ecosystem: connection establishment
//! with bounded retry, typed query filters, and a generic repository over
//! serde-backed entities.
//!
//! ## Overview
//!
//! `docket-core` keeps driver plumbing out of application code:
//!
//! - **Connection Bootstrap**: parse a URI, layer driver options over it,
//!   and ping the deployment, retrying a bounded number of times
//! - **Typed Filters**: build filter documents from a checked [`Filter`]
//!   tree instead of hand-written BSON
//! - **Generic Repository**: id lookups, existence checks, deletes,
//!   upsert-style saves, and offset pagination for any [`Entity`]
//! - **Ports**: repository logic talks to a [`DocumentCollection`] trait,
//!   so behaviour is testable without a running server
//!
//! ## Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`connection`]: parameter loading and the retrying establisher
//! - [`query`]: the filter tree and its fluent builder
//! - [`ports`]: the collection-level trait repositories build on
//! - [`infrastructure`]: the MongoDB-backed port implementation
//! - [`repository`]: the generic repository and entity codecs
//!
//! ## Examples
//!
//! ```no_run
//! use docket_core::bson::oid::ObjectId;
//! use docket_core::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Account {
//!     #[serde(rename = "_id")]
//!     id: ObjectId,
//!     email: String,
//! }
//!
//! impl Entity for Account {
//!     fn id(&self) -> ObjectId {
//!         self.id
//!     }
//! }
//!
//! async fn lookup() -> anyhow::Result<()> {
//!     let (params, _source) = ConnectionParams::load_from_env()?;
//!     let connection = Connection::establish(params).await?;
//!     let accounts = connection.repository::<Account>("accounts");
//!
//!     if let Some(account) = accounts.find_by_id("68a0f0a1b2c3d4e5f6a7b8c9").await? {
//!         println!("found {}", account.email);
//!     }
//!
//!     let page = accounts
//!         .find_page(
//!             &Filter::builder().exists("email", true).build(),
//!             PageRequest::default(),
//!         )
//!         .await?;
//!     println!("{} of {} accounts", page.count, page.total);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod connection;
pub mod error;
pub mod infrastructure;
pub mod ports;
pub mod query;
pub mod repository;

pub use connection::{Connection, ConnectionParams, DriverOptions, ParamsSource};
pub use error::{DocketError, Result};
pub use infrastructure::MongoCollection;
pub use ports::DocumentCollection;
pub use query::{Filter, FilterBuilder};
pub use repository::{EntityCodec, Repository, SerdeCodec};

pub use bson;
pub use docket_model as model;

/// Commonly used imports for downstream crates.
pub mod prelude {
    pub use crate::connection::{Connection, ConnectionParams, DriverOptions};
    pub use crate::error::{DocketError, Result};
    pub use crate::ports::DocumentCollection;
    pub use crate::query::{Filter, FilterBuilder};
    pub use crate::repository::{EntityCodec, Repository, SerdeCodec};
    pub use docket_model::{
        Entity, ObjectIdLike, PageRange, PageRequest, PaginatedQueryResult,
    };
}
