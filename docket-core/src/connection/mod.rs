pub mod params;

pub use params::{ConnectionParams, DriverOptions, ParamsSource};

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{info, warn};

use docket_model::Entity;

use crate::error::{DocketError, Result};
use crate::infrastructure::MongoCollection;
use crate::repository::Repository;

/// Established client session scoped to one MongoDB database.
#[derive(Clone)]
pub struct Connection {
    client: Client,
    database: Database,
}

impl Connection {
    /// Connect and verify reachability, retrying failed attempts.
    ///
    /// Each attempt parses the URI, layers [`DriverOptions`] over it,
    /// builds a client, and pings the target database. The driver
    /// defers I/O until first use, so the ping is what proves the
    /// deployment is reachable. Once `maximum_connection_attempts`
    /// retries are spent the last driver error is surfaced as
    /// [`DocketError::Connection`].
    pub async fn establish(params: ConnectionParams) -> Result<Self> {
        let retry_delay = params.retry_delay_ms.map(Duration::from_millis);
        let connection = with_retry(
            params.maximum_connection_attempts,
            retry_delay,
            || Self::try_connect(&params),
        )
        .await?;
        info!(database = %params.database, "MongoDB connection established");
        Ok(connection)
    }

    async fn try_connect(params: &ConnectionParams) -> mongodb::error::Result<Self> {
        let mut options = ClientOptions::parse(&params.uri).await?;
        params.options.apply_to(&mut options);
        let client = Client::with_options(options)?;
        let database = client.database(&params.database);
        database.run_command(doc! { "ping": 1 }).await?;
        Ok(Self { client, database })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Handle to a named collection in the connected database.
    pub fn collection(&self, name: &str) -> MongoCollection {
        MongoCollection::new(&self.database, name)
    }

    /// Generic repository over a named collection.
    pub fn repository<E: Entity>(&self, collection: &str) -> Repository<E> {
        Repository::new(Arc::new(self.collection(collection)))
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("database", &self.database.name())
            .finish_non_exhaustive()
    }
}

/// Drive `attempt` until it succeeds or `maximum_attempts` retries are
/// spent. The initial try is free: a budget of 3 allows 4 tries in
/// total, and the terminal error reports the 3 retries that failed.
async fn with_retry<T, E, F, Fut>(
    maximum_attempts: u32,
    retry_delay: Option<Duration>,
    mut attempt: F,
) -> Result<T>
where
    E: fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let mut attempts_made: u32 = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempts_made >= maximum_attempts {
                    return Err(DocketError::Connection {
                        attempts: attempts_made,
                        message: err.to_string(),
                    });
                }
                warn!(
                    attempt = attempts_made,
                    error = %err,
                    "MongoDB connection attempt failed, retrying"
                );
                attempts_made += 1;
                if let Some(delay) = retry_delay {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
