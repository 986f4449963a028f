use anyhow::{Context, anyhow};
use mongodb::options::ClientOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Environment variable naming a TOML or JSON params file to load.
pub const CONFIG_PATH_VAR: &str = "DOCKET_MONGODB_CONFIG_PATH";
/// Environment variable carrying inline JSON params.
pub const PARAMS_VAR: &str = "DOCKET_MONGODB_PARAMS";
/// Environment variable carrying the connection string.
pub const URI_VAR: &str = "DOCKET_MONGODB_URI";
/// Environment variable naming the database to use.
pub const DATABASE_VAR: &str = "DOCKET_MONGODB_DATABASE";
/// Environment variable overriding the connection retry budget.
pub const MAX_ATTEMPTS_VAR: &str = "DOCKET_MONGODB_MAX_ATTEMPTS";

const DEFAULT_MAX_POOL_SIZE: u32 = 10;

fn default_maximum_connection_attempts() -> u32 {
    5
}

/// Source that produced the connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsSource {
    /// File named by `$DOCKET_MONGODB_CONFIG_PATH`.
    EnvPath(PathBuf),
    /// Inline JSON in `$DOCKET_MONGODB_PARAMS`.
    EnvInline,
    /// Individual `$DOCKET_MONGODB_*` variables.
    EnvVars,
}

/// Driver tuning layered over whatever the connection URI specifies.
///
/// Unset fields defer to the URI's query parameters; set fields win.
/// The pool size falls back to 10 connections when neither supplies
/// one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverOptions {
    /// Upper bound on pooled connections per server.
    pub max_pool_size: Option<u32>,
    /// Connections the pool keeps warm per server.
    pub min_pool_size: Option<u32>,
    /// TCP connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
    /// How long (ms) the driver looks for a usable server before an
    /// operation fails. Lower this in tests that expect to miss.
    pub server_selection_timeout_ms: Option<u64>,
    /// Application name reported to the server.
    pub app_name: Option<String>,
    /// Skip topology discovery and talk to the seed host directly.
    pub direct_connection: Option<bool>,
}

impl DriverOptions {
    /// Layer these options over `options` parsed from a URI.
    pub fn apply_to(&self, options: &mut ClientOptions) {
        options.max_pool_size = self
            .max_pool_size
            .or(options.max_pool_size)
            .or(Some(DEFAULT_MAX_POOL_SIZE));
        if let Some(size) = self.min_pool_size {
            options.min_pool_size = Some(size);
        }
        if let Some(ms) = self.connect_timeout_ms {
            options.connect_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(ms) = self.server_selection_timeout_ms {
            options.server_selection_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(name) = &self.app_name {
            options.app_name = Some(name.clone());
        }
        if let Some(direct) = self.direct_connection {
            options.direct_connection = Some(direct);
        }
    }
}

/// Everything needed to establish a [`Connection`](crate::Connection).
///
/// Parameters are read once before connecting and never consulted
/// again; changing the environment afterwards has no effect on an
/// established connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// MongoDB connection string (`mongodb://` or `mongodb+srv://`).
    pub uri: String,
    /// Database the connection is scoped to.
    pub database: String,
    /// Driver tuning layered over the URI.
    #[serde(default)]
    pub options: DriverOptions,
    /// Retries after the initial attempt before giving up.
    #[serde(default = "default_maximum_connection_attempts")]
    pub maximum_connection_attempts: u32,
    /// Pause between attempts, in milliseconds. No pause when unset.
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,
}

impl ConnectionParams {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            options: DriverOptions::default(),
            maximum_connection_attempts: default_maximum_connection_attempts(),
            retry_delay_ms: None,
        }
    }

    /// Load connection parameters using environment variables.
    /// Evaluation order:
    /// 1) `$DOCKET_MONGODB_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$DOCKET_MONGODB_PARAMS` (inline JSON),
    /// 3) `$DOCKET_MONGODB_URI` plus `$DOCKET_MONGODB_DATABASE`, with
    ///    `$DOCKET_MONGODB_MAX_ATTEMPTS` optionally overriding the
    ///    retry budget.
    ///
    /// A `.env` file in the working directory is honoured first when
    /// present; a malformed one is an error.
    pub fn load_from_env() -> anyhow::Result<(Self, ParamsSource)> {
        tolerate_missing_env_file(dotenvy::dotenv())?;
        Self::resolve(|key| env::var(key).ok())
    }

    fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<(Self, ParamsSource)> {
        if let Some(path) = lookup(CONFIG_PATH_VAR)
            && !path.trim().is_empty()
        {
            let path = PathBuf::from(path);
            let params = Self::load_from_file(&path)?;
            return Ok((params, ParamsSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(PARAMS_VAR)
            && !raw.trim().is_empty()
        {
            let params = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {PARAMS_VAR}"))?;
            return Ok((params, ParamsSource::EnvInline));
        }

        let uri = lookup(URI_VAR)
            .filter(|uri| !uri.trim().is_empty())
            .with_context(|| format!("{URI_VAR} is not set"))?;
        let database = lookup(DATABASE_VAR)
            .filter(|name| !name.trim().is_empty())
            .with_context(|| format!("{DATABASE_VAR} is not set"))?;
        let mut params = Self::new(uri, database);

        if let Some(raw) = lookup(MAX_ATTEMPTS_VAR)
            && !raw.trim().is_empty()
        {
            params.maximum_connection_attempts = raw
                .parse()
                .with_context(|| format!("invalid {MAX_ATTEMPTS_VAR}: {raw}"))?;
        }

        Ok((params, ParamsSource::EnvVars))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read connection params from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid connection params {}", path.display())
            }),
            Some("toml") | Some("tml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid connection params {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse connection params {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid connection params json: {err}"))
    }
}

/// A missing `.env` file is expected; any other load failure surfaces.
fn tolerate_missing_env_file<T>(
    result: Result<T, dotenvy::Error>,
) -> anyhow::Result<()> {
    match result {
        Ok(_) | Err(dotenvy::Error::Io(_)) => Ok(()),
        Err(err) => Err(err).context("failed to load .env file"),
    }
}
