use bson::Document;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docket_core::error::Result;
use docket_core::repository::EntityCodec;
use docket_model::Entity;

/// Work item used across behaviour tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub priority: i32,
    pub open: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(title: &str, priority: i32) -> Self {
        Self {
            id: ObjectId::new(),
            title: title.to_string(),
            priority,
            open: true,
            created_at: millisecond_now(),
        }
    }
}

impl Entity for Ticket {
    fn id(&self) -> ObjectId {
        self.id
    }
}

/// BSON datetimes carry millisecond precision, so fixtures start from a
/// truncated timestamp to keep round-trip equality exact.
pub fn millisecond_now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(Utc::now().timestamp_millis())
        .unwrap_or_default()
}

fn default_open() -> bool {
    true
}

/// Pre-migration ticket layout: the title lived in `summary`, the
/// priority in `level`, and timestamps were stored as epoch millis.
#[derive(Debug, Serialize, Deserialize)]
struct LegacyTicket {
    #[serde(rename = "_id")]
    id: ObjectId,
    summary: String,
    level: i32,
    #[serde(default = "default_open")]
    open: bool,
    created_at: i64,
}

/// Codec that keeps reading and writing the legacy ticket layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyTicketCodec;

impl EntityCodec<Ticket> for LegacyTicketCodec {
    fn to_document(&self, entity: &Ticket) -> Result<Document> {
        let legacy = LegacyTicket {
            id: entity.id,
            summary: entity.title.clone(),
            level: entity.priority,
            open: entity.open,
            created_at: entity.created_at.timestamp_millis(),
        };
        Ok(bson::to_document(&legacy)?)
    }

    fn from_document(&self, document: Document) -> Result<Ticket> {
        let legacy: LegacyTicket = bson::from_document(document)?;
        Ok(Ticket {
            id: legacy.id,
            title: legacy.summary,
            priority: legacy.level,
            open: legacy.open,
            created_at: DateTime::from_timestamp_millis(legacy.created_at)
                .unwrap_or_default(),
        })
    }
}
