use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DeduplicationKey;

/// Metadata needed to construct an event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    pub user_id: Uuid,
    pub order_id: Option<Uuid>,
    pub admin_id: Option<Uuid>,
    pub deduplication_key: DeduplicationKey,
    pub timestamp: DateTime<Utc>,
}
