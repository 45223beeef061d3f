use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged search term. The row id is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub term: String,
    pub when: DateTime<Utc>,
}
