use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Canonical category record. Categories are referenced by products but
/// never created or mutated by this application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
