use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub capacity: i32,
    pub is_available: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewResourceParams {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub capacity: i32,
    pub is_available: bool,
}

impl Resource {
    pub fn new(params: NewResourceParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            location: params.location,
            capacity: params.capacity,
            is_available: params.is_available,
            version: 1,
            created_at: Utc::now(),
        }
    }

    /// Replaces every editable field, keeping identity and bookkeeping columns.
    pub fn apply(&mut self, params: NewResourceParams) {
        self.name = params.name;
        self.description = params.description;
        self.location = params.location;
        self.capacity = params.capacity;
        self.is_available = params.is_available;
    }
}

/// Entry of the resource select list shown on booking forms.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ResourceOption {
    pub id: String,
    pub name: String,
}
