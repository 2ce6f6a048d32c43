//! Tier type model
//!
//! "Tiers" are third parties in the accounting sense; the type classifies
//! them (client, supplier).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierType {
    pub id: String,
    pub name: String,
}

impl TierType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}
