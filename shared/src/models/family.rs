//! Product family / sub-family models

use serde::{Deserialize, Serialize};

/// Product family (e.g. breads, pastries)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    pub name: String,
}

impl Family {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

/// Product sub-family, attached to a family by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubFamily {
    pub id: String,
    pub name: String,
    /// Parent family name
    pub family: String,
}

impl SubFamily {
    pub fn new(name: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            family: family.into(),
        }
    }
}
