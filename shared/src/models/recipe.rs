//! Production recipe model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    /// Quantity in `unit` (None for "to taste" lines)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Production recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Yield description, e.g. "24 croissants" or "3 kg de pâte"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yield_label: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered preparation steps
    #[serde(default)]
    pub steps: Vec<String>,
}
