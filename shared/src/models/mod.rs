//! Record models
//!
//! Typed models exist only where the suite constructs rows itself
//! (reference seeding, recipe sheets). Rows migrated from the legacy
//! client or moved through backup bundles stay opaque JSON values.

mod family;
mod recipe;
mod tier_type;

pub use family::{Family, SubFamily};
pub use recipe::{Recipe, RecipeIngredient};
pub use tier_type::TierType;
