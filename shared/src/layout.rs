//! Print layout primitives
//!
//! Positions are physical offsets in millimetres from the top-left corner
//! of the page; font sizes are in points. Calibration overrides are
//! partial: a sub-field left out of an override falls back to the
//! built-in default for that field, never to an earlier override's value.

use serde::{Deserialize, Serialize};

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

/// Bank cheque, landscape.
pub const CHEQUE_PAGE: PageSize = PageSize {
    width_mm: 175.0,
    height_mm: 80.0,
};

/// Recipe sheet, A4 portrait.
pub const RECIPE_PAGE: PageSize = PageSize {
    width_mm: 210.0,
    height_mm: 297.0,
};

/// Resolved placement of a text field on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPosition {
    /// Left offset in mm
    pub left: f32,
    /// Top offset in mm
    pub top: f32,
    /// Font size in points
    pub font_size: f32,
}

impl FieldPosition {
    pub const fn new(left: f32, top: f32, font_size: f32) -> Self {
        Self {
            left,
            top,
            font_size,
        }
    }

    /// Apply a partial override on top of this (default) position.
    ///
    /// Merge is shallow per field object: each sub-field is taken from the
    /// override when present, from `self` otherwise.
    pub fn with_override(self, ov: &FieldOverride) -> FieldPosition {
        FieldPosition {
            left: ov.left.unwrap_or(self.left),
            top: ov.top.unwrap_or(self.top),
            font_size: ov.font_size.unwrap_or(self.font_size),
        }
    }
}

/// Partial override of a single field position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

/// A text field resolved to its final placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedText {
    /// Semantic key of the field (e.g. "amount_words")
    pub field: String,
    pub text: String,
    pub position: FieldPosition,
}

/// A fully resolved print payload, ready for page rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintDocument {
    pub title: String,
    pub page: PageSize,
    pub texts: Vec<PlacedText>,
}

/// Kind of printable document.
///
/// Doubles as the persistence key for the last-used layout calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Cheque,
    RecipeSheet,
}

impl DocumentKind {
    /// Key under which calibration overrides for this kind are cached.
    pub fn storage_key(&self) -> &'static str {
        match self {
            DocumentKind::Cheque => "layout.cheque",
            DocumentKind::RecipeSheet => "layout.recipe_sheet",
        }
    }
}
