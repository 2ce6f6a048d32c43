//! Recipe sheet print payload
//!
//! Lays a production recipe out on an A4 sheet: title and yield on top,
//! ingredients in the left column, numbered steps in the right column.
//! Block anchors are calibratable; lines inside a block flow downward at
//! a fixed line height.

use shared::layout::{FieldOverride, FieldPosition, PlacedText, PrintDocument, RECIPE_PAGE};
use shared::models::{Recipe, RecipeIngredient};
use std::collections::HashMap;

use crate::text::wrap_text;

/// Vertical advance between lines inside a block, in mm.
const LINE_HEIGHT_MM: f32 = 6.0;

/// Maximum characters per step line in the right column.
const STEP_WRAP_WIDTH: usize = 48;

/// Recipe sheet fields (block anchors) and their default placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeField {
    Title,
    Yield,
    Ingredients,
    Steps,
}

impl RecipeField {
    pub const ALL: [RecipeField; 4] = [
        RecipeField::Title,
        RecipeField::Yield,
        RecipeField::Ingredients,
        RecipeField::Steps,
    ];

    /// Semantic key, also the key in persisted calibration maps.
    pub fn key(&self) -> &'static str {
        match self {
            RecipeField::Title => "title",
            RecipeField::Yield => "yield",
            RecipeField::Ingredients => "ingredients",
            RecipeField::Steps => "steps",
        }
    }

    /// Built-in placement on the A4 page.
    pub fn default_position(&self) -> FieldPosition {
        match self {
            RecipeField::Title => FieldPosition::new(20.0, 22.0, 16.0),
            RecipeField::Yield => FieldPosition::new(20.0, 34.0, 11.0),
            RecipeField::Ingredients => FieldPosition::new(20.0, 48.0, 10.0),
            RecipeField::Steps => FieldPosition::new(90.0, 48.0, 10.0),
        }
    }
}

fn ingredient_line(ingredient: &RecipeIngredient) -> String {
    match (&ingredient.quantity, &ingredient.unit) {
        (Some(qty), Some(unit)) => format!("{} {} {}", qty.normalize(), unit, ingredient.name),
        (Some(qty), None) => format!("{} {}", qty.normalize(), ingredient.name),
        _ => ingredient.name.clone(),
    }
}

/// Build the print payload for one recipe sheet.
///
/// `overrides` is the calibration map keyed by [`RecipeField::key`] and
/// moves whole blocks; deterministic for identical input.
pub fn build_recipe_sheet(
    recipe: &Recipe,
    overrides: &HashMap<String, FieldOverride>,
) -> PrintDocument {
    let resolve = |field: RecipeField| {
        let default = field.default_position();
        match overrides.get(field.key()) {
            Some(ov) => default.with_override(ov),
            None => default,
        }
    };

    tracing::debug!(recipe = %recipe.name, "building recipe sheet payload");

    let mut texts = vec![PlacedText {
        field: RecipeField::Title.key().to_string(),
        text: recipe.name.clone(),
        position: resolve(RecipeField::Title),
    }];

    if let Some(yield_label) = &recipe.yield_label {
        texts.push(PlacedText {
            field: RecipeField::Yield.key().to_string(),
            text: format!("Rendement: {yield_label}"),
            position: resolve(RecipeField::Yield),
        });
    }

    let ingredients_anchor = resolve(RecipeField::Ingredients);
    texts.push(PlacedText {
        field: RecipeField::Ingredients.key().to_string(),
        text: "Ingrédients".to_string(),
        position: ingredients_anchor,
    });
    for (i, ingredient) in recipe.ingredients.iter().enumerate() {
        texts.push(PlacedText {
            field: RecipeField::Ingredients.key().to_string(),
            text: format!("- {}", ingredient_line(ingredient)),
            position: FieldPosition {
                top: ingredients_anchor.top + (i as f32 + 1.0) * LINE_HEIGHT_MM,
                ..ingredients_anchor
            },
        });
    }

    let steps_anchor = resolve(RecipeField::Steps);
    texts.push(PlacedText {
        field: RecipeField::Steps.key().to_string(),
        text: "Préparation".to_string(),
        position: steps_anchor,
    });
    let mut line_no = 1usize;
    for (i, step) in recipe.steps.iter().enumerate() {
        for (j, line) in wrap_text(&format!("{}. {}", i + 1, step), STEP_WRAP_WIDTH)
            .into_iter()
            .enumerate()
        {
            texts.push(PlacedText {
                field: RecipeField::Steps.key().to_string(),
                // continuation lines are indented under the step number
                text: if j == 0 { line } else { format!("   {line}") },
                position: FieldPosition {
                    top: steps_anchor.top + line_no as f32 * LINE_HEIGHT_MM,
                    ..steps_anchor
                },
            });
            line_no += 1;
        }
    }

    PrintDocument {
        title: format!("Fiche recette {}", recipe.name),
        page: RECIPE_PAGE,
        texts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn croissants() -> Recipe {
        Recipe {
            id: "r-1".to_string(),
            name: "Croissants".to_string(),
            yield_label: Some("24 pièces".to_string()),
            ingredients: vec![
                RecipeIngredient {
                    name: "farine T45".to_string(),
                    quantity: Some(Decimal::from(1000)),
                    unit: Some("g".to_string()),
                },
                RecipeIngredient {
                    name: "beurre de tourage".to_string(),
                    quantity: Some(Decimal::new(5000, 1)),
                    unit: Some("g".to_string()),
                },
                RecipeIngredient {
                    name: "sel fin".to_string(),
                    quantity: None,
                    unit: None,
                },
            ],
            steps: vec![
                "Pétrir la détrempe et laisser pointer une heure.".to_string(),
                "Tourer avec le beurre: un tour double puis un tour simple.".to_string(),
            ],
        }
    }

    #[test]
    fn test_blocks_flow_downward() {
        let doc = build_recipe_sheet(&croissants(), &HashMap::new());
        let tops: Vec<f32> = doc
            .texts
            .iter()
            .filter(|t| t.field == "ingredients")
            .map(|t| t.position.top)
            .collect();
        assert_eq!(tops.len(), 4); // header + 3 ingredient lines
        for pair in tops.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_ingredient_lines_formatted() {
        let doc = build_recipe_sheet(&croissants(), &HashMap::new());
        let lines: Vec<&str> = doc
            .texts
            .iter()
            .filter(|t| t.field == "ingredients")
            .map(|t| t.text.as_str())
            .collect();
        assert!(lines.contains(&"- 1000 g farine T45"));
        // trailing zeros dropped from quantities
        assert!(lines.contains(&"- 500 g beurre de tourage"));
        assert!(lines.contains(&"- sel fin"));
    }

    #[test]
    fn test_steps_numbered_and_wrapped() {
        let doc = build_recipe_sheet(&croissants(), &HashMap::new());
        let steps: Vec<&str> = doc
            .texts
            .iter()
            .filter(|t| t.field == "steps")
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(steps[0], "Préparation");
        assert!(steps[1].starts_with("1. "));
        assert!(steps.iter().any(|s| s.starts_with("2. ")));
        for step in &steps {
            assert!(step.chars().count() <= STEP_WRAP_WIDTH + 3);
        }
    }

    #[test]
    fn test_block_override_moves_whole_block() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "steps".to_string(),
            FieldOverride {
                left: Some(110.0),
                ..Default::default()
            },
        );
        let doc = build_recipe_sheet(&croissants(), &overrides);
        for t in doc.texts.iter().filter(|t| t.field == "steps") {
            assert_eq!(t.position.left, 110.0);
        }
        let title = doc.texts.iter().find(|t| t.field == "title").unwrap();
        assert_eq!(title.position, RecipeField::Title.default_position());
    }

    #[test]
    fn test_missing_yield_omitted() {
        let mut recipe = croissants();
        recipe.yield_label = None;
        let doc = build_recipe_sheet(&recipe, &HashMap::new());
        assert!(!doc.texts.iter().any(|t| t.field == "yield"));
    }
}
