//! Recipe-creation wizard: step definitions and save-time validation.
//!
//! The wizard is a fixed four-step sequence with linear next/back movement.
//! Moving between steps is never gated on content; all validation happens at
//! the final save, before anything is written.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::text;

/// The four steps of the recipe wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    NamePhoto,
    Ingredients,
    Steps,
    Details,
}

/// Total number of wizard steps.
pub const TOTAL_STEPS: u8 = 4;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 4;

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::NamePhoto),
            2 => Ok(Self::Ingredients),
            3 => Ok(Self::Steps),
            4 => Ok(Self::Details),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::NamePhoto => 1,
            Self::Ingredients => 2,
            Self::Steps => 3,
            Self::Details => 4,
        }
    }

    /// Human-readable label shown above the progress bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::NamePhoto => "Nombre y foto",
            Self::Ingredients => "Ingredientes",
            Self::Steps => "Instrucciones",
            Self::Details => "Detalles",
        }
    }
}

/// Validate a step transition.
///
/// Only moving exactly one step forward or backward is allowed; the wizard
/// has no skip affordance.
pub fn validate_step_transition(current: u8, next: u8) -> Result<(), CoreError> {
    if !(MIN_STEP..=MAX_STEP).contains(&current) {
        return Err(CoreError::Validation(format!(
            "Current step {current} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    if !(MIN_STEP..=MAX_STEP).contains(&next) {
        return Err(CoreError::Validation(format!(
            "Next step {next} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }

    let diff = i16::from(next) - i16::from(current);
    if diff != 1 && diff != -1 {
        return Err(CoreError::Validation(format!(
            "Cannot transition from step {current} to step {next}. \
             Must advance or go back exactly one step."
        )));
    }

    Ok(())
}

/// Validate a finished draft at save time.
///
/// Checks run against the already-encoded text blobs, in the order the save
/// button reports them: title, ingredients, steps. The first failure aborts
/// with its user-facing message and nothing is written.
pub fn validate_draft(
    title: &str,
    ingredients_text: &str,
    steps_text: &str,
) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Pon el nombre de la receta.".to_string(),
        ));
    }
    if text::parse_lines(ingredients_text).is_empty() {
        return Err(CoreError::Validation(
            "Agrega al menos un ingrediente.".to_string(),
        ));
    }
    if text::parse_lines(steps_text).is_empty() {
        return Err(CoreError::Validation(
            "Agrega al menos un paso.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{ingredients_to_text, steps_to_text, IngredientRow, StepRow};

    #[test]
    fn step_from_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            let step = WizardStep::from_number(n).unwrap();
            assert_eq!(step.to_number(), n);
            assert!(!step.label().is_empty());
        }
    }

    #[test]
    fn step_from_number_invalid() {
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(5).is_err());
    }

    #[test]
    fn transition_by_one_is_valid() {
        for current in MIN_STEP..MAX_STEP {
            assert!(validate_step_transition(current, current + 1).is_ok());
            assert!(validate_step_transition(current + 1, current).is_ok());
        }
    }

    #[test]
    fn transition_skipping_is_invalid() {
        assert!(validate_step_transition(1, 3).is_err());
        assert!(validate_step_transition(4, 2).is_err());
        assert!(validate_step_transition(2, 2).is_err());
        assert!(validate_step_transition(0, 1).is_err());
        assert!(validate_step_transition(4, 5).is_err());
    }

    #[test]
    fn draft_requires_title() {
        let ingredients = ingredients_to_text(&[IngredientRow {
            name: "Sal".into(),
            ..Default::default()
        }]);
        let steps = steps_to_text(&[StepRow { text: "Mezclar".into(), ..Default::default() }]);

        let err = validate_draft("  ", &ingredients, &steps).unwrap_err();
        assert!(err.to_string().contains("Pon el nombre de la receta."));
    }

    #[test]
    fn draft_requires_ingredients_and_steps() {
        let err = validate_draft("Mole", "", "Mezclar").unwrap_err();
        assert!(err.to_string().contains("Agrega al menos un ingrediente."));

        let err = validate_draft("Mole", "- Sal", "  \n ").unwrap_err();
        assert!(err.to_string().contains("Agrega al menos un paso."));
    }

    #[test]
    fn complete_draft_passes() {
        assert!(validate_draft("Mole", "- Sal", "Mezclar").is_ok());
    }
}
