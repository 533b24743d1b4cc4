//! Recipe text model: structured wizard rows flattened into newline-delimited
//! text blobs, plus the display-only decode used by cook-mode.
//!
//! The flatten direction is lossy on purpose: `ingredients_text` and
//! `steps_text` are stored as human-editable text, and editing re-parses via
//! generic line splitting. The decode helpers here recover display lines, not
//! the original per-field structure.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Units that concatenate directly with the amount ("200g"). Every other unit
/// joins with a space ("2 tazas").
const COMPACT_UNITS: [&str; 4] = ["g", "kg", "ml", "l"];

/// Unit choices offered by the wizard's ingredient rows.
pub const UNIT_OPTIONS: [&str; 10] = [
    "pieza", "taza", "cda", "cdta", "g", "kg", "ml", "l", "pizca", "al gusto",
];

/// Leading numbered-step prefix: `1. `, `2) `, `3 - `.
///
/// An earlier encoding numbered steps; the canonical encoding does not. The
/// decoder accepts both so stored text from either era renders correctly.
static STEP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*[.)-]\s*").expect("valid step prefix pattern"));

/// One structured ingredient row from the wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientRow {
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
}

/// One structured step row from the wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepRow {
    pub text: String,
    /// Optional specification appended as ` [spec: ...]` (e.g. temperature,
    /// timing).
    #[serde(default)]
    pub spec: String,
}

/// Flatten ingredient rows into the stored text blob.
///
/// Rows with an empty name are skipped. Shapes:
/// - no amount: `- {name}`
/// - amount, no unit: `- {amount} de {name}`
/// - compact unit: `- 200g de {name}`
/// - other unit: `- 2 tazas de {name}`
pub fn ingredients_to_text(rows: &[IngredientRow]) -> String {
    rows.iter()
        .filter(|r| !r.name.trim().is_empty())
        .map(|r| {
            let name = r.name.trim();
            let amount = r.amount.trim();
            let unit = r.unit.trim();
            if amount.is_empty() {
                format!("- {name}")
            } else if unit.is_empty() {
                format!("- {amount} de {name}")
            } else if COMPACT_UNITS.contains(&unit) {
                format!("- {amount}{unit} de {name}")
            } else {
                format!("- {amount} {unit} de {name}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flatten step rows into the stored text blob.
///
/// Rows with empty text are dropped; a non-empty spec is appended as
/// ` [spec: {spec}]`.
pub fn steps_to_text(rows: &[StepRow]) -> String {
    rows.iter()
        .filter(|r| !r.text.trim().is_empty())
        .map(|r| {
            let base = r.text.trim();
            let spec = r.spec.trim();
            if spec.is_empty() {
                base.to_string()
            } else {
                format!("{base} [spec: {spec}]")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a text blob into trimmed, non-empty lines.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decode steps text for display: one entry per line, legacy numbered
/// prefixes (`1. `, `2) `, `3 - `) stripped.
pub fn parse_steps(text: &str) -> Vec<String> {
    parse_lines(text)
        .iter()
        .map(|l| STEP_PREFIX.replace(l, "").into_owned())
        .collect()
}

/// Strip the leading `- ` bullet from an ingredient line for checklist
/// display.
pub fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches('-').trim_start()
}

/// Rewrite steps text into the canonical un-numbered encoding.
///
/// Applied on every write so legacy numbered text migrates opportunistically.
pub fn normalize_steps_text(text: &str) -> String {
    parse_steps(text).join("\n")
}
