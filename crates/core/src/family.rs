//! Join codes and family-scoped defaults.

use rand::Rng;

use crate::error::CoreError;

/// Join codes are exactly six decimal digits.
pub const JOIN_CODE_LEN: usize = 6;

/// Generate a random six-digit join code.
///
/// Uniqueness is not guaranteed here; the caller checks the generated code
/// against existing families and retries on collision.
pub fn generate_join_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.random_range(100_000..1_000_000u32).to_string()
}

/// Validate and normalize a user-entered join code.
pub fn validate_join_code(code: &str) -> Result<String, CoreError> {
    let code = code.trim();
    if code.len() != JOIN_CODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(
            "El código debe tener 6 dígitos.".to_string(),
        ));
    }
    Ok(code.to_string())
}

/// Validate and trim a member display name.
pub fn validate_display_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Pon tu nombre (ej. \"Abuela Lupita\").".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Title of the cookbook auto-created for a new member.
pub fn default_cookbook_title(display_name: &str) -> String {
    format!("Recetario de {}", display_name.trim())
}
