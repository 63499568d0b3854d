//! Confirmation code generation.

use rand::Rng;

use crate::reservation::ConfirmationCode;

/// Produces confirmation codes for new reservations.
pub trait CodeGenerator: Send + Sync {
    /// Returns a fresh code.
    fn generate(&self) -> ConfirmationCode;
}

/// Draws each character uniformly from `[A-Z0-9]`.
///
/// Codes are not checked for uniqueness; with 36^6 possibilities a collision
/// is harmless because codes are only compared against a single reservation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> ConfirmationCode {
        let mut rng = rand::thread_rng();
        let code: String = (0..ConfirmationCode::LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..ConfirmationCode::ALPHABET.len());
                char::from(ConfirmationCode::ALPHABET[idx])
            })
            .collect();
        ConfirmationCode::from_generated(code)
    }
}
