//! Session code generation.

use rand::Rng;

use crosscircle_domain::SessionCode;

const CODE_LENGTH: usize = 6;

/// Generate a short shareable code of uppercase ASCII letters.
///
/// Uniqueness against live sessions is the coordinator's job, not ours.
pub fn generate() -> SessionCode {
    let mut rng = rand::thread_rng();
    let code: String = (0..CODE_LENGTH)
        .map(|_| char::from(b'A' + rng.gen_range(0..26)))
        .collect();
    SessionCode::new(code)
}
