//! Join code generation for groups.
//!
//! Group codes are short, human-enterable strings drawn from a restricted
//! alphabet that omits visually ambiguous characters.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789"; // no I, O, 0, 1
const CODE_LEN: usize = 6;

/// Generate a candidate join code for a group.
///
/// Uniqueness is enforced by the caller against the database; this only
/// guarantees shape and alphabet.
pub fn generate_group_code() -> String {
    let mut rng = rand::rng();

    let mut s = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        let idx = rng.random_range(0..ALPHABET.len());
        s.push(ALPHABET[idx] as char);
    }
    s
}
