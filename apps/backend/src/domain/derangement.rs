//! Random derangement generation for the gift draw.
//!
//! A derangement is a permutation with no fixed points: nobody may be
//! assigned to themselves. Generation uses rejection sampling over uniform
//! shuffles, which yields a uniformly distributed derangement whenever it
//! accepts; the expected number of attempts converges to e ≈ 2.718
//! independent of n, so the attempt cap exists only as a safety net.

use std::collections::HashSet;

use rand::Rng;

use crate::errors::domain::{DomainError, ValidationKind};

/// Upper bound on shuffle attempts before falling back to the rotation
/// derangement. Reaching it is astronomically unlikely.
pub const MAX_SHUFFLE_ATTEMPTS: u32 = 1000;

/// Generate a random derangement of `ids` as (giver, receiver) pairs.
///
/// The RNG is injected so callers control determinism: production passes
/// `rand::rng()`, tests pass a seeded generator.
///
/// # Errors
/// - `Validation(InsufficientParticipants)` for fewer than 2 ids.
/// - `Invariant` if the result fails the bijection/fixed-point post-condition;
///   this must never happen and indicates a logic defect, not bad input.
pub fn generate_derangement<R: Rng + ?Sized>(
    ids: &[i64],
    rng: &mut R,
) -> Result<Vec<(i64, i64)>, DomainError> {
    if ids.len() < 2 {
        return Err(DomainError::validation(
            ValidationKind::InsufficientParticipants,
            format!("need at least 2 participants, got {}", ids.len()),
        ));
    }

    let mut receivers = ids.to_vec();
    let mut accepted = false;
    for _ in 0..MAX_SHUFFLE_ATTEMPTS {
        shuffle(&mut receivers, rng);
        if !has_fixed_point(ids, &receivers) {
            accepted = true;
            break;
        }
    }

    if !accepted {
        // Last-resort deterministic fallback: rotate by one. Always a valid
        // derangement for n >= 2, at the cost of not being uniformly drawn.
        receivers = rotation_derangement(ids);
    }

    verify_derangement(ids, &receivers)?;

    Ok(ids.iter().copied().zip(receivers).collect())
}

/// Fisher-Yates shuffle, as in the dealing logic this generator grew out of.
fn shuffle<R: Rng + ?Sized>(xs: &mut [i64], rng: &mut R) {
    for i in (1..xs.len()).rev() {
        let j = rng.random_range(0..=i);
        xs.swap(i, j);
    }
}

fn has_fixed_point(givers: &[i64], receivers: &[i64]) -> bool {
    givers.iter().zip(receivers).any(|(g, r)| g == r)
}

/// The fixed fallback derangement: `receivers[i] = ids[(i + 1) mod n]`.
fn rotation_derangement(ids: &[i64]) -> Vec<i64> {
    let n = ids.len();
    (0..n).map(|i| ids[(i + 1) % n]).collect()
}

/// Defensive post-condition, executed on every path: the receiver sequence
/// must be a bijection on the giver set with no fixed point. A failure here
/// is a programming defect and must not be repaired at this point.
fn verify_derangement(givers: &[i64], receivers: &[i64]) -> Result<(), DomainError> {
    if givers.len() != receivers.len() {
        return Err(DomainError::invariant(format!(
            "expected {} receivers, got {}",
            givers.len(),
            receivers.len()
        )));
    }

    let giver_set: HashSet<i64> = givers.iter().copied().collect();
    let receiver_set: HashSet<i64> = receivers.iter().copied().collect();
    if receiver_set.len() != givers.len() || giver_set != receiver_set {
        return Err(DomainError::invariant(
            "receiver set is not a bijection of the participant set".to_string(),
        ));
    }

    if has_fixed_point(givers, receivers) {
        return Err(DomainError::invariant(
            "derangement contains a fixed point".to_string(),
        ));
    }

    Ok(())
}
