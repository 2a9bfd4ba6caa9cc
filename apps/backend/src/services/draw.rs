//! The draw orchestrator: validates a group, generates the derangement and
//! commits the assignment set together with the `drawn` flip.
//!
//! Must run inside a single transaction (`with_txn` at the route layer):
//! either the flag flip and all N assignment rows land together, or nothing
//! does. Concurrent draws of the same group are decided by the
//! compare-and-swap on `drawn`; application code never takes locks.

use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::domain::derangement::generate_derangement;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::{assignments, groups, participants, users, wishes};

/// Result of a committed draw, with everything the caller needs for the
/// post-commit notification fan-out.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub group: groups::Group,
    pub assignment_count: usize,
    /// Phone numbers of participants reachable by SMS.
    pub recipient_phones: Vec<String>,
}

/// Execute the draw for a group on behalf of `requester_user_id`.
///
/// Preconditions are checked in order, short-circuiting on the first
/// failure: group exists, requester is the creator, not yet drawn, at least
/// two participants, every participant has a wish. Only then is the
/// derangement generated and committed.
pub async fn run_draw<C, R>(
    conn: &C,
    group_id: i64,
    requester_user_id: i64,
    rng: &mut R,
) -> Result<DrawOutcome, DomainError>
where
    C: ConnectionTrait + Send + Sync,
    R: Rng + ?Sized,
{
    let group = groups::require_group(conn, group_id).await?;

    if group.created_by != requester_user_id {
        return Err(DomainError::forbidden(
            "only the group creator can run the draw",
        ));
    }

    if group.drawn {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyDrawn,
            format!("group {group_id} has already been drawn"),
        ));
    }

    let group_participants = participants::list_for_group(conn, group_id).await?;
    if group_participants.len() < 2 {
        return Err(DomainError::validation(
            ValidationKind::InsufficientParticipants,
            format!(
                "need at least 2 participants to draw, got {}",
                group_participants.len()
            ),
        ));
    }

    let participant_ids: Vec<i64> = group_participants.iter().map(|p| p.id).collect();

    let group_wishes = wishes::list_for_participants(conn, participant_ids.clone()).await?;
    let wishless: Vec<&str> = group_participants
        .iter()
        .filter(|p| !group_wishes.iter().any(|w| w.participant_id == p.id))
        .map(|p| p.anonymous_name.as_str())
        .collect();
    if !wishless.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::IncompleteWishLists,
            format!(
                "participants without wishes: {}",
                wishless.join(", ")
            ),
        ));
    }

    let pairs = generate_derangement(&participant_ids, rng)?;

    // Claim the draw before writing assignments. Of any concurrent racers
    // exactly one sees the flip succeed; the rest roll back here.
    if !groups::mark_drawn(conn, group_id).await? {
        return Err(DomainError::conflict(
            ConflictKind::DrawRace,
            format!("group {group_id} was drawn by a concurrent request"),
        ));
    }

    assignments::insert_all(conn, group_id, &pairs).await?;

    tracing::info!(
        group_id,
        participants = pairs.len(),
        "draw committed"
    );

    let user_ids: Vec<i64> = group_participants.iter().map(|p| p.user_id).collect();
    let recipient_phones = users::find_by_ids(conn, user_ids)
        .await?
        .into_iter()
        .filter_map(|u| u.phone)
        .collect();

    Ok(DrawOutcome {
        assignment_count: pairs.len(),
        recipient_phones,
        group,
    })
}
