//! Joining a group as a participant.

use sea_orm::ConnectionTrait;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::participants::Participant;
use crate::repos::{groups, participants};
use crate::utils::anonymous_name::generate_anonymous_name;

const MAX_NAME_ATTEMPTS: usize = 100;

/// Join the group behind `group_code` as `user_id`.
///
/// Idempotent per user and group: joining twice returns the existing
/// participant. Returns `(participant, newly_joined)`.
pub async fn join_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    group_code: &str,
) -> Result<(Participant, bool), DomainError> {
    let group = groups::find_by_code(conn, group_code).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Group,
            format!("No group with code {group_code}"),
        )
    })?;

    if let Some(existing) = participants::find_by_group_and_user(conn, group.id, user_id).await? {
        return Ok((existing, false));
    }

    // Membership is frozen once the assignments exist; a latecomer would
    // have no giver and no receiver.
    if group.drawn {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyDrawn,
            format!("group {} has already been drawn", group.id),
        ));
    }

    let existing = participants::list_for_group(conn, group.id).await?;
    let anonymous_name = pick_unique_name(&existing);

    let participant =
        participants::create_participant(conn, group.id, user_id, &anonymous_name).await?;
    Ok((participant, true))
}

/// Pick an anonymous name not yet used in the group. After too many
/// collisions, disambiguate with a numeric suffix to guarantee termination.
fn pick_unique_name(existing: &[Participant]) -> String {
    let taken = |name: &str| existing.iter().any(|p| p.anonymous_name == name);

    for _ in 0..MAX_NAME_ATTEMPTS {
        let candidate = generate_anonymous_name();
        if !taken(&candidate) {
            return candidate;
        }
    }

    let mut suffix = existing.len() + 1;
    loop {
        let candidate = format!("{} {}", generate_anonymous_name(), suffix);
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
