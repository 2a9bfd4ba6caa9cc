//! Group creation and read services.

use sea_orm::ConnectionTrait;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::groups::{Group, GroupCreate};
use crate::repos::wishes::Wish;
use crate::repos::{groups, participants, wishes};
use crate::utils::group_code::generate_group_code;

/// How many candidate codes to try before giving up. With 32^6 codes a
/// second collision in a row already means something is wrong.
const MAX_CODE_ATTEMPTS: usize = 10;

#[derive(Debug, Clone)]
pub struct CreateGroupInput {
    pub name: String,
    pub description: Option<String>,
    pub draw_date: Option<time::OffsetDateTime>,
}

/// A participant together with their wish list, for the group page.
#[derive(Debug, Clone)]
pub struct ParticipantWithWishes {
    pub participant: participants::Participant,
    pub wishes: Vec<Wish>,
}

#[derive(Debug, Clone)]
pub struct GroupOverview {
    pub group: Group,
    pub participants: Vec<ParticipantWithWishes>,
}

/// A group seen from one member's perspective.
#[derive(Debug, Clone)]
pub struct MemberGroup {
    pub group: Group,
    pub participant_count: usize,
    pub my_anonymous_name: String,
}

/// Create a group with a fresh unique join code.
pub async fn create_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    creator_user_id: i64,
    input: CreateGroupInput,
) -> Result<Group, DomainError> {
    if input.name.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingField,
            "group name is required",
        ));
    }

    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_group_code();
        if groups::find_by_code(conn, &code).await?.is_some() {
            continue;
        }
        return groups::create_group(
            conn,
            GroupCreate {
                name: input.name.clone(),
                description: input.description.clone(),
                code,
                draw_date: input.draw_date,
                created_by: creator_user_id,
            },
        )
        .await;
    }

    Err(DomainError::conflict(
        ConflictKind::GroupCode,
        "could not find a free group code",
    ))
}

/// Load a group by join code together with its participants and wishes.
pub async fn group_overview<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<GroupOverview, DomainError> {
    let group = groups::find_by_code(conn, code).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Group, format!("No group with code {code}"))
    })?;

    let group_participants = participants::list_for_group(conn, group.id).await?;
    let participant_ids: Vec<i64> = group_participants.iter().map(|p| p.id).collect();
    let group_wishes = wishes::list_for_participants(conn, participant_ids).await?;

    let mut wishes_by_participant: std::collections::HashMap<i64, Vec<Wish>> =
        std::collections::HashMap::new();
    for wish in group_wishes {
        wishes_by_participant
            .entry(wish.participant_id)
            .or_default()
            .push(wish);
    }

    let participants = group_participants
        .into_iter()
        .map(|participant| ParticipantWithWishes {
            wishes: wishes_by_participant
                .remove(&participant.id)
                .unwrap_or_default(),
            participant,
        })
        .collect();

    Ok(GroupOverview {
        group,
        participants,
    })
}

/// All groups the user participates in, newest first.
pub async fn groups_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<MemberGroup>, DomainError> {
    let memberships = participants::list_for_user(conn, user_id).await?;

    let mut result = Vec::with_capacity(memberships.len());
    for membership in memberships {
        let group = groups::require_group(conn, membership.group_id).await?;
        let participant_count = participants::list_for_group(conn, group.id).await?.len();
        result.push(MemberGroup {
            group,
            participant_count,
            my_anonymous_name: membership.anonymous_name,
        });
    }
    Ok(result)
}
