#![allow(dead_code)]

use std::sync::Arc;

use backend::config::db::DbProfile;
use backend::infra::state::build_state;
use backend::notify::NoopNotifier;
use backend::repos::groups::Group;
use backend::repos::participants::Participant;
use backend::repos::users::User;
use backend::repos::wishes::{Wish, WishCreate};
use backend::services;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use sea_orm::DatabaseConnection;

pub const TEST_JWT_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

/// Fresh in-memory database, migrated, with a noop notifier.
pub async fn test_state() -> AppState {
    build_state()
        .with_db(DbProfile::Test)
        .with_security(SecurityConfig::new(TEST_JWT_SECRET))
        .with_notifier(Arc::new(NoopNotifier))
        .build()
        .await
        .expect("failed to build test state")
}

pub fn db(state: &AppState) -> &DatabaseConnection {
    state.db().expect("test state should have a database")
}

pub async fn seed_user(conn: &DatabaseConnection, phone: &str, name: &str) -> User {
    services::users::login(conn, phone, name)
        .await
        .expect("seed user")
}

pub async fn seed_group(conn: &DatabaseConnection, creator: &User, name: &str) -> Group {
    services::groups::create_group(
        conn,
        creator.id,
        services::groups::CreateGroupInput {
            name: name.to_string(),
            description: None,
            draw_date: None,
        },
    )
    .await
    .expect("seed group")
}

pub async fn seed_participant(
    conn: &DatabaseConnection,
    group: &Group,
    user: &User,
) -> Participant {
    let (participant, _) = services::participants::join_group(conn, user.id, &group.code)
        .await
        .expect("seed participant");
    participant
}

pub async fn seed_wish(
    conn: &DatabaseConnection,
    participant: &Participant,
    title: &str,
) -> Wish {
    backend::repos::wishes::create_wish(
        conn,
        WishCreate {
            participant_id: participant.id,
            title: title.to_string(),
            description: None,
            url: None,
            priority: 0,
        },
    )
    .await
    .expect("seed wish")
}

/// A group of `n` users, all joined, each with one wish. Returns the
/// creator, the group and the participants in join order.
pub async fn seed_ready_group(
    conn: &DatabaseConnection,
    n: usize,
) -> (User, Group, Vec<Participant>) {
    assert!(n >= 1);

    let creator = seed_user(conn, "+4915110000000", "Creator").await;
    let group = seed_group(conn, &creator, "Office Exchange").await;

    let mut participants = Vec::with_capacity(n);
    participants.push(seed_participant(conn, &group, &creator).await);

    for i in 1..n {
        let phone = format!("+49151100000{i:02}");
        let user = seed_user(conn, &phone, &format!("Member {i}")).await;
        participants.push(seed_participant(conn, &group, &user).await);
    }

    for participant in &participants {
        seed_wish(conn, participant, "Wool socks").await;
    }

    (creator, group, participants)
}
