//! Participant routes: joining a group and reading the own assignment.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::assignments::assignment_for_giver;
use crate::services::participants::join_group;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct JoinGroupRequest {
    group_code: String,
}

#[derive(Debug, Serialize)]
struct ParticipantResponse {
    id: i64,
    group_id: i64,
    anonymous_name: String,
}

/// POST /api/participants
///
/// Join a group by code. Joining a group you are already in returns the
/// existing participant with 200 instead of 201.
async fn join(
    user: CurrentUser,
    body: web::Json<JoinGroupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let group_code = body.into_inner().group_code;
    let user_id = user.id;

    let (participant, newly_joined) = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(join_group(txn, user_id, &group_code).await?) })
    })
    .await?;

    let response = ParticipantResponse {
        id: participant.id,
        group_id: participant.group_id,
        anonymous_name: participant.anonymous_name,
    };

    if newly_joined {
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}

#[derive(Debug, Serialize)]
struct AssignmentWishResponse {
    id: i64,
    title: String,
    description: Option<String>,
    url: Option<String>,
    priority: i32,
}

#[derive(Debug, Serialize)]
struct AssignmentResponse {
    group_name: String,
    receiver_anonymous_name: String,
    receiver_wishes: Vec<AssignmentWishResponse>,
}

/// GET /api/participants/{participant_id}/assignment
async fn get_assignment(
    user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let participant_id = path.into_inner();
    let user_id = user.id;

    let view = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(assignment_for_giver(txn, user_id, participant_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(AssignmentResponse {
        group_name: view.group_name,
        receiver_anonymous_name: view.receiver_anonymous_name,
        receiver_wishes: view
            .receiver_wishes
            .into_iter()
            .map(|w| AssignmentWishResponse {
                id: w.id,
                title: w.title,
                description: w.description,
                url: w.url,
                priority: w.priority,
            })
            .collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(join)));
    cfg.service(
        web::resource("/{participant_id}/assignment").route(web::get().to(get_assignment)),
    );
}
