//! Routes scoped to the authenticated user.

use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::routes::groups::GroupResponse;
use crate::services::groups::groups_for_user;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct MemberGroupResponse {
    group: GroupResponse,
    participant_count: usize,
    my_anonymous_name: String,
}

/// GET /api/user/groups
async fn my_groups(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = user.id;

    let memberships = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(groups_for_user(txn, user_id).await?) })
    })
    .await?;

    let response: Vec<MemberGroupResponse> = memberships
        .into_iter()
        .map(|m| MemberGroupResponse {
            group: GroupResponse::from(m.group),
            participant_count: m.participant_count,
            my_anonymous_name: m.my_anonymous_name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/groups").route(web::get().to(my_groups)));
}
