//! Group HTTP routes: creation, lookup by join code, and the draw itself.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::notify::announce_draw;
use crate::repos::groups::Group;
use crate::services::draw::run_draw;
use crate::services::groups::{self, CreateGroupInput};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct GroupResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub code: String,
    pub drawn: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub draw_date: Option<OffsetDateTime>,
    pub created_by: i64,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
            description: group.description,
            code: group.code,
            drawn: group.drawn,
            draw_date: group.draw_date,
            created_by: group.created_by,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateGroupRequest {
    name: String,
    description: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    draw_date: Option<OffsetDateTime>,
}

/// POST /api/groups
async fn create_group(
    user: CurrentUser,
    body: web::Json<CreateGroupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let input = CreateGroupInput {
        name: body.name.clone(),
        description: body.description.clone(),
        draw_date: body.draw_date,
    };
    let user_id = user.id;

    let group = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(groups::create_group(txn, user_id, input).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(GroupResponse::from(group)))
}

#[derive(Debug, Deserialize)]
struct GroupLookupQuery {
    code: String,
}

#[derive(Debug, Serialize)]
struct WishResponse {
    id: i64,
    title: String,
    description: Option<String>,
    url: Option<String>,
    priority: i32,
}

#[derive(Debug, Serialize)]
struct ParticipantResponse {
    id: i64,
    anonymous_name: String,
    wishes: Vec<WishResponse>,
}

#[derive(Debug, Serialize)]
struct GroupOverviewResponse {
    group: GroupResponse,
    participants: Vec<ParticipantResponse>,
}

/// GET /api/groups?code=ABC123
///
/// The group page: participants are shown by their anonymous names only.
async fn get_group(
    _user: CurrentUser,
    query: web::Query<GroupLookupQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = query.into_inner().code;

    let overview = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(groups::group_overview(txn, &code).await?) })
    })
    .await?;

    let participants = overview
        .participants
        .into_iter()
        .map(|p| ParticipantResponse {
            id: p.participant.id,
            anonymous_name: p.participant.anonymous_name,
            wishes: p
                .wishes
                .into_iter()
                .map(|w| WishResponse {
                    id: w.id,
                    title: w.title,
                    description: w.description,
                    url: w.url,
                    priority: w.priority,
                })
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(GroupOverviewResponse {
        group: GroupResponse::from(overview.group),
        participants,
    }))
}

#[derive(Debug, Serialize)]
struct DrawResponse {
    group_id: i64,
    drawn: bool,
    assignment_count: usize,
}

/// POST /api/groups/{group_id}/draw
///
/// Runs the draw in a single transaction; the SMS fan-out happens after
/// commit and never affects the response.
async fn draw_group(
    user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let group_id = path.into_inner();
    let user_id = user.id;

    let outcome = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let mut rng = rand::rng();
            Ok(run_draw(txn, group_id, user_id, &mut rng).await?)
        })
    })
    .await?;

    // Post-commit, fire-and-forget. A failed SMS never un-draws a group.
    let notifier = app_state.notifier.clone();
    let group_name = outcome.group.name.clone();
    let phones = outcome.recipient_phones.clone();
    tokio::spawn(async move {
        announce_draw(notifier.as_ref(), &group_name, &phones).await;
    });

    Ok(HttpResponse::Ok().json(DrawResponse {
        group_id,
        drawn: true,
        assignment_count: outcome.assignment_count,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_group))
            .route(web::get().to(get_group)),
    );
    cfg.service(web::resource("/{group_id}/draw").route(web::post().to(draw_group)));
}
