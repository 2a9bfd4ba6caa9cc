//! Wish routes: adding to and removing from the own wish list.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::wishes::{add_wish, remove_wish, AddWishInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct AddWishRequest {
    participant_id: i64,
    title: String,
    description: Option<String>,
    url: Option<String>,
    #[serde(default)]
    priority: i32,
}

#[derive(Debug, Serialize)]
struct WishResponse {
    id: i64,
    participant_id: i64,
    title: String,
    description: Option<String>,
    url: Option<String>,
    priority: i32,
}

/// POST /api/wishes
async fn create(
    user: CurrentUser,
    body: web::Json<AddWishRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let input = AddWishInput {
        participant_id: req.participant_id,
        title: req.title,
        description: req.description,
        url: req.url,
        priority: req.priority,
    };
    let user_id = user.id;

    let wish = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(add_wish(txn, user_id, input).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(WishResponse {
        id: wish.id,
        participant_id: wish.participant_id,
        title: wish.title,
        description: wish.description,
        url: wish.url,
        priority: wish.priority,
    }))
}

/// DELETE /api/wishes/{wish_id}
async fn delete(
    user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let wish_id = path.into_inner();
    let user_id = user.id;

    with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(remove_wish(txn, user_id, wish_id).await?) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create)));
    cfg.service(web::resource("/{wish_id}").route(web::delete().to(delete)));
}
