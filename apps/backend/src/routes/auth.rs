//! Login endpoint: phone-based identity, backend-issued JWT.

use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    phone: String,
    display_name: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    user: UserResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub id: i64,
    pub display_name: String,
    pub phone: Option<String>,
}

/// POST /api/auth/login
///
/// Finds or creates the user behind the phone number and returns an
/// access token for it.
async fn login(
    body: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest {
        phone,
        display_name,
    } = body.into_inner();

    let user = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(users::login(txn, &phone, &display_name).await?) })
    })
    .await?;

    let token = mint_access_token(&user.sub, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserResponse {
            id: user.id,
            display_name: user.display_name,
            phone: user.phone,
        },
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
