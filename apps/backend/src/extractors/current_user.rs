use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::verify_access_token;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

/// The authenticated user behind the request, resolved from the Bearer
/// token against the database. Routes that take this extractor are
/// authenticated; everything else is public.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
    pub display_name: String,
    pub phone: Option<String>,
}

fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;

    header_value
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::unauthorized_missing_bearer)
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let token = bearer_token(&req)?;
            let claims = verify_access_token(&token, &app_state.security)?;

            let db = require_db(app_state)?;
            let user = users::find_by_sub(db, &claims.sub)
                .await?
                .ok_or_else(AppError::forbidden_user_not_found)?;

            Ok(CurrentUser {
                id: user.id,
                sub: user.sub,
                display_name: user.display_name,
                phone: user.phone,
            })
        })
    }
}
