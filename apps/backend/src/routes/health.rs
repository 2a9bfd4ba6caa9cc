use actix_web::{web, HttpResponse};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    applied_migrations: usize,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();

    let now = OffsetDateTime::now_utc();
    let time = now
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    // Lightweight query to verify the connection actually works
    let (db_status, db_error, applied_migrations) = match require_db(&app_state) {
        Ok(db) => match db
            .query_one(sea_orm::Statement::from_string(
                db.get_database_backend(),
                "SELECT 1 as health_check".to_string(),
            ))
            .await
        {
            Ok(_) => {
                let applied = migration::count_applied_migrations(db).await.unwrap_or(0);
                ("ok".to_string(), None, applied)
            }
            Err(e) => ("error".to_string(), Some(format!("DB query failed: {e}")), 0),
        },
        Err(e) => ("error".to_string(), Some(format!("DB unavailable: {e}")), 0),
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version,
        db: db_status,
        db_error,
        applied_migrations,
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
