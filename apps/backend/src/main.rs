use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::config::db::DbProfile;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::notify::{NoopNotifier, Notifier, TwilioNotifier};
use backend::routes;
use backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("WICHTEL_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("WICHTEL_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("WICHTEL_PORT must be a valid port number");
            std::process::exit(1);
        });

    let jwt = match std::env::var("WICHTEL_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("WICHTEL_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };
    let security_config = SecurityConfig::new(jwt.as_bytes());

    // Real SMS delivery only when Twilio is fully configured
    let notifier: Arc<dyn Notifier> = match TwilioNotifier::from_env() {
        Some(twilio) => Arc::new(twilio),
        None => {
            tracing::warn!("Twilio not configured; draw notifications will be logged only");
            Arc::new(NoopNotifier)
        }
    };

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_security(security_config)
        .with_notifier(notifier)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(host = %host, port, "starting wichtel backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
