use actix_web::web;

pub mod auth;
pub mod groups;
pub mod health;
pub mod participants;
pub mod user;
pub mod wishes;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// `main.rs` wires the same scopes with the CORS and trace middleware on
/// top; tests register the bare paths so endpoint behavior can be
/// exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
    cfg.service(web::scope("/api/groups").configure(groups::configure_routes));
    cfg.service(web::scope("/api/participants").configure(participants::configure_routes));
    cfg.service(web::scope("/api/wishes").configure(wishes::configure_routes));
    cfg.service(web::scope("/api/user").configure(user::configure_routes));
}
