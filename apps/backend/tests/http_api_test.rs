//! End-to-end HTTP tests: login, group lifecycle, draw, assignment.

mod common;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::routes;
use serde_json::{json, Value};

async fn test_app(
    state: backend::state::app_state::AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

async fn login<S>(app: &S, phone: &str, display_name: &str) -> (String, i64)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "phone": phone, "display_name": display_name }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");

    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token in response").to_string();
    let user_id = body["user"]["id"].as_i64().expect("user id in response");
    (token, user_id)
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let state = common::test_state().await;
    let app = test_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body["applied_migrations"].as_u64().unwrap() >= 1);
}

#[actix_web::test]
async fn protected_routes_require_a_bearer_token() {
    let state = common::test_state().await;
    let app = test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .set_json(json!({ "name": "No Auth" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED_MISSING_BEARER");
}

#[actix_web::test]
async fn garbage_token_is_rejected() {
    let state = common::test_state().await;
    let app = test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/user/groups")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED_INVALID_JWT");
}

#[actix_web::test]
async fn login_with_empty_phone_is_a_bad_request() {
    let state = common::test_state().await;
    let app = test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "phone": "", "display_name": "Nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn login_is_idempotent_per_phone() {
    let state = common::test_state().await;
    let app = test_app(state).await;

    let (_, first_id) = login(&app, "+4915112345678", "Mia").await;
    let (_, second_id) = login(&app, "+4915112345678", "Mia again").await;
    assert_eq!(first_id, second_id);
}

#[actix_web::test]
async fn full_group_lifecycle() {
    let state = common::test_state().await;
    let app = test_app(state).await;

    let (creator_token, _) = login(&app, "+4915110000001", "Anna").await;
    let (member_token, _) = login(&app, "+4915110000002", "Ben").await;

    // Create the group
    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header(bearer(&creator_token))
        .set_json(json!({ "name": "Family Exchange", "description": "Christmas Eve" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let group: Value = test::read_body_json(resp).await;
    let group_id = group["id"].as_i64().unwrap();
    let code = group["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);
    assert_eq!(group["drawn"], false);

    // Both users join
    let mut participant_ids = Vec::new();
    for token in [&creator_token, &member_token] {
        let req = test::TestRequest::post()
            .uri("/api/participants")
            .insert_header(bearer(token))
            .set_json(json!({ "group_code": code }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
        let participant: Value = test::read_body_json(resp).await;
        participant_ids.push(participant["id"].as_i64().unwrap());
    }

    // Joining again returns the existing participant with 200
    let req = test::TestRequest::post()
        .uri("/api/participants")
        .insert_header(bearer(&creator_token))
        .set_json(json!({ "group_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let rejoined: Value = test::read_body_json(resp).await;
    assert_eq!(rejoined["id"].as_i64().unwrap(), participant_ids[0]);

    // Everyone adds a wish
    for (token, participant_id) in [
        (&creator_token, participant_ids[0]),
        (&member_token, participant_ids[1]),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/wishes")
            .insert_header(bearer(token))
            .set_json(json!({
                "participant_id": participant_id,
                "title": "Board game",
                "priority": 1
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
    }

    // The group page shows both participants under their anonymous names
    let req = test::TestRequest::get()
        .uri(&format!("/api/groups?code={code}"))
        .insert_header(bearer(&member_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let overview: Value = test::read_body_json(resp).await;
    let participants = overview["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    for participant in participants {
        assert!(participant.get("user_id").is_none(), "no identity leaks");
        assert!(!participant["anonymous_name"].as_str().unwrap().is_empty());
    }

    // A non-creator may not trigger the draw
    let req = test::TestRequest::post()
        .uri(&format!("/api/groups/{group_id}/draw"))
        .insert_header(bearer(&member_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    // The creator draws
    let req = test::TestRequest::post()
        .uri(&format!("/api/groups/{group_id}/draw"))
        .insert_header(bearer(&creator_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let drawn: Value = test::read_body_json(resp).await;
    assert_eq!(drawn["drawn"], true);
    assert_eq!(drawn["assignment_count"].as_i64().unwrap(), 2);

    // Drawing again conflicts
    let req = test::TestRequest::post()
        .uri(&format!("/api/groups/{group_id}/draw"))
        .insert_header(bearer(&creator_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);
    let conflict: Value = test::read_body_json(resp).await;
    assert_eq!(conflict["code"], "ALREADY_DRAWN");

    // With two participants the assignment is the swap
    let req = test::TestRequest::get()
        .uri(&format!("/api/participants/{}/assignment", participant_ids[0]))
        .insert_header(bearer(&creator_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let assignment: Value = test::read_body_json(resp).await;
    assert_eq!(assignment["group_name"], "Family Exchange");
    assert_eq!(
        assignment["receiver_wishes"].as_array().unwrap().len(),
        1
    );

    // Reading someone else's assignment is forbidden
    let req = test::TestRequest::get()
        .uri(&format!("/api/participants/{}/assignment", participant_ids[1]))
        .insert_header(bearer(&creator_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    // The member sees the group in their list
    let req = test::TestRequest::get()
        .uri("/api/user/groups")
        .insert_header(bearer(&member_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let my_groups: Value = test::read_body_json(resp).await;
    let entries = my_groups.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["group"]["id"].as_i64().unwrap(), group_id);
    assert_eq!(entries[0]["participant_count"].as_i64().unwrap(), 2);
}

#[actix_web::test]
async fn draw_with_missing_wishes_names_the_offenders() {
    let state = common::test_state().await;
    let conn = common::db(&state).clone();
    let app = test_app(state).await;

    let (creator_token, _) = login(&app, "+4915110000010", "Clara").await;
    let (member_token, _) = login(&app, "+4915110000011", "Dora").await;

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header(bearer(&creator_token))
        .set_json(json!({ "name": "Team Draw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let group: Value = test::read_body_json(resp).await;
    let group_id = group["id"].as_i64().unwrap();
    let code = group["code"].as_str().unwrap().to_string();

    let mut participant_ids = Vec::new();
    for token in [&creator_token, &member_token] {
        let req = test::TestRequest::post()
            .uri("/api/participants")
            .insert_header(bearer(token))
            .set_json(json!({ "group_code": code }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let participant: Value = test::read_body_json(resp).await;
        participant_ids.push(participant["id"].as_i64().unwrap());
    }

    // Only the creator adds a wish; the member's list stays empty
    let req = test::TestRequest::post()
        .uri("/api/wishes")
        .insert_header(bearer(&creator_token))
        .set_json(json!({ "participant_id": participant_ids[0], "title": "Tea" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let req = test::TestRequest::post()
        .uri(&format!("/api/groups/{group_id}/draw"))
        .insert_header(bearer(&creator_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INCOMPLETE_WISH_LISTS");
    assert!(body["detail"].as_str().unwrap().contains("participants"));

    // Nothing was committed
    let count = backend::repos::assignments::count_for_group(&conn, group_id)
        .await
        .unwrap();
    assert_eq!(count, 0);
    let reloaded = backend::repos::groups::require_group(&conn, group_id)
        .await
        .unwrap();
    assert!(!reloaded.drawn);
}

#[actix_web::test]
async fn wish_removal_is_owner_only() {
    let state = common::test_state().await;
    let app = test_app(state).await;

    let (owner_token, _) = login(&app, "+4915110000020", "Emil").await;
    let (other_token, _) = login(&app, "+4915110000021", "Finn").await;

    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header(bearer(&owner_token))
        .set_json(json!({ "name": "Wish Test" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let group: Value = test::read_body_json(resp).await;
    let code = group["code"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/participants")
        .insert_header(bearer(&owner_token))
        .set_json(json!({ "group_code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let participant: Value = test::read_body_json(resp).await;
    let participant_id = participant["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/wishes")
        .insert_header(bearer(&owner_token))
        .set_json(json!({ "participant_id": participant_id, "title": "Chess set" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let wish: Value = test::read_body_json(resp).await;
    let wish_id = wish["id"].as_i64().unwrap();

    // A stranger cannot remove it
    let req = test::TestRequest::delete()
        .uri(&format!("/api/wishes/{wish_id}"))
        .insert_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    // The owner can
    let req = test::TestRequest::delete()
        .uri(&format!("/api/wishes/{wish_id}"))
        .insert_header(bearer(&owner_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);

    // Deleting again is a 404
    let req = test::TestRequest::delete()
        .uri(&format!("/api/wishes/{wish_id}"))
        .insert_header(bearer(&owner_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "WISH_NOT_FOUND");
}

#[actix_web::test]
async fn unknown_group_code_is_a_404() {
    let state = common::test_state().await;
    let app = test_app(state).await;

    let (token, _) = login(&app, "+4915110000030", "Greta").await;

    let req = test::TestRequest::post()
        .uri("/api/participants")
        .insert_header(bearer(&token))
        .set_json(json!({ "group_code": "ZZZZZZ" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "GROUP_NOT_FOUND");
}
