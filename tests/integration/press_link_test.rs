//! Integration tests for the press link HTTP surface.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;

use helpers::TestApp;

#[tokio::test]
async fn test_press_link_lifecycle() {
    let app = TestApp::new();
    let created = app.create_link(Some("secret")).await;

    let token = created["token"].as_str().unwrap().to_string();
    let id = created["link"]["id"].as_str().unwrap().to_string();
    assert_eq!(
        created["url"],
        format!("https://screener.test/press/watch/{token}")
    );
    assert_eq!(created["link"]["hasPassword"], true);
    assert_eq!(created["link"]["status"], "active");
    assert_eq!(created["link"]["createdBy"], "ops.developer@studio.test");
    assert!(created["link"].get("password").is_none());

    let response = app
        .request("GET", &format!("/api/press/validate/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["valid"], true);
    assert_eq!(response.body["requiresPassword"], true);
    assert_eq!(response.body["movieTitle"], "The Long Field");

    let response = app
        .request(
            "POST",
            &format!("/api/press/verify/{token}"),
            Some(serde_json::json!({ "password": "wrong" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["valid"], false);
    assert_eq!(response.body["message"], "Invalid password");

    let response = app
        .request(
            "POST",
            &format!("/api/press/verify/{token}"),
            Some(serde_json::json!({ "password": "secret" })),
            None,
        )
        .await;
    assert_eq!(response.body["valid"], true);
    assert_eq!(response.body["message"], "Password verified successfully");

    let response = app
        .request_with_headers(
            "POST",
            &format!("/api/press/track/{token}"),
            None,
            None,
            &[("x-forwarded-for", "203.0.113.42, 10.0.0.1"), ("user-agent", "screener-test")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "View tracked successfully");
    assert_eq!(response.body["data"]["viewCount"], 1);

    let admin = app.admin_token();
    let response = app
        .request("GET", &format!("/api/press/admin/{id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let link = &response.body["data"];
    assert_eq!(link["viewCount"], 1);
    let view = &link["views"][0];
    assert_eq!(view["userAgent"], "screener-test");
    let ip = view["ipAddress"].as_str().unwrap();
    assert!(ip.starts_with("203.0.113."));
    assert_ne!(ip, "203.0.113.42");

    let response = app
        .request("DELETE", &format!("/api/press/admin/{id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["message"],
        "Press link deactivated successfully"
    );

    let response = app
        .request("GET", &format!("/api/press/validate/{token}"), None, None)
        .await;
    assert_eq!(response.body["valid"], false);
    assert_eq!(response.body["expired"], false);
    assert_eq!(response.body["message"], "Link has been deactivated");

    let response = app
        .request("POST", &format!("/api/press/track/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "LINK_DEACTIVATED");

    let response = app
        .request("GET", &format!("/api/press/admin/{id}"), None, Some(&admin))
        .await;
    assert_eq!(response.body["data"]["active"], false);
    assert_eq!(response.body["data"]["status"], "inactive");
}

#[tokio::test]
async fn test_admin_routes_require_admin() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/press/admin", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"],
        "Missing or invalid authorization token"
    );

    let response = app
        .request("GET", "/api/press/admin", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid authorization token");

    let outsider = app.token_for("someone@outlet.test");
    let response = app
        .request("GET", "/api/press/admin", None, Some(&outsider))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Unauthorized access - admin privileges required"
    );
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/press/admin",
            Some(serde_json::json!({ "videoId": "vid", "movieId": 1 })),
            Some(&app.admin_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Missing required fields")
    );
}

#[tokio::test]
async fn test_create_caps_expiry_at_ninety_days() {
    let app = TestApp::new();
    let requested = (app_now(&app) + Duration::days(365)).timestamp_millis();
    let response = app
        .request(
            "POST",
            "/api/press/admin",
            Some(serde_json::json!({
                "videoId": "vid",
                "movieId": 7,
                "movieTitle": "Far Out",
                "recipientEmail": "r@outlet.test",
                "recipientName": "R",
                "expiresAt": requested,
            })),
            Some(&app.admin_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let expires_at = response.body["data"]["link"]["expiresAt"].as_i64().unwrap();
    let cap = (app_now(&app) + Duration::days(90)).timestamp_millis();
    assert_eq!(expires_at, cap);
    assert_eq!(response.body["data"]["link"]["hasPassword"], false);
}

#[tokio::test]
async fn test_update_and_list_by_status() {
    let app = TestApp::new();
    let admin = app.admin_token();
    let first = app.create_link(None).await;
    let second = app.create_link(Some("pw")).await;
    let first_id = first["link"]["id"].as_str().unwrap();

    let response = app
        .request(
            "PATCH",
            &format!("/api/press/admin/{first_id}"),
            Some(serde_json::json!({ "recipientName": "Renamed", "notes": "resent" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["recipientName"], "Renamed");
    assert_eq!(response.body["data"]["notes"], "resent");
    assert_eq!(response.body["data"]["recipientEmail"], "critic@paper.test");

    let response = app
        .request(
            "PATCH",
            &format!("/api/press/admin/{first_id}"),
            Some(serde_json::json!({})),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No update data provided");

    let second_id = second["link"]["id"].as_str().unwrap();
    app.request(
        "DELETE",
        &format!("/api/press/admin/{second_id}"),
        None,
        Some(&admin),
    )
    .await;

    let response = app
        .request("GET", "/api/press/admin", None, Some(&admin))
        .await;
    assert_eq!(response.body["data"]["total"], 2);

    let response = app
        .request("GET", "/api/press/admin?status=active", None, Some(&admin))
        .await;
    assert_eq!(response.body["data"]["total"], 1);
    assert_eq!(response.body["data"]["links"][0]["id"], first_id);

    let response = app
        .request("GET", "/api/press/admin?status=inactive", None, Some(&admin))
        .await;
    assert_eq!(response.body["data"]["total"], 1);
    assert_eq!(response.body["data"]["links"][0]["id"], second_id);

    app.clock.advance(Duration::days(2));
    let response = app
        .request("GET", "/api/press/admin?status=expired", None, Some(&admin))
        .await;
    assert_eq!(response.body["data"]["total"], 2);

    let response = app
        .request("GET", "/api/press/admin?status=active", None, Some(&admin))
        .await;
    assert_eq!(response.body["data"]["total"], 0);

    let response = app
        .request("GET", "/api/press/admin?status=archived", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_unknown_and_malformed_ids() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let response = app
        .request(
            "GET",
            "/api/press/admin/00000000-0000-0000-0000-000000000000",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/press/admin/not-a-uuid", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_expired_link_is_refused() {
    let app = TestApp::new();
    let created = app.create_link(None).await;
    let token = created["token"].as_str().unwrap();

    app.clock.advance(Duration::days(2));

    let response = app
        .request("GET", &format!("/api/press/validate/{token}"), None, None)
        .await;
    assert_eq!(response.body["valid"], false);
    assert_eq!(response.body["expired"], true);
    assert_eq!(response.body["message"], "Link has expired");

    let response = app
        .request("GET", &format!("/api/press/video/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.body["error"], "LINK_EXPIRED");

    let response = app
        .request("POST", &format!("/api/press/track/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::GONE);
}

#[tokio::test]
async fn test_unknown_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/press/validate/nope", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["valid"], false);
    assert_eq!(response.body["message"], "Link not found");

    let response = app
        .request("POST", "/api/press/track/nope", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_video_password_header() {
    let app = TestApp::new();
    let created = app.create_link(Some("secret")).await;
    let path = format!("/api/press/video/{}", created["token"].as_str().unwrap());

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Password required");

    let response = app
        .request_with_headers("GET", &path, None, None, &[("x-press-password", "nope")])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid password");

    let response = app
        .request_with_headers("GET", &path, None, None, &[("x-press-password", "secret")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["videoId"], "vid-2001");
    assert_eq!(response.body["data"]["movieId"], 2001);
}

#[tokio::test]
async fn test_verify_requires_password() {
    let app = TestApp::new();
    let created = app.create_link(Some("secret")).await;
    let response = app
        .request(
            "POST",
            &format!("/api/press/verify/{}", created["token"].as_str().unwrap()),
            Some(serde_json::json!({})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Password is required");
}

#[tokio::test]
async fn test_mistyped_bodies_are_validation_errors() {
    let app = TestApp::new();
    let created = app.create_link(Some("secret")).await;
    let token = created["token"].as_str().unwrap();
    let id = created["link"]["id"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/press/verify/{token}"),
            Some(serde_json::json!({ "password": 12345 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body")
    );

    let response = app
        .request(
            "POST",
            &format!("/api/press/track/{token}"),
            Some(serde_json::json!({ "duration": "long" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let admin = app.admin_token();
    let response = app
        .request(
            "PATCH",
            &format!("/api/press/admin/{id}"),
            Some(serde_json::json!({ "expiresAt": "soon" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request("GET", &format!("/api/press/admin/{id}"), None, Some(&admin))
        .await;
    assert_eq!(response.body["data"]["viewCount"], 0);
    assert!(response.body["data"]["expiresAt"].is_number());
}

#[tokio::test]
async fn test_track_records_duration() {
    let app = TestApp::new();
    let created = app.create_link(None).await;
    let token = created["token"].as_str().unwrap();
    let id = created["link"]["id"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/press/track/{token}"),
            Some(serde_json::json!({ "duration": 93.5 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            &format!("/api/press/track/{token}"),
            Some(serde_json::json!({ "duration": -4 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "GET",
            &format!("/api/press/admin/{id}"),
            None,
            Some(&app.admin_token()),
        )
        .await;
    let views = response.body["data"]["views"].as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["duration"], 93.5);
    assert_eq!(views[0]["userAgent"], "unknown");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], "connected");
}

fn app_now(app: &TestApp) -> chrono::DateTime<chrono::Utc> {
    use screener_core::traits::Clock;
    app.clock.now()
}
