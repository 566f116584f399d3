use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use postwave_infra::WorkflowConfig;

use super::{configure_routes, cors, json_config};
use crate::config::{AppConfig, DEFAULT_MAX_PAYLOAD_BYTES};
use crate::state::AppState;

macro_rules! app {
    ($state:expr) => {
        app!($state, DEFAULT_MAX_PAYLOAD_BYTES)
    };
    ($state:expr, $limit:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(json_config($limit))
                .configure(configure_routes),
        )
        .await
    };
}

/// State whose workflow endpoint points at a closed local port.
async fn test_state() -> AppState {
    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        workflow: WorkflowConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            webhook_url: "http://127.0.0.1:9/webhook/social-media-post".to_string(),
            timeout: Duration::from_secs(1),
        },
    };
    AppState::new(&config).await.unwrap()
}

fn in_one_hour() -> String {
    (chrono::Utc::now() + chrono::Duration::hours(1)).to_rfc3339()
}

#[actix_web::test]
async fn test_create_post_publishes_immediately() {
    let app = app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "content": "Hello", "platforms": ["twitter"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["status"], "published");
    assert_eq!(post["content"], "Hello");
    assert_eq!(post["engagement"], json!({ "likes": 0, "shares": 0, "comments": 0 }));
    assert!(post["publishedAt"].is_string());
    assert_eq!(post["imageUrl"], "");
}

#[actix_web::test]
async fn test_create_post_requires_content() {
    let app = app!(test_state().await);

    for body in [
        json!({ "platforms": ["twitter"] }),
        json!({ "content": "   ", "platforms": ["twitter"] }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "Post content is required");
    }

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(posts, json!([]));
}

#[actix_web::test]
async fn test_create_post_requires_platforms() {
    let app = app!(test_state().await);

    for body in [
        json!({ "content": "Hello" }),
        json!({ "content": "Hello", "platforms": [] }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "At least one platform must be selected");
    }

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(posts, json!([]));
}

#[actix_web::test]
async fn test_invalid_scheduled_time_is_rejected() {
    let app = app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "content": "Hello",
            "platforms": ["twitter"],
            "scheduledTime": "next tuesday"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_future_post_is_listed_as_scheduled() {
    let app = app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "content": "Later",
            "platforms": ["linkedin"],
            "scheduledTime": in_one_hour()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["status"], "scheduled");
    assert!(post.get("publishedAt").is_none());

    let req = test::TestRequest::get().uri("/api/scheduled-posts").to_request();
    let scheduled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(scheduled.as_array().unwrap().len(), 1);
    assert_eq!(scheduled[0]["id"], post["id"]);
}

#[actix_web::test]
async fn test_offset_free_scheduled_time_is_scheduled() {
    let app = app!(test_state().await);
    let later = (chrono::Utc::now() + chrono::Duration::hours(2))
        .format("%Y-%m-%dT%H:%M")
        .to_string();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "content": "Later",
            "platforms": ["twitter"],
            "scheduledTime": later
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["status"], "scheduled");
}

#[actix_web::test]
async fn test_cors_headers_on_api_routes() {
    let app = test::init_service(
        App::new()
            .wrap(cors())
            .app_data(web::Data::new(test_state().await))
            .app_data(json_config(DEFAULT_MAX_PAYLOAD_BYTES))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("Origin", "http://localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("access-control-allow-origin"));

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/posts")
        .insert_header(("Origin", "http://localhost:3000"))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}

#[actix_web::test]
async fn test_status_update_publishes_draft() {
    let app = app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "content": "Later",
            "platforms": ["twitter"],
            "scheduledTime": in_one_hour()
        }))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    let id = post["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}/status", id))
        .set_json(json!({ "status": "draft" }))
        .to_request();
    let draft: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(draft["status"], "draft");
    assert!(draft.get("publishedAt").is_none());

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}/status", id))
        .set_json(json!({ "status": "published" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let published: Value = test::read_body_json(resp).await;
    assert_eq!(published["status"], "published");
    assert!(published["publishedAt"].is_string());

    let req = test::TestRequest::get().uri("/api/scheduled-posts").to_request();
    let scheduled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(scheduled, json!([]));
}

#[actix_web::test]
async fn test_status_update_errors() {
    let app = app!(test_state().await);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}/status", uuid::Uuid::new_v4()))
        .set_json(json!({ "status": "published" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "Post not found");

    let req = test::TestRequest::put()
        .uri("/api/posts/not-a-uuid/status")
        .set_json(json!({ "status": "published" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "content": "Hello", "platforms": ["twitter"] }))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}/status", post["id"].as_str().unwrap()))
        .set_json(json!({ "status": "archived" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_delete_removes_from_both_listings() {
    let app = app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "content": "Later",
            "platforms": ["twitter"],
            "scheduledTime": in_one_hour()
        }))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post["id"].as_str().unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Post deleted successfully");

    for uri in ["/api/posts", "/api/scheduled-posts"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let posts: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(posts, json!([]));
    }

    // Unknown and malformed ids are a no-op success
    for uri in [
        format!("/api/posts/{}", uuid::Uuid::new_v4()),
        "/api/posts/not-a-uuid".to_string(),
    ] {
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn test_engagement_webhook_merges_metrics() {
    let app = app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "content": "Hello", "platforms": ["twitter"] }))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;

    for engagement in [json!({ "shares": 2, "comments": 1 }), json!({ "likes": 5 })] {
        let req = test::TestRequest::post()
            .uri("/api/webhook/engagement")
            .set_json(json!({
                "postId": post["id"],
                "platform": "twitter",
                "engagement": engagement
            }))
            .to_request();
        let ack: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ack["applied"], true);
    }

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        posts[0]["engagement"],
        json!({ "likes": 5, "shares": 2, "comments": 1 })
    );
}

#[actix_web::test]
async fn test_engagement_webhook_unknown_post() {
    let app = app!(test_state().await);

    for post_id in [uuid::Uuid::new_v4().to_string(), "stale-ref".to_string()] {
        let req = test::TestRequest::post()
            .uri("/api/webhook/engagement")
            .set_json(json!({
                "postId": post_id,
                "platform": "twitter",
                "engagement": { "likes": 5 }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let ack: Value = test::read_body_json(resp).await;
        assert_eq!(ack["message"], "Engagement data received");
        assert_eq!(ack["applied"], false);
    }
}

#[actix_web::test]
async fn test_oversized_body_is_rejected() {
    let app = app!(test_state().await, 256);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "content": "Hello",
            "platforms": ["twitter"],
            "imageUrl": format!("data:image/png;base64,{}", "A".repeat(1024))
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"], "Payload too large");
    assert!(error["details"].is_string());
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let app = app!(test_state().await);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error: Value = test::read_body_json(resp).await;
    assert!(error["error"].is_string());
}

#[actix_web::test]
async fn test_health_and_debug_counts() {
    let app = app!(test_state().await);

    let long_content = "x".repeat(80);
    for body in [
        json!({ "content": long_content, "platforms": ["twitter"] }),
        json!({ "content": "Later", "platforms": ["twitter"], "scheduledTime": in_one_hour() }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(body)
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["postsCount"], 2);
    assert_eq!(health["scheduledPostsCount"], 1);
    assert_eq!(health["workflowUrl"], "http://127.0.0.1:9");

    let req = test::TestRequest::get().uri("/api/debug/posts").to_request();
    let debug: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(debug["totalPosts"], 2);
    assert_eq!(debug["publishedPosts"], 1);
    assert_eq!(debug["draftPosts"], 0);
    assert_eq!(debug["scheduledPosts"], 1);
    assert_eq!(debug["posts"][0]["content"], format!("{}...", "x".repeat(50)));
    assert_eq!(debug["posts"].as_array().unwrap().len(), 2);
}
