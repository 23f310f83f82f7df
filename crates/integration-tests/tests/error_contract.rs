//! Status and message for every failure class, end to end through the router.

use axum::http::{Method, StatusCode};
use domains::{AppError, StoreFailure};
use integration_tests::{get, send, store_failure, Mocks};
use serde_json::json;

#[tokio::test]
async fn unknown_route_is_plain_text_404() {
    let res = get(Mocks::new().into_app(), "/api/not-a-route").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.text, "Invalid Endpoint");
}

#[tokio::test]
async fn unsupported_method_is_plain_text_404() {
    let res = send(Mocks::new().into_app(), Method::PUT, "/api/topics", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.text, "Invalid Endpoint");
}

#[tokio::test]
async fn unparseable_json_is_bad_request() {
    let app = Mocks::new().into_app();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/topics")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn undecodable_path_segment_is_json_bad_request() {
    for uri in ["/api/articles/%FF", "/api/articles/%FF/comments", "/api/users/%C3%28"] {
        let res = get(Mocks::new().into_app(), uri).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(res.json(), json!({ "message": "Bad Request" }), "{uri}");
    }
    let res = send(Mocks::new().into_app(), Method::DELETE, "/api/comments/%FF", None).await;
    assert_eq!(res.message(), "Bad Request");
}

#[tokio::test]
async fn store_codes_map_to_documented_responses() {
    let cases = [
        ("22P02", StatusCode::BAD_REQUEST, "Bad Request"),
        ("22003", StatusCode::BAD_REQUEST, "Bad Request"),
        ("23502", StatusCode::BAD_REQUEST, "Incomplete/Missing Body"),
        ("23503", StatusCode::NOT_FOUND, "Not Found"),
        ("23505", StatusCode::CONFLICT, "Body Already Exists"),
        ("40P01", StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
    ];

    for (code, status, message) in cases {
        let mut mocks = Mocks::new();
        mocks
            .topics
            .expect_create_topic()
            .returning(move |_| Err(store_failure(code)));

        let res = send(
            mocks.into_app(),
            Method::POST,
            "/api/topics",
            Some(json!({ "slug": "s", "description": "d" })),
        )
        .await;
        assert_eq!(res.status, status, "{code}");
        assert_eq!(res.json(), json!({ "message": message }), "{code}");
    }
}

#[tokio::test]
async fn connection_failures_are_opaque() {
    let mut mocks = Mocks::new();
    mocks.users.expect_list_users().returning(|| {
        Err(AppError::Store(StoreFailure::new(
            None,
            "error communicating with database: connection refused",
        )))
    });

    let res = get(mocks.into_app(), "/api/users").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!res.text.contains("connection refused"));
}

#[tokio::test]
async fn metrics_count_handled_requests() {
    let mut mocks = Mocks::new();
    mocks.users.expect_list_users().returning(|| Ok(vec![]));
    let app = mocks.into_app();

    get(app.clone(), "/api/users").await;
    get(app.clone(), "/api/nowhere").await;

    let res = get(app, "/metrics").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res
        .text
        .contains(r#"newsdesk_http_requests_total{method="GET",status="2xx"} 1"#));
    assert!(res
        .text
        .contains(r#"newsdesk_http_requests_total{method="GET",status="4xx"} 1"#));
}

#[tokio::test]
async fn metrics_fold_unknown_methods_into_one_series() {
    let app = Mocks::new().into_app();
    for n in 0..5 {
        let method = Method::from_bytes(format!("X{n}").as_bytes()).unwrap();
        send(app.clone(), method, "/api/topics", None).await;
    }

    let res = get(app, "/metrics").await;
    assert!(res
        .text
        .contains(r#"newsdesk_http_requests_total{method="other",status="4xx"} 5"#));
    assert!(!res.text.contains(r#"method="X0""#));
}
