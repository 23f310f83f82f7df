use axum::http::{Method, StatusCode};
use domains::{ArticleSortColumn, DeleteOutcome, DeletePolicy, ErrorKind, SortOrder};
use integration_tests::{article, get, listing, send, store_failure, Mocks};
use serde_json::json;
use services::ArticleOptions;

#[tokio::test]
async fn list_articles_defaults_to_newest_first() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_list_articles()
        .withf(|query| {
            query.sort_by == ArticleSortColumn::CreatedAt
                && query.order == SortOrder::Desc
                && query.topic.is_none()
                && query.pagination.limit == 10
                && query.pagination.offset() == 0
        })
        .returning(|_| Ok(vec![listing(3, 13), listing(6, 13)]));

    let res = get(mocks.into_app(), "/api/articles").await;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json();
    let all = body["allArticles"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["article_id"], 3);
    assert_eq!(all[0]["total_count"], 13);
    assert_eq!(all[0]["comment_count"], 11);
    assert!(all[0]["created_at"].is_string());
}

#[tokio::test]
async fn list_articles_filters_by_existing_topic_and_paginates() {
    let mut mocks = Mocks::new();
    mocks
        .topics
        .expect_topic_exists()
        .withf(|slug| slug == "mitch")
        .returning(|_| Ok(true));
    mocks
        .articles
        .expect_list_articles()
        .withf(|query| {
            query.topic.as_deref() == Some("mitch")
                && query.pagination.limit == 3
                && query.pagination.offset() == 3
        })
        .returning(|_| Ok(vec![listing(4, 12), listing(5, 12), listing(6, 12)]));

    let res = get(mocks.into_app(), "/api/articles?topic=mitch&limit=3&p=2").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    let all = body["allArticles"].as_array().unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|row| row["total_count"] == 12));
}

#[tokio::test]
async fn list_articles_accepts_comment_count_ascending() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_list_articles()
        .withf(|query| {
            query.sort_by == ArticleSortColumn::CommentCount && query.order == SortOrder::Asc
        })
        .returning(|_| Ok(vec![listing(2, 13)]));

    let res = get(
        mocks.into_app(),
        "/api/articles?sort_by=comment_count&order=asc",
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn list_articles_rejects_bad_queries() {
    for uri in [
        "/api/articles?sort_by=abc",
        "/api/articles?order=sideways",
        "/api/articles?limit=0",
        "/api/articles?limit=500",
        "/api/articles?p=first",
    ] {
        let res = get(Mocks::new().into_app(), uri).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(res.message(), "Invalid query", "{uri}");
    }
}

#[tokio::test]
async fn list_articles_rejects_unknown_query_key() {
    let mut mocks = Mocks::new();
    mocks.articles.expect_list_articles().returning(|_| Ok(vec![]));

    let res = get(mocks.into_app(), "/api/articles?abc=cats").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Invalid query");
}

#[tokio::test]
async fn list_articles_unknown_topic_is_not_found() {
    let mut mocks = Mocks::new();
    mocks.topics.expect_topic_exists().returning(|_| Ok(false));
    mocks.articles.expect_list_articles().returning(|_| Ok(vec![]));

    let res = get(mocks.into_app(), "/api/articles?topic=abc").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "Query Not Found");
}

#[tokio::test]
async fn list_articles_known_topic_without_articles_is_empty() {
    let mut mocks = Mocks::new();
    mocks.topics.expect_topic_exists().returning(|_| Ok(true));
    mocks.articles.expect_list_articles().returning(|_| Ok(vec![]));

    let res = get(mocks.into_app(), "/api/articles?topic=paper").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "allArticles": [] }));
}

#[tokio::test]
async fn get_article_by_id() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_find_article()
        .withf(|id| id == "1")
        .returning(|_| Ok(Some(article(1))));

    let res = get(mocks.into_app(), "/api/articles/1").await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["article"]["article_id"], 1);
    assert_eq!(body["article"]["comment_count"], 11);
}

#[tokio::test]
async fn get_missing_article_is_non_existent_id() {
    let mut mocks = Mocks::new();
    mocks.articles.expect_find_article().returning(|_| Ok(None));

    let res = get(mocks.into_app(), "/api/articles/99").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "Non-existent ID");
}

#[tokio::test]
async fn get_article_with_malformed_id_is_bad_request() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_find_article()
        .withf(|id| id == "not-a-number")
        .returning(|_| Err(store_failure("22P02")));

    let res = get(mocks.into_app(), "/api/articles/not-a-number").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Bad Request");
}

#[tokio::test]
async fn create_article_responds_201() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_create_article()
        .withf(|new| new.author.as_deref() == Some("rogersop") && new.article_img_url.is_some())
        .returning(|_| {
            let mut created = article(14);
            created.comment_count = 0;
            Ok(created)
        });

    let res = send(
        mocks.into_app(),
        Method::POST,
        "/api/articles",
        Some(json!({
            "author": "rogersop",
            "title": "Which is your favourite Taylor Swift boyfriend",
            "body": "Joe",
            "topic": "cats"
        })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.json()["newArticle"]["comment_count"], 0);
}

#[tokio::test]
async fn create_article_with_unknown_author_is_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_create_article()
        .returning(|_| Err(store_failure("23503")));

    let res = send(
        mocks.into_app(),
        Method::POST,
        "/api/articles",
        Some(json!({ "author": "nobody", "title": "t", "body": "b", "topic": "cats" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "Not Found");
}

#[tokio::test]
async fn patch_article_votes() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_increment_votes()
        .withf(|id, delta| id == "1" && delta.as_str() == "1")
        .returning(|_, _| {
            let mut updated = article(1);
            updated.votes = 101;
            Ok(Some(updated))
        });

    let res = send(
        mocks.into_app(),
        Method::PATCH,
        "/api/articles/1",
        Some(json!({ "inc_votes": 1 })),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["updatedArticle"]["votes"], 101);
}

#[tokio::test]
async fn patch_article_rejects_falsy_votes_without_store_access() {
    for body in [json!({}), json!({ "inc_votes": 0 }), json!({ "inc_votes": null })] {
        let res = send(
            Mocks::new().into_app(),
            Method::PATCH,
            "/api/articles/1",
            Some(body.clone()),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(res.message(), "Invalid Form Body", "{body}");
    }
}

#[tokio::test]
async fn patch_article_without_body_is_invalid_form_body() {
    let res = send(Mocks::new().into_app(), Method::PATCH, "/api/articles/1", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Invalid Form Body");

    let app = Mocks::new().into_app();
    let request = axum::http::Request::builder()
        .method(Method::PATCH)
        .uri("/api/articles/1")
        .header("content-type", "text/plain")
        .body(axum::body::Body::from("inc_votes=1"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "message": "Invalid Form Body" }));
}

#[tokio::test]
async fn patch_article_with_whole_float_votes() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_increment_votes()
        .withf(|id, delta| id == "1" && delta.as_str() == "1")
        .returning(|_, _| Ok(Some(article(1))));

    let res = send(
        mocks.into_app(),
        Method::PATCH,
        "/api/articles/1",
        Some(json!({ "inc_votes": 1.0 })),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn patch_article_with_non_numeric_votes_is_bad_request() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_increment_votes()
        .withf(|_, delta| delta.as_str() == "abc")
        .returning(|_, _| Err(store_failure("22P02")));

    let res = send(
        mocks.into_app(),
        Method::PATCH,
        "/api/articles/1",
        Some(json!({ "inc_votes": "abc" })),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Bad Request");
}

#[tokio::test]
async fn patch_missing_article() {
    let mut mocks = Mocks::new();
    mocks.articles.expect_increment_votes().returning(|_, _| Ok(None));

    let res = send(
        mocks.into_app(),
        Method::PATCH,
        "/api/articles/99",
        Some(json!({ "inc_votes": 1 })),
    )
    .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "Non-existent Article ID");
}

#[tokio::test]
async fn delete_article_follows_configured_policy() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_delete_article()
        .withf(|id, policy| id == "1" && *policy == DeletePolicy::Cascade)
        .times(1)
        .returning(|_, _| Ok(DeleteOutcome::Deleted));

    let app = mocks.into_app_with(ArticleOptions {
        delete_policy: DeletePolicy::Cascade,
        ..ArticleOptions::default()
    });
    let res = send(app, Method::DELETE, "/api/articles/1", None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.text.is_empty());
}

#[tokio::test]
async fn delete_article_blocked_by_comments() {
    let mut mocks = Mocks::new();
    mocks
        .articles
        .expect_delete_article()
        .returning(|_, _| Ok(DeleteOutcome::HasComments));

    let res = send(mocks.into_app(), Method::DELETE, "/api/articles/1", None).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.message(), ErrorKind::ArticleHasComments.message());
}
