//! The self-describing catalogue served at `GET /api`.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

pub static CATALOGUE: Lazy<Value> = Lazy::new(|| {
    json!({
        "GET /api": {
            "description": "serves up a json representation of all the available endpoints of the api"
        },
        "GET /api/topics": {
            "description": "serves an array of all topics",
            "queries": [],
            "exampleResponse": {
                "topics": [{ "slug": "football", "description": "Footie!" }]
            }
        },
        "POST /api/topics": {
            "description": "adds a topic and serves it back",
            "exampleBody": { "slug": "football", "description": "Footie!" },
            "exampleResponse": {
                "newTopic": { "slug": "football", "description": "Footie!" }
            }
        },
        "GET /api/articles": {
            "description": "serves a page of articles, each with its comment_count and the total_count of the filtered set",
            "queries": ["topic", "sort_by", "order", "limit", "p"],
            "exampleResponse": {
                "allArticles": [{
                    "article_id": 34,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "body": "Text from the article..",
                    "created_at": "2018-05-30T15:59:13.341Z",
                    "votes": 0,
                    "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700",
                    "comment_count": 6,
                    "total_count": 37
                }]
            }
        },
        "POST /api/articles": {
            "description": "adds an article; article_img_url falls back to a placeholder",
            "exampleBody": {
                "author": "butter_bridge",
                "title": "Living in the shadow of a great man",
                "body": "I find this existence challenging",
                "topic": "mitch",
                "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700"
            },
            "exampleResponse": { "newArticle": { "article_id": 14, "comment_count": 0 } }
        },
        "GET /api/articles/:article_id": {
            "description": "serves a single article with its comment_count",
            "exampleResponse": { "article": { "article_id": 1, "comment_count": 11 } }
        },
        "PATCH /api/articles/:article_id": {
            "description": "adds inc_votes to the article's votes and serves the updated article",
            "exampleBody": { "inc_votes": 1 },
            "exampleResponse": { "updatedArticle": { "article_id": 1, "votes": 101 } }
        },
        "DELETE /api/articles/:article_id": {
            "description": "deletes the article and responds with no content"
        },
        "GET /api/articles/:article_id/comments": {
            "description": "serves the comments of an article",
            "queries": ["sort_by", "order"],
            "exampleResponse": {
                "allComments": [{
                    "comment_id": 5,
                    "body": "I hate streaming noses",
                    "article_id": 1,
                    "author": "icellusedkars",
                    "votes": 0,
                    "created_at": "2020-11-03T21:00:00.000Z"
                }]
            }
        },
        "POST /api/articles/:article_id/comments": {
            "description": "adds a comment to an article and serves it back",
            "exampleBody": { "username": "butter_bridge", "body": "This is a comment" },
            "exampleResponse": { "postedComment": { "comment_id": 19, "article_id": 2 } }
        },
        "PATCH /api/comments/:comment_id": {
            "description": "adds inc_votes to the comment's votes and serves the updated comment",
            "exampleBody": { "inc_votes": -1 },
            "exampleResponse": { "updatedComment": { "comment_id": 1, "votes": 15 } }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes the comment and responds with no content"
        },
        "GET /api/users": {
            "description": "serves an array of all users",
            "exampleResponse": {
                "users": [{
                    "username": "butter_bridge",
                    "name": "jonny",
                    "avatar_url": "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
                }]
            }
        },
        "GET /api/users/:username": {
            "description": "serves a single user",
            "exampleResponse": { "user": { "username": "butter_bridge", "name": "jonny" } }
        }
    })
});
