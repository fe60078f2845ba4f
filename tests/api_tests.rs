use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use heroboard::config::Config;
use heroboard::db::User;
use heroboard::services::TokenCodec;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    secret: String,
}

async fn spawn_app() -> TestApp {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.security.jwt_secret = "integration-test-secret".to_string();

    let secret = config.jwt_secret().expect("secret configured");

    let state = heroboard::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");

    TestApp {
        router: heroboard::api::router(state),
        secret,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Registers `username` and returns `(token, user_id)`.
    async fn register(&self, username: &str) -> (String, String) {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{}@example.com", username.to_lowercase()),
                    "password": "secret123",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {username}: {body}");

        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    async fn hero_id(&self, name: &str) -> String {
        let (status, body) = self.send("GET", "/api/heroes", None, None).await;
        assert_eq!(status, StatusCode::OK);

        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|hero| hero["name"] == name)
            .and_then(|hero| hero["id"].as_str())
            .unwrap()
            .to_string()
    }

    async fn create_request(&self, token: &str, hero_id: &str, urgency: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/api/requests",
                Some(token),
                Some(json!({
                    "heroId": hero_id,
                    "title": "Cat stuck in a tree",
                    "description": "Very high tree, very angry cat",
                    "location": "Central City park",
                    "urgency": urgency,
                    "contactInfo": "555-0100",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create request: {body}");
        body["data"].clone()
    }
}

fn test_user() -> User {
    User {
        id: "ghost".to_string(),
        username: "ghost".to_string(),
        email: "ghost@example.com".to_string(),
        is_hero: false,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[tokio::test]
async fn test_access_guard() {
    let app = spawn_app().await;

    let (status, body) = app.send("GET", "/api/requests", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = app
        .send("GET", "/api/requests", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = TokenCodec::new("someone-elses-secret", 24)
        .issue(&test_user())
        .unwrap();
    let (status, _) = app.send("GET", "/api/requests", Some(&forged), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let expired = TokenCodec::new(&app.secret, 1)
        .issue_at(&test_user(), chrono::Utc::now().timestamp() - 3 * 3600)
        .unwrap();
    let (status, _) = app.send("GET", "/api/requests", Some(&expired), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (token, _) = app.register("bruce").await;
    let (status, body) = app.send("GET", "/api/requests", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_bare_token_header_is_accepted() {
    let app = spawn_app().await;
    let (token, _) = app.register("diana").await;

    let request = Request::builder()
        .uri("/api/auth/me")
        .header("Authorization", token)
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_login_and_me() {
    let app = spawn_app().await;

    let (token, user_id) = app.register("bruce").await;

    let (status, body) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["username"], "bruce");
    assert_eq!(body["data"]["is_hero"], false);

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "bruce", "password": "secret123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "bruce", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "bruce", "email": "other@example.com", "password": "secret123"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"username": "al", "email": "al@example.com", "password": "secret123"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hero_named_accounts_are_heroes() {
    let app = spawn_app().await;

    let (token, _) = app.register("Batman").await;
    let (_, body) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(body["data"]["is_hero"], true);

    let (token, _) = app.register("alfred").await;
    let (_, body) = app.send("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(body["data"]["is_hero"], false);
}

#[tokio::test]
async fn test_heroes_catalog() {
    let app = spawn_app().await;

    let (status, body) = app.send("GET", "/api/heroes", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let heroes = body["data"].as_array().unwrap();
    assert_eq!(heroes.len(), 16);
    assert_eq!(heroes[0]["name"], "Aquaman");
    assert_eq!(heroes[0]["review_count"], 0);

    let flash = app.hero_id("Flash").await;
    let (status, body) = app
        .send("GET", &format!("/api/heroes/{flash}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["image"], "/assets/images/flash.png");

    let (status, _) = app.send("GET", "/api/heroes/missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_upsert_scenario() {
    let app = spawn_app().await;
    let (token, user_id) = app.register("barry").await;
    let hero = app.hero_id("Flash").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/reviews",
            Some(&token),
            Some(json!({"heroId": hero, "userId": user_id, "rating": 5, "reviewText": "Great!"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_update"], false);
    let review_id = body["data"]["review"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "POST",
            "/api/reviews",
            Some(&token),
            Some(json!({"hero_id": hero, "rating": 3, "review_text": "Actually okay"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_update"], true);
    assert_eq!(body["data"]["review"]["id"], review_id.as_str());

    let (status, body) = app
        .send("GET", &format!("/api/heroes/{hero}/reviews"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let reviews = body["data"]["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 3);
    assert_eq!(reviews[0]["review_text"], "Actually okay");
    assert_eq!(reviews[0]["username"], "barry");
    assert_eq!(body["data"]["stats"]["total_reviews"], 1);
    assert_eq!(body["data"]["stats"]["rating_distribution"]["3"], 1);
    assert_eq!(body["data"]["stats"]["rating_distribution"]["5"], 0);
    assert_eq!(body["data"]["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_review_validation() {
    let app = spawn_app().await;
    let (token, _) = app.register("barry").await;
    let hero = app.hero_id("Flash").await;

    let cases = [
        (json!({"heroId": hero, "rating": 6, "reviewText": "Too good"}), StatusCode::BAD_REQUEST),
        (json!({"heroId": hero, "rating": 0, "reviewText": "Too bad"}), StatusCode::BAD_REQUEST),
        (json!({"heroId": hero, "rating": 4, "reviewText": "   "}), StatusCode::BAD_REQUEST),
        (json!({"heroId": hero, "rating": 4}), StatusCode::BAD_REQUEST),
        (
            json!({"heroId": hero, "rating": 4, "reviewText": "Fine", "stars": 4}),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({"heroId": "no-such-hero", "rating": 4, "reviewText": "Who?"}),
            StatusCode::NOT_FOUND,
        ),
        (
            json!({"heroId": hero, "userId": "someone-else", "rating": 4, "reviewText": "Sneaky"}),
            StatusCode::FORBIDDEN,
        ),
    ];

    for (payload, expected) in cases {
        let (status, body) = app
            .send("POST", "/api/reviews", Some(&token), Some(payload.clone()))
            .await;
        assert_eq!(status, expected, "payload {payload}: {body}");
    }

    let (_, body) = app
        .send("GET", &format!("/api/heroes/{hero}/reviews"), None, None)
        .await;
    assert_eq!(body["data"]["stats"]["total_reviews"], 0);
}

#[tokio::test]
async fn test_review_mutations_are_owner_only() {
    let app = spawn_app().await;
    let (owner, _) = app.register("barry").await;
    let (intruder, _) = app.register("leonard").await;
    let hero = app.hero_id("Flash").await;

    let (_, body) = app
        .send(
            "POST",
            "/api/reviews",
            Some(&owner),
            Some(json!({"heroId": hero, "rating": 5, "reviewText": "Fastest alive"})),
        )
        .await;
    let review_id = body["data"]["review"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/reviews/{review_id}");

    let (status, _) = app
        .send("PUT", &uri, Some(&intruder), Some(json!({"rating": 1})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send("PUT", &uri, Some(&owner), Some(json!({"rating": 4, "reviewText": "Still fast"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rating"], 4);
    assert_eq!(body["data"]["review_text"], "Still fast");

    let (status, _) = app
        .send("PUT", &uri, Some(&owner), Some(json!({"rating": 9})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send("DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hero_reviews_stats_and_pagination() {
    let app = spawn_app().await;
    let hero = app.hero_id("Superman").await;

    for (name, rating) in [("lois", 5), ("jimmy", 4), ("perry", 4)] {
        let (token, _) = app.register(name).await;
        let (status, _) = app
            .send(
                "POST",
                "/api/reviews",
                Some(&token),
                Some(json!({"heroId": hero, "rating": rating, "reviewText": "Review"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/heroes/{hero}/reviews?limit=2&offset=0"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["reviews"].as_array().unwrap().len(), 2);
    assert_eq!(data["reviews"][0]["username"], "perry");
    assert_eq!(data["stats"]["total_reviews"], 3);
    assert_eq!(data["stats"]["average_rating"], 4.33);
    assert_eq!(data["stats"]["rating_distribution"]["4"], 2);
    assert_eq!(data["pagination"]["total"], 3);
    assert_eq!(data["pagination"]["has_more"], true);

    let (_, body) = app
        .send(
            "GET",
            &format!("/api/heroes/{hero}/reviews?limit=2&offset=2"),
            None,
            None,
        )
        .await;
    assert_eq!(body["data"]["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["has_more"], false);

    let (_, body) = app.send("GET", "/api/heroes", None, None).await;
    let superman = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|h| h["name"] == "Superman")
        .unwrap();
    assert_eq!(superman["review_count"], 3);
    assert_eq!(superman["average_rating"], 4.33);

    for query in ["limit=0", "limit=101"] {
        let (status, _) = app
            .send("GET", &format!("/api/heroes/{hero}/reviews?{query}"), None, None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
    }

    let (status, _) = app
        .send(
            "GET",
            &format!("/api/heroes/{hero}/reviews?offset={}", u64::MAX),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            "GET",
            &format!("/api/heroes/{hero}/reviews?offset={}", i64::MAX),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reviews"], json!([]));
    assert_eq!(body["data"]["pagination"]["has_more"], false);

    // The server keeps answering after rejected offsets.
    let (status, _) = app.send("GET", "/api/heroes", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("GET", "/api/heroes/nobody/reviews", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_lifecycle_scenario() {
    let app = spawn_app().await;
    let (requester, _) = app.register("iris").await;
    let (flash_token, _) = app.register("Flash").await;
    let hero = app.hero_id("Flash").await;

    let request = app.create_request(&requester, &hero, "high").await;
    assert_eq!(request["status"], "pending");
    assert_eq!(request["urgency"], "high");
    let request_id = request["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send("GET", "/api/requests/hero?status=pending", Some(&flash_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["requester_username"], "iris");
    assert_eq!(body["data"][0]["contact_info"], "555-0100");

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/api/requests/{request_id}/status"),
            Some(&flash_token),
            Some(json!({"status": "rejected", "message": "Busy with Zoom"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "rejected");

    let (_, body) = app
        .send("GET", "/api/requests/hero?status=pending", Some(&flash_token), None)
        .await;
    assert_eq!(body["data"], json!([]));

    let (_, body) = app
        .send("GET", "/api/requests/hero", Some(&flash_token), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = app.send("GET", "/api/requests", Some(&requester), None).await;
    let mine = body["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["status"], "rejected");
    assert_eq!(mine[0]["hero_name"], "Flash");
    assert_eq!(mine[0]["hero_response"]["message"], "Busy with Zoom");

    let (status, _) = app
        .send(
            "PATCH",
            &format!("/api/requests/{request_id}/status"),
            Some(&flash_token),
            Some(json!({"status": "accepted"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = app.send("GET", "/api/requests", Some(&requester), None).await;
    assert_eq!(body["data"][0]["status"], "rejected");
}

#[tokio::test]
async fn test_status_change_requires_the_targeted_hero() {
    let app = spawn_app().await;
    let (requester, _) = app.register("iris").await;
    let (batman, _) = app.register("Batman").await;
    let (flash, _) = app.register("Flash").await;
    let hero = app.hero_id("Flash").await;

    let request = app.create_request(&requester, &hero, "critical").await;
    let uri = format!("/api/requests/{}/status", request["id"].as_str().unwrap());

    let (status, _) = app
        .send("PATCH", &uri, Some(&batman), Some(json!({"status": "accepted"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("PATCH", &uri, Some(&requester), Some(json!({"status": "accepted"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for invalid in ["done", "pending"] {
        let (status, _) = app
            .send("PATCH", &uri, Some(&flash), Some(json!({"status": invalid})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{invalid}");
    }

    let (status, _) = app
        .send(
            "PATCH",
            "/api/requests/no-such-request/status",
            Some(&flash),
            Some(json!({"status": "accepted"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send("PATCH", &uri, Some(&flash), Some(json!({"status": "accepted"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "accepted");
}

#[tokio::test]
async fn test_incoming_requests_are_for_heroes_only() {
    let app = spawn_app().await;
    let (token, _) = app.register("iris").await;

    let (status, _) = app
        .send("GET", "/api/requests/hero", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (flash, _) = app.register("Flash").await;
    let (status, _) = app
        .send("GET", "/api/requests/hero?status=archived", Some(&flash), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_request_validation() {
    let app = spawn_app().await;
    let (token, _) = app.register("iris").await;
    let hero = app.hero_id("Vixen").await;

    let base = json!({
        "heroId": hero,
        "title": "Lost dog",
        "description": "Brown, answers to Rex",
        "location": "Detroit",
        "urgency": "low",
        "contactInfo": "iris@example.com",
    });

    let mut bad_urgency = base.clone();
    bad_urgency["urgency"] = json!("extreme");
    let mut blank_title = base.clone();
    blank_title["title"] = json!("  ");
    let mut forced_status = base.clone();
    forced_status["status"] = json!("accepted");
    let mut missing_hero = base.clone();
    missing_hero["heroId"] = json!("nobody");

    let cases = [
        (bad_urgency, StatusCode::BAD_REQUEST),
        (blank_title, StatusCode::BAD_REQUEST),
        (forced_status, StatusCode::BAD_REQUEST),
        (missing_hero, StatusCode::NOT_FOUND),
    ];

    for (payload, expected) in cases {
        let (status, body) = app
            .send("POST", "/api/requests", Some(&token), Some(payload.clone()))
            .await;
        assert_eq!(status, expected, "payload {payload}: {body}");
    }

    let mut upper = base.clone();
    upper["urgency"] = json!("LOW");
    let (status, body) = app
        .send("POST", "/api/requests", Some(&token), Some(upper))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["urgency"], "low");
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn test_request_content_edits_and_delete() {
    let app = spawn_app().await;
    let (owner, _) = app.register("iris").await;
    let (other, _) = app.register("wally").await;
    let (flash, _) = app.register("Flash").await;
    let hero = app.hero_id("Flash").await;

    let request = app.create_request(&owner, &hero, "normal").await;
    let uri = format!("/api/requests/{}", request["id"].as_str().unwrap());

    let (status, _) = app
        .send("PUT", &uri, Some(&other), Some(json!({"title": "Hijacked"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("PUT", &uri, Some(&owner), Some(json!({"urgency": "whenever"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send("PATCH", &uri, Some(&owner), Some(json!({"title": "Two cats stuck"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Two cats stuck");
    assert_eq!(body["data"]["status"], "pending");

    let (status, _) = app
        .send("PUT", "/api/requests/missing", Some(&owner), Some(json!({"title": "x"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            "PATCH",
            &format!("{uri}/status"),
            Some(&flash),
            Some(json!({"status": "accepted", "message": "On my way"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("PUT", &uri, Some(&owner), Some(json!({"title": "Too late"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.send("DELETE", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send("DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send("DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.send("GET", "/api/requests", Some(&owner), None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_user_profiles() {
    let app = spawn_app().await;
    let (token, user_id) = app.register("clark").await;
    let (_, other_id) = app.register("lex").await;
    let hero = app.hero_id("WonderWoman").await;

    app.send(
        "POST",
        "/api/reviews",
        Some(&token),
        Some(json!({"heroId": hero, "rating": 5, "reviewText": "Amazing"})),
    )
    .await;

    let (status, body) = app
        .send("GET", &format!("/api/users/{user_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "clark");
    assert_eq!(body["data"]["reviews"][0]["hero_name"], "WonderWoman");

    let (status, _) = app
        .send("GET", &format!("/api/users/{other_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send("GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("email").is_none()));
}
