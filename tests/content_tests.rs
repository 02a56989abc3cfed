mod common;

use axum::http::{Method, StatusCode};
use common::{get, login_token, send, spawn_app};
use lettuce::entities::{resources, social_links};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;

#[tokio::test]
async fn test_daily_status_upsert_by_date() {
    let (state, app) = spawn_app().await;
    let token = login_token(&app).await;

    let missing = get(&app, "/api/daily-status").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "No daily status found");

    let first = send(
        &app,
        Method::POST,
        "/api/daily-status",
        Some(json!({"date": "2024-01-01", "day_number": 1, "ingredient_of_day": "Kale"})),
        Some(&token),
    )
    .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["message"], "Daily status saved successfully");

    let second = send(
        &app,
        Method::POST,
        "/api/daily-status",
        Some(json!({"date": "2024-01-01", "day_number": 1, "ingredient_of_day": "Chard"})),
        Some(&token),
    )
    .await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.body["data"]["id"], first.body["data"]["id"]);

    let history = state.store().list_daily_status().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].date, "2024-01-01");
    assert_eq!(history[0].ingredient_of_day, "Chard");
}

#[tokio::test]
async fn test_daily_status_latest_and_history() {
    let (_, app) = spawn_app().await;
    let token = login_token(&app).await;

    for (date, day, ingredient) in [
        ("2024-01-02", 2, "Chard"),
        ("2024-01-03", 3, "Beets"),
        ("2024-01-01", 1, "Kale"),
    ] {
        let response = send(
            &app,
            Method::POST,
            "/api/daily-status",
            Some(json!({
                "date": date,
                "day_number": day,
                "ingredient_of_day": ingredient,
                "weather": "sunny",
            })),
            Some(&token),
        )
        .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let latest = get(&app, "/api/daily-status").await;
    assert_eq!(latest.status, StatusCode::OK);
    assert_eq!(latest.body["data"]["date"], "2024-01-03");
    assert_eq!(latest.body["data"]["weather"], "sunny");

    let history = get(&app, "/api/daily-status/history").await;
    let dates: Vec<&str> = history.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-01-03", "2024-01-02", "2024-01-01"]);
}

#[tokio::test]
async fn test_daily_status_validation() {
    let (_, app) = spawn_app().await;
    let token = login_token(&app).await;

    let response = send(
        &app,
        Method::POST,
        "/api/daily-status",
        Some(json!({"date": "2024-01-01", "ingredient_of_day": "Kale"})),
        Some(&token),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Missing required fields: date, day_number, ingredient_of_day"
    );
}

#[tokio::test]
async fn test_about_put_is_idempotent() {
    let (state, app) = spawn_app().await;
    let token = login_token(&app).await;

    let missing = get(&app, "/api/about").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "No about content found");

    let body = json!({
        "bio": "I started eating plants.\n\nThen I kept going.",
        "email": "hello@example.com",
    });

    for _ in 0..2 {
        let response = send(&app, Method::PUT, "/api/about", Some(body.clone()), Some(&token)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "About content updated successfully");
    }

    assert_eq!(state.store().count_about().await.unwrap(), 1);

    let about = get(&app, "/api/about").await;
    assert_eq!(about.status, StatusCode::OK);
    assert_eq!(about.body["data"]["bio"], body["bio"]);
    assert_eq!(about.body["data"]["email"], "hello@example.com");
    assert_eq!(
        about.body["data"]["paragraphs"],
        json!(["I started eating plants.", "Then I kept going."])
    );

    let response = send(
        &app,
        Method::PUT,
        "/api/about",
        Some(json!({"bio": "Shorter now."})),
        Some(&token),
    )
    .await;
    assert_eq!(response.body["data"]["bio"], "Shorter now.");
    assert_eq!(response.body["data"]["email"], "hello@example.com");
    assert_eq!(state.store().count_about().await.unwrap(), 1);
}

#[tokio::test]
async fn test_about_validation() {
    let (_, app) = spawn_app().await;
    let token = login_token(&app).await;

    let response = send(&app, Method::PUT, "/api/about", Some(json!({})), Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "At least one of bio, profile_image_url, email is required"
    );

    let response = send(
        &app,
        Method::PUT,
        "/api/about",
        Some(json!({"email": "nope"})),
        Some(&token),
    )
    .await;
    assert_eq!(response.body["error"], "Valid email is required");

    let response = send(&app, Method::PUT, "/api/about", Some(json!({"bio": "x"})), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_link_lists_are_ordered() {
    let (state, app) = spawn_app().await;

    let empty = get(&app, "/api/resources").await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["data"], json!([]));

    let now = chrono::Utc::now().to_rfc3339();
    for (name, order) in [("Cookbook", 3), ("Blog", 1), ("Market", 2)] {
        resources::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            url: Set(format!("https://{}.example.com", name.to_lowercase())),
            image_url: Set(None),
            display_order: Set(order),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        }
        .insert(&state.store().conn)
        .await
        .unwrap();
    }

    for (platform, order) in [("mastodon", 2), ("instagram", 1)] {
        social_links::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            platform: Set(platform.to_string()),
            url: Set(format!("https://{platform}.example.com/lettuce")),
            display_order: Set(order),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        }
        .insert(&state.store().conn)
        .await
        .unwrap();
    }

    let resources = get(&app, "/api/resources").await;
    let names: Vec<&str> = resources.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Blog", "Market", "Cookbook"]);

    let links = get(&app, "/api/social-links").await;
    assert_eq!(links.body["data"][0]["platform"], "instagram");
    assert_eq!(links.body["data"][1]["platform"], "mastodon");
}

#[tokio::test]
async fn test_daily_status_overwrite_keeps_weather_unless_given() {
    let (_, app) = spawn_app().await;
    let token = login_token(&app).await;

    let post = |body: serde_json::Value| {
        let app = app.clone();
        let token = token.clone();
        async move { send(&app, Method::POST, "/api/daily-status", Some(body), Some(&token)).await }
    };

    post(json!({"date": "2024-01-01", "day_number": 1, "ingredient_of_day": "Kale", "weather": "Sunny"})).await;

    let kept = post(json!({"date": "2024-01-01", "day_number": 1, "ingredient_of_day": "Chard"})).await;
    assert_eq!(kept.status, StatusCode::CREATED);
    assert_eq!(kept.body["data"]["ingredient_of_day"], "Chard");
    assert_eq!(kept.body["data"]["weather"], "Sunny");

    let cleared = post(json!({
        "date": "2024-01-01",
        "day_number": 1,
        "ingredient_of_day": "Chard",
        "weather": null,
    }))
    .await;
    assert_eq!(cleared.status, StatusCode::CREATED);
    assert!(cleared.body["data"]["weather"].is_null());
}

#[tokio::test]
async fn test_about_null_clears_optional_fields() {
    let (_, app) = spawn_app().await;
    let token = login_token(&app).await;

    send(
        &app,
        Method::PUT,
        "/api/about",
        Some(json!({
            "bio": "Hello",
            "email": "hello@example.com",
            "profile_image_url": "https://img.example.com/me.jpg",
        })),
        Some(&token),
    )
    .await;

    let response = send(
        &app,
        Method::PUT,
        "/api/about",
        Some(json!({"email": null})),
        Some(&token),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["email"].is_null());
    assert_eq!(response.body["data"]["bio"], "Hello");
    assert_eq!(
        response.body["data"]["profile_image_url"],
        "https://img.example.com/me.jpg"
    );
}
