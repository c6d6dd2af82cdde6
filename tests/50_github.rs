mod common;

use std::collections::HashMap;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use common::TestApp;
use devconnector_api::config::AppConfig;

/// Local stand-in for the GitHub repositories endpoint
async fn spawn_github_stub() -> Result<String> {
    let port = portpicker::pick_unused_port().context("no free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;

    let stub = Router::new().route(
        "/users/:username/repos",
        get(
            |Path(username): Path<String>, Query(query): Query<HashMap<String, String>>| async move {
                if username == "ghost" {
                    return Err((StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))));
                }
                let limit: usize = query.get("per_page").and_then(|v| v.parse().ok()).unwrap_or(30);
                let repos: Vec<Value> = (0..limit)
                    .map(|i| json!({ "name": format!("{}-repo-{}", username, i), "owner": { "login": username } }))
                    .collect();
                Ok(Json(json!({ "repos": repos, "sort": query.get("sort"), "direction": query.get("direction") })))
            },
        ),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, stub).await;
    });

    Ok(format!("http://127.0.0.1:{}", port))
}

async fn app_with_stub() -> Result<TestApp> {
    let mut config = AppConfig::development();
    config.github.api_base = spawn_github_stub().await?;
    config.github.repo_limit = 3;
    TestApp::with_config(config)
}

#[tokio::test]
async fn lists_repositories_for_known_user() -> Result<()> {
    let app = app_with_stub().await?;

    let res = app.get("/api/profile/github/octocat", None).await?;

    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["repos"].as_array().map(Vec::len), Some(3));
    assert_eq!(res.body["repos"][0]["name"], "octocat-repo-0");
    assert_eq!(res.body["sort"], "created");
    assert_eq!(res.body["direction"], "asc");
    Ok(())
}

#[tokio::test]
async fn unknown_user_has_no_github_profile() -> Result<()> {
    let app = app_with_stub().await?;

    let res = app.get("/api/profile/github/ghost", None).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["msg"], "No Github profile found");
    Ok(())
}

#[tokio::test]
async fn malformed_login_is_rejected_without_a_lookup() -> Result<()> {
    let mut config = AppConfig::development();
    // nothing listens here; a lookup would surface as a 500
    config.github.api_base = "http://127.0.0.1:9".to_string();
    let app = TestApp::with_config(config)?;

    let res = app.get("/api/profile/github/bad--name", None).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["msg"], "No Github profile found");
    Ok(())
}
