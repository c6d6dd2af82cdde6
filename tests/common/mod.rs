#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use devconnector_api::auth::{generate_jwt, Claims};
use devconnector_api::config::AppConfig;
use devconnector_api::database::models::User;
use devconnector_api::database::MemoryProfileStore;
use devconnector_api::{app, AppState};

/// In-process application over the memory store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryProfileStore>,
    pub config: AppConfig,
}

pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        Self::with_config(AppConfig::development())
    }

    pub fn with_config(config: AppConfig) -> Result<Self> {
        let store = Arc::new(MemoryProfileStore::new());
        let state = AppState::new(config.clone(), store.clone())?;
        Ok(Self {
            router: app(state),
            store,
            config,
        })
    }

    /// Register a user with the stand-in identity store and return a token for it
    pub async fn sign_up(&self, name: &str) -> Result<(User, String)> {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            avatar: Some(format!("//www.gravatar.com/avatar/{}", name.to_lowercase())),
            date: Utc::now(),
        };
        self.store.insert_user(user.clone()).await;
        let token = self.token_for(user.id)?;
        Ok((user, token))
    }

    pub fn token_for(&self, user_id: Uuid) -> Result<String> {
        Ok(generate_jwt(&Claims::new(user_id, 1), &self.config.security)?)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Reply> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .context("failed to read response body")?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };

        Ok(Reply { status, body })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<Reply> {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: &Value) -> Result<Reply> {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: &Value) -> Result<Reply> {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<Reply> {
        self.send(Method::DELETE, uri, Some(token), None).await
    }
}

/// Collect the `param` of every reported violation
pub fn violated_params(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["param"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
