#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use postbox_api::email::EmailPolicy;
use postbox_api::state::{AppState, AppStateInner};
use postbox_db::Database;
use postbox_server::{StaticDirs, build_router};

pub const INDEX_HTML: &str = "<!doctype html><form action=\"/submit\" method=\"post\"></form>";
pub const REDIRECT_JS: &str = "window.location.href = '/index.html';";

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub fn test_app() -> TestApp {
    test_app_with(Database::open_in_memory().unwrap())
}

pub fn test_app_with(db: Database) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    let scripts = dir.path().join("scripts");
    fs::create_dir_all(&public).unwrap();
    fs::create_dir_all(&scripts).unwrap();
    fs::write(public.join("index.html"), INDEX_HTML).unwrap();
    fs::write(scripts.join("redirect.js"), REDIRECT_JS).unwrap();

    let state: AppState = Arc::new(AppStateInner {
        db,
        email_policy: EmailPolicy::default(),
    });
    let app = build_router(state.clone(), &StaticDirs { public, scripts });

    TestApp { app, state, _dir: dir }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, body: serde_json::Value) -> TestResponse {
        self.send(json_request(body)).await
    }

    pub fn rows(&self) -> Vec<(String, String, String)> {
        self.state
            .db
            .with_conn(|conn| {
                let mut stmt = conn.prepare("SELECT name, email, message FROM messages ORDER BY id")?;
                let rows = stmt
                    .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .unwrap()
    }
}

pub fn json_request(body: serde_json::Value) -> Request<Body> {
    Request::post("/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
